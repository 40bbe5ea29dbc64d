use shared::BookingDayIndex;
use yew::prelude::*;

use super::booking_modal::BookingModal;
use super::calendar::BookingCalendar;
use super::confirm_dialog::ConfirmDialog;
use super::day_panel::{DayEntry, DayPanel};
use super::error_banner::ErrorBanner;
use crate::hooks::use_bookings::use_bookings;
use crate::hooks::use_calendar::use_calendar;
use crate::services::date_utils::today;

#[function_component(BookingsPage)]
pub fn bookings_page() -> Html {
    let today = *use_memo((), |_| today());
    let bookings = use_bookings(today);
    let state = &bookings.state;
    let actions = bookings.actions.clone();
    let calendar = use_calendar(state.month, today, actions.navigate.clone());

    let index = use_memo(state.bookings.clone(), |bookings| BookingDayIndex::build(bookings));

    let entries: Vec<DayEntry> = state
        .day_bookings()
        .into_iter()
        .map(|booking| DayEntry {
            service_name: state.service_name(booking.service_id).to_string(),
            booking,
        })
        .collect();

    html! {
        <section class="bookings-page">
            <ErrorBanner error={bookings.error.clone()} on_dismiss={actions.clear_error.clone()} />
            <div class="bookings-layout">
                <BookingCalendar
                    calendar={calendar.state.clone()}
                    actions={calendar.actions.clone()}
                    index={(*index).clone()}
                    selected={state.selected}
                    on_select={actions.select_day.clone()}
                />
                <DayPanel
                    selected={state.selected}
                    {entries}
                    on_new={actions.open_create.clone()}
                    on_edit={actions.open_edit.clone()}
                    on_cancel={actions.ask_cancel.clone()}
                />
            </div>

            {if bookings.loading {
                html! { <div class="loading-indicator">{"Loading..."}</div> }
            } else {
                html! {}
            }}

            {if state.modal_open {
                html! {
                    <BookingModal
                        editing={state.editing.is_some()}
                        form={state.form.clone()}
                        errors={state.errors.clone()}
                        services={state.services.clone()}
                        time_options={state.time_options()}
                        submitting={bookings.loading}
                        on_input={actions.on_input.clone()}
                        on_submit={actions.submit.clone()}
                        on_close={actions.close_modal.clone()}
                    />
                }
            } else {
                html! {}
            }}

            {if state.pending_cancel.is_some() {
                html! {
                    <ConfirmDialog
                        title="Cancel booking"
                        message="Are you sure you want to cancel this booking?"
                        confirm_label="Cancel booking"
                        on_confirm={actions.confirm_cancel.clone()}
                        on_dismiss={actions.dismiss_cancel.clone()}
                    />
                }
            } else {
                html! {}
            }}
        </section>
    }
}
