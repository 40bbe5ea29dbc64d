use chrono::NaiveDate;
use shared::format::{format_day_label, format_time};
use shared::{Booking, BookingId};
use web_sys::MouseEvent;
use yew::prelude::*;

/// One booking row with its service already resolved to a name
#[derive(Clone, PartialEq)]
pub struct DayEntry {
    pub booking: Booking,
    pub service_name: String,
}

#[derive(Properties, PartialEq)]
pub struct DayPanelProps {
    pub selected: Option<NaiveDate>,
    pub entries: Vec<DayEntry>,
    pub on_new: Callback<()>,
    pub on_edit: Callback<Booking>,
    pub on_cancel: Callback<BookingId>,
}

#[function_component(DayPanel)]
pub fn day_panel(props: &DayPanelProps) -> Html {
    let on_new_click = {
        let on_new = props.on_new.clone();
        Callback::from(move |_: MouseEvent| on_new.emit(()))
    };

    let Some(date) = props.selected else {
        return html! {
            <aside class="day-panel">
                <p class="day-panel-hint">{"Select a day to see its bookings"}</p>
                <button class="btn btn-primary" onclick={on_new_click}>{"New booking"}</button>
            </aside>
        };
    };

    html! {
        <aside class="day-panel">
            <div class="day-panel-header">
                <h3>{format_day_label(date)}</h3>
                <button class="btn btn-primary" onclick={on_new_click}>{"New booking"}</button>
            </div>

            {if props.entries.is_empty() {
                html! { <p class="day-panel-empty">{"No bookings for this day"}</p> }
            } else {
                html! {
                    <ul class="booking-list">
                        {for props.entries.iter().map(|entry| {
                            let on_edit = {
                                let on_edit = props.on_edit.clone();
                                let booking = entry.booking.clone();
                                Callback::from(move |_: MouseEvent| on_edit.emit(booking.clone()))
                            };
                            let on_cancel = {
                                let on_cancel = props.on_cancel.clone();
                                let id = entry.booking.id;
                                Callback::from(move |_: MouseEvent| on_cancel.emit(id))
                            };

                            html! {
                                <li class="booking-item" key={entry.booking.id.to_string()}>
                                    <span class="booking-time">{format_time(entry.booking.time)}</span>
                                    <div class="booking-details">
                                        <span class="booking-client">{&entry.booking.client_name}</span>
                                        <span class="booking-service">{&entry.service_name}</span>
                                        <span class="booking-contact">{&entry.booking.client_contact}</span>
                                    </div>
                                    <div class="booking-actions">
                                        <button class="btn btn-secondary" onclick={on_edit}>{"Edit"}</button>
                                        <button class="btn btn-danger" onclick={on_cancel}>{"Cancel"}</button>
                                    </div>
                                </li>
                            }
                        })}
                    </ul>
                }
            }}
        </aside>
    }
}
