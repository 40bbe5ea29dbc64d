use chrono::NaiveTime;
use shared::format::{format_duration, format_time};
use shared::validation::{BookingField, BookingForm, BookingInput, FormErrors};
use shared::Service;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use super::modal::{FieldErrorText, Modal};

#[derive(Properties, PartialEq)]
pub struct BookingModalProps {
    pub editing: bool,
    pub form: BookingForm,
    pub errors: FormErrors<BookingField>,
    pub services: Vec<Service>,
    pub time_options: Vec<NaiveTime>,
    pub submitting: bool,
    pub on_input: Callback<BookingInput>,
    pub on_submit: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(BookingModal)]
pub fn booking_modal(props: &BookingModalProps) -> Html {
    let on_service_change = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_input.emit(BookingInput::Service(select.value()));
        })
    };

    let on_date_change = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit(BookingInput::Date(input.value()));
        })
    };

    let on_time_change = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_input.emit(BookingInput::Time(select.value()));
        })
    };

    let on_name_input = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit(BookingInput::ClientName(input.value()));
        })
    };

    let on_contact_input = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit(BookingInput::ClientContact(input.value()));
        })
    };

    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let form = &props.form;
    let times_ready = form.slot_query().is_some();
    let title = if props.editing { "Edit booking" } else { "New booking" };

    html! {
        <Modal {title} on_close={props.on_close.clone()}>
            <form class="booking-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="booking-service">{"Service"}</label>
                    <select id="booking-service" onchange={on_service_change} disabled={props.submitting}>
                        <option value="" selected={form.service_id.is_empty()}>{"Select a service"}</option>
                        {for props.services.iter().map(|service| {
                            let value = service.id.to_string();
                            html! {
                                <option selected={form.service_id == value} value={value.clone()}>
                                    {format!("{} ({})", service.name, format_duration(service.duration_minutes))}
                                </option>
                            }
                        })}
                    </select>
                    <FieldErrorText message={props.errors.message(BookingField::Service)} />
                </div>

                <div class="form-group">
                    <label for="booking-date">{"Date"}</label>
                    <input
                        id="booking-date"
                        type="date"
                        value={form.date.clone()}
                        onchange={on_date_change}
                        disabled={props.submitting}
                    />
                    <FieldErrorText message={props.errors.message(BookingField::Date)} />
                </div>

                <div class="form-group">
                    <label for="booking-time">{"Time"}</label>
                    <select
                        id="booking-time"
                        onchange={on_time_change}
                        disabled={props.submitting || !times_ready}
                    >
                        <option value="" selected={form.time.is_empty()}>
                            {if !times_ready {
                                "Choose a service and date first"
                            } else if props.time_options.is_empty() {
                                "No times available"
                            } else {
                                "Select a time"
                            }}
                        </option>
                        {for props.time_options.iter().map(|time| {
                            let value = format_time(*time);
                            html! {
                                <option selected={form.time == value} value={value.clone()}>{value.clone()}</option>
                            }
                        })}
                    </select>
                    <FieldErrorText message={props.errors.message(BookingField::Time)} />
                </div>

                <div class="form-group">
                    <label for="booking-client">{"Client name"}</label>
                    <input
                        id="booking-client"
                        type="text"
                        placeholder="Client's full name"
                        value={form.client_name.clone()}
                        oninput={on_name_input}
                        disabled={props.submitting}
                    />
                    <FieldErrorText message={props.errors.message(BookingField::ClientName)} />
                </div>

                <div class="form-group">
                    <label for="booking-contact">{"Contact"}</label>
                    <input
                        id="booking-contact"
                        type="text"
                        placeholder="Phone or email"
                        value={form.client_contact.clone()}
                        oninput={on_contact_input}
                        disabled={props.submitting}
                    />
                    <FieldErrorText message={props.errors.message(BookingField::ClientContact)} />
                </div>

                <div class="modal-buttons">
                    <button type="submit" class="btn btn-primary" disabled={props.submitting}>
                        {if props.submitting { "Saving..." } else { "Save" }}
                    </button>
                    <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={props.submitting}>
                        {"Cancel"}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
