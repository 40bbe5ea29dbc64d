use shared::validation::{FormErrors, ServiceField, ServiceForm, ServiceInput};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::modal::{FieldErrorText, Modal};

#[derive(Properties, PartialEq)]
pub struct ServiceModalProps {
    pub editing: bool,
    pub form: ServiceForm,
    pub errors: FormErrors<ServiceField>,
    pub submitting: bool,
    pub on_input: Callback<ServiceInput>,
    pub on_submit: Callback<()>,
    pub on_close: Callback<()>,
}

fn input_callback(on_input: &Callback<ServiceInput>, wrap: fn(String) -> ServiceInput) -> Callback<InputEvent> {
    let on_input = on_input.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        on_input.emit(wrap(input.value()));
    })
}

#[function_component(ServiceModal)]
pub fn service_modal(props: &ServiceModalProps) -> Html {
    let on_name_input = input_callback(&props.on_input, ServiceInput::Name);
    let on_duration_input = input_callback(&props.on_input, ServiceInput::Duration);
    let on_price_input = input_callback(&props.on_input, ServiceInput::Price);

    let on_description_input = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            on_input.emit(ServiceInput::Description(area.value()));
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
    let title = if props.editing { "Edit service" } else { "New service" };

    html! {
        <Modal {title} on_close={props.on_close.clone()}>
            <form class="service-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="service-name">{"Name"}</label>
                    <input
                        id="service-name"
                        type="text"
                        placeholder="e.g. Facial cleansing"
                        value={form.name.clone()}
                        oninput={on_name_input}
                        disabled={props.submitting}
                    />
                    <FieldErrorText message={props.errors.message(ServiceField::Name)} />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="service-duration">{"Duration (minutes)"}</label>
                        <input
                            id="service-duration"
                            type="number"
                            min="1"
                            step="1"
                            value={form.duration_minutes.clone()}
                            oninput={on_duration_input}
                            disabled={props.submitting}
                        />
                        <FieldErrorText message={props.errors.message(ServiceField::Duration)} />
                    </div>

                    <div class="form-group">
                        <label for="service-price">{"Price (R$)"}</label>
                        <input
                            id="service-price"
                            type="text"
                            inputmode="decimal"
                            placeholder="0,00"
                            value={form.price.clone()}
                            oninput={on_price_input}
                            disabled={props.submitting}
                        />
                        <FieldErrorText message={props.errors.message(ServiceField::Price)} />
                    </div>
                </div>

                <div class="form-group">
                    <label for="service-description">{"Description"}</label>
                    <textarea
                        id="service-description"
                        rows="3"
                        value={form.description.clone()}
                        oninput={on_description_input}
                        disabled={props.submitting}
                    />
                    <FieldErrorText message={props.errors.message(ServiceField::Description)} />
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
