use shared::format::{format_duration, format_price};
use web_sys::MouseEvent;
use yew::prelude::*;

use super::confirm_dialog::ConfirmDialog;
use super::error_banner::ErrorBanner;
use super::service_modal::ServiceModal;
use crate::hooks::use_services::use_services;

#[function_component(ServicesPage)]
pub fn services_page() -> Html {
    let services = use_services();
    let state = &services.state;
    let actions = services.actions.clone();

    let on_new_click = {
        let open_create = actions.open_create.clone();
        Callback::from(move |_: MouseEvent| open_create.emit(()))
    };

    let body = if !state.loaded {
        html! { <div class="loading-indicator">{"Loading services..."}</div> }
    } else if state.is_empty() {
        html! {
            <div class="empty-state">
                <p>{"No services yet"}</p>
                <p class="empty-state-hint">{"Add the services you offer so clients can be booked for them."}</p>
            </div>
        }
    } else {
        html! {
            <div class="service-list">
                {for state.services.iter().map(|service| {
                    let on_edit = {
                        let open_edit = actions.open_edit.clone();
                        let service = service.clone();
                        Callback::from(move |_: MouseEvent| open_edit.emit(service.clone()))
                    };
                    let on_delete = {
                        let ask_delete = actions.ask_delete.clone();
                        let id = service.id;
                        Callback::from(move |_: MouseEvent| ask_delete.emit(id))
                    };

                    html! {
                        <div class="service-card" key={service.id.to_string()}>
                            <div class="service-card-header">
                                <h3>{&service.name}</h3>
                                <span class="service-price">{format_price(service.price)}</span>
                            </div>
                            <span class="service-duration">{format_duration(service.duration_minutes)}</span>
                            {match service.description.as_deref().filter(|d| !d.trim().is_empty()) {
                                Some(description) => html! { <p class="service-description">{description}</p> },
                                None => html! {},
                            }}
                            <div class="service-actions">
                                <button class="btn btn-secondary" onclick={on_edit}>{"Edit"}</button>
                                <button class="btn btn-danger" onclick={on_delete}>{"Delete"}</button>
                            </div>
                        </div>
                    }
                })}
            </div>
        }
    };

    let pending_name = state
        .pending_delete
        .and_then(|id| state.find(id))
        .map(|service| service.name.clone());

    html! {
        <section class="services-page">
            <div class="page-header">
                <h2>{"Services"}</h2>
                <button class="btn btn-primary" onclick={on_new_click}>{"New service"}</button>
            </div>

            <ErrorBanner error={services.error.clone()} on_dismiss={actions.clear_error.clone()} />
            {body}

            {if state.modal_open {
                html! {
                    <ServiceModal
                        editing={state.editing.is_some()}
                        form={state.form.clone()}
                        errors={state.errors.clone()}
                        submitting={services.loading}
                        on_input={actions.on_input.clone()}
                        on_submit={actions.submit.clone()}
                        on_close={actions.close_modal.clone()}
                    />
                }
            } else {
                html! {}
            }}

            {if state.pending_delete.is_some() {
                let message = match pending_name {
                    Some(name) => format!("Delete the service \"{}\"?", name),
                    None => "Delete this service?".to_string(),
                };
                html! {
                    <ConfirmDialog
                        title="Delete service"
                        {message}
                        confirm_label="Delete"
                        on_confirm={actions.confirm_delete.clone()}
                        on_dismiss={actions.dismiss_delete.clone()}
                    />
                }
            } else {
                html! {}
            }}
        </section>
    }
}
