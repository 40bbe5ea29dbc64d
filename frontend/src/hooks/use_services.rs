use std::rc::Rc;

use shared::validation::{ServiceField, ServiceInput, FormErrors};
use shared::views::{ServicesController, ServicesState, SubmitOutcome};
use shared::{Service, ServiceId};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::use_api::use_api;
use super::use_toasts::use_notifier;
use crate::services::logging::Logger;

const COMPONENT: &str = "use_services";

pub enum ServicesAction {
    Loaded(Vec<Service>),
    LoadFailed,
    OpenCreate,
    OpenEdit(Service),
    CloseModal,
    Input(ServiceInput),
    Invalid(FormErrors<ServiceField>),
    AskDelete(ServiceId),
    DismissDelete,
}

#[derive(Clone, PartialEq, Default)]
pub struct ServicesStore(pub ServicesState);

impl Reducible for ServicesStore {
    type Action = ServicesAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = self.0.clone();
        match action {
            ServicesAction::Loaded(services) => state.set_services(services),
            ServicesAction::LoadFailed => state.loaded = true,
            ServicesAction::OpenCreate => state.open_create(),
            ServicesAction::OpenEdit(service) => state.open_edit(&service),
            ServicesAction::CloseModal => state.close_modal(),
            ServicesAction::Input(input) => state.apply_input(input),
            ServicesAction::Invalid(errors) => state.errors = errors,
            ServicesAction::AskDelete(id) => state.pending_delete = Some(id),
            ServicesAction::DismissDelete => state.pending_delete = None,
        }
        Rc::new(Self(state))
    }
}

pub struct UseServicesResult {
    pub state: ServicesState,
    pub loading: bool,
    /// Message of the last failed call
    pub error: Option<String>,
    pub actions: UseServicesActions,
}

#[derive(Clone)]
pub struct UseServicesActions {
    pub open_create: Callback<()>,
    pub open_edit: Callback<Service>,
    pub close_modal: Callback<()>,
    pub on_input: Callback<ServiceInput>,
    pub submit: Callback<()>,
    pub ask_delete: Callback<ServiceId>,
    pub dismiss_delete: Callback<()>,
    pub clear_error: Callback<()>,
    pub confirm_delete: Callback<()>,
}

#[hook]
pub fn use_services() -> UseServicesResult {
    let store = use_reducer(ServicesStore::default);
    let api = use_api();
    let notifier = use_notifier();

    let state = &store.0;

    {
        let api = api.api.clone();
        let notifier = notifier.clone();
        let dispatcher = store.dispatcher();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let api = api.tracked();
                let controller = ServicesController::new(&api, &notifier);
                match controller.load().await {
                    Ok(services) => {
                        Logger::info_with_component(COMPONENT, &format!("Loaded {} services", services.len()));
                        dispatcher.dispatch(ServicesAction::Loaded(services));
                    }
                    Err(_) => dispatcher.dispatch(ServicesAction::LoadFailed),
                }
            });
            || ()
        });
    }

    let open_create = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(ServicesAction::OpenCreate))
    };

    let open_edit = {
        let dispatcher = store.dispatcher();
        Callback::from(move |service: Service| dispatcher.dispatch(ServicesAction::OpenEdit(service)))
    };

    let close_modal = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(ServicesAction::CloseModal))
    };

    let on_input = {
        let dispatcher = store.dispatcher();
        Callback::from(move |input: ServiceInput| dispatcher.dispatch(ServicesAction::Input(input)))
    };

    let submit = {
        let api = api.api.clone();
        let notifier = notifier.clone();
        let dispatcher = store.dispatcher();
        let form = state.form.clone();
        let editing = state.editing;
        Callback::from(move |_: ()| {
            let api = api.clone();
            let notifier = notifier.clone();
            let dispatcher = dispatcher.clone();
            let form = form.clone();

            spawn_local(async move {
                let api = api.tracked();
                let controller = ServicesController::new(&api, &notifier);
                match controller.save(&form, editing).await {
                    SubmitOutcome::Invalid(errors) => dispatcher.dispatch(ServicesAction::Invalid(errors)),
                    SubmitOutcome::Failed(message) => {
                        Logger::error_with_component(COMPONENT, &format!("Saving service failed: {}", message));
                    }
                    SubmitOutcome::Saved(reloaded) => {
                        dispatcher.dispatch(ServicesAction::CloseModal);
                        if let Some(services) = reloaded {
                            dispatcher.dispatch(ServicesAction::Loaded(services));
                        }
                    }
                }
            });
        })
    };

    let ask_delete = {
        let dispatcher = store.dispatcher();
        Callback::from(move |id: ServiceId| dispatcher.dispatch(ServicesAction::AskDelete(id)))
    };

    let dismiss_delete = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(ServicesAction::DismissDelete))
    };

    let confirm_delete = {
        let api = api.api.clone();
        let notifier = notifier.clone();
        let dispatcher = store.dispatcher();
        let pending = state.pending_delete;
        let current = state.services.clone();
        Callback::from(move |_: ()| {
            dispatcher.dispatch(ServicesAction::DismissDelete);
            let Some(id) = pending else {
                return;
            };

            let api = api.clone();
            let notifier = notifier.clone();
            let dispatcher = dispatcher.clone();
            let current = current.clone();

            spawn_local(async move {
                let api = api.tracked();
                let controller = ServicesController::new(&api, &notifier);
                if let Ok(services) = controller.delete(id, &current).await {
                    dispatcher.dispatch(ServicesAction::Loaded(services));
                }
            });
        })
    };

    let clear_error = {
        let api = api.api.clone();
        Callback::from(move |_: ()| api.clear_error())
    };

    UseServicesResult {
        state: state.clone(),
        loading: api.loading,
        error: api.error.clone(),
        actions: UseServicesActions {
            open_create,
            open_edit,
            close_modal,
            on_input,
            submit,
            ask_delete,
            dismiss_delete,
            clear_error,
            confirm_delete,
        },
    }
}
