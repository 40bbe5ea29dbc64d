//! The services page: catalog list and the create/edit modal.

use super::{Notifier, SubmitOutcome};
use crate::validation::{FormErrors, ServiceField, ServiceForm, ServiceInput, INVALID_FORM_MESSAGE};
use crate::{AgendaApi, Service, ServiceId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServicesState {
    pub services: Vec<Service>,
    /// Set once the first load finished, successful or not
    pub loaded: bool,
    pub modal_open: bool,
    pub editing: Option<ServiceId>,
    pub form: ServiceForm,
    pub errors: FormErrors<ServiceField>,
    /// Service waiting for the user to confirm its deletion
    pub pending_delete: Option<ServiceId>,
}

impl ServicesState {
    pub fn set_services(&mut self, services: Vec<Service>) {
        self.services = services;
        self.loaded = true;
    }

    /// Nothing to list after a finished load
    pub fn is_empty(&self) -> bool {
        self.loaded && self.services.is_empty()
    }

    pub fn find(&self, id: ServiceId) -> Option<&Service> {
        self.services.iter().find(|service| service.id == id)
    }

    pub fn open_create(&mut self) {
        self.editing = None;
        self.form = ServiceForm::default();
        self.errors = FormErrors::default();
        self.modal_open = true;
    }

    pub fn open_edit(&mut self, service: &Service) {
        self.editing = Some(service.id);
        self.form = ServiceForm::from_service(service);
        self.errors = FormErrors::default();
        self.modal_open = true;
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
        self.editing = None;
        self.errors = FormErrors::default();
    }

    pub fn apply_input(&mut self, input: ServiceInput) {
        let field = self.form.apply(input);
        self.errors.clear(field);
    }
}

pub struct ServicesController<'a, A, N> {
    api: &'a A,
    notifier: &'a N,
}

impl<'a, A, N> ServicesController<'a, A, N>
where
    A: AgendaApi,
    N: Notifier,
{
    pub fn new(api: &'a A, notifier: &'a N) -> Self {
        Self { api, notifier }
    }

    pub async fn load(&self) -> Result<Vec<Service>, String> {
        self.api.list_services().await.map_err(|error| {
            let message = error.user_message();
            self.notifier.error(format!("Failed to load services: {}", message));
            message
        })
    }

    /// Create or update a service, then reload the catalog
    pub async fn save(
        &self,
        form: &ServiceForm,
        editing: Option<ServiceId>,
    ) -> SubmitOutcome<ServiceField, Option<Vec<Service>>> {
        let payload = match form.validate() {
            Ok(payload) => payload,
            Err(errors) => {
                self.notifier.error(INVALID_FORM_MESSAGE);
                return SubmitOutcome::Invalid(errors);
            }
        };

        let result = match editing {
            Some(id) => self.api.update_service(id, &payload).await,
            None => self.api.create_service(&payload).await,
        };

        match result {
            Ok(_) => {
                self.notifier.success(if editing.is_some() {
                    "Service updated successfully!"
                } else {
                    "Service created successfully!"
                });
                SubmitOutcome::Saved(self.load().await.ok())
            }
            Err(error) => {
                let message = error.user_message();
                self.notifier.error(format!("Failed to save service: {}", message));
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Delete a service and return the catalog afterwards. Nothing changes on failure.
    pub async fn delete(&self, id: ServiceId, current: &[Service]) -> Result<Vec<Service>, String> {
        if let Err(error) = self.api.delete_service(id).await {
            let message = error.user_message();
            self.notifier.error(format!("Failed to delete service: {}", message));
            return Err(message);
        }

        self.notifier.success("Service deleted successfully!");

        match self.load().await {
            Ok(services) => Ok(services),
            Err(_) => Ok(current.iter().filter(|s| s.id != id).cloned().collect()),
        }
    }
}
