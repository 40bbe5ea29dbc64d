//! Per-view state and the async flows behind each page.
//!
//! Every page owns one state object and drives one controller. Controllers
//! borrow an [`AgendaApi`](crate::AgendaApi) and a [`Notifier`], run a whole
//! user action (validate, call, notify, reload) and hand back an outcome the
//! page folds into its state. They never hold on to page state across an
//! await point.

pub mod bookings;
pub mod profile;
pub mod services;

pub use bookings::{leave_month, supersede_month, BookingsController, BookingsGate, BookingsLoad, BookingsState};
pub use profile::{ProfileController, ProfileState, SavedProfile};
pub use services::{ServicesController, ServicesState};

use crate::toast::ToastKind;
use crate::validation::FormErrors;

/// Sink for user-facing notifications
pub trait Notifier {
    fn notify(&self, kind: ToastKind, message: String);

    fn success(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(ToastKind::Success, message.into());
    }

    fn error(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(ToastKind::Error, message.into());
    }
}

/// Result of submitting a form
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<F: Ord, T> {
    /// Blocked before any request was made
    Invalid(FormErrors<F>),
    /// The backend refused or could not be reached; carries the toast text
    Failed(String),
    Saved(T),
}

impl<F: Ord, T> SubmitOutcome<F, T> {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved(_))
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! Recording in-memory backend for controller tests.

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveTime};
    use serde::Serialize;
    use serde_json::Value;

    use super::Notifier;
    use crate::api::Endpoint;
    use crate::toast::ToastKind;
    use crate::{
        AgendaApi, ApiError, Booking, BookingFilter, BookingId, BookingPayload, BookingStatus,
        MonthCursor, Profile, ProfileUpdate, Service, ServiceId, ServicePayload,
    };

    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedCall {
        pub method: &'static str,
        pub path: String,
        pub body: Option<Value>,
    }

    #[derive(Default)]
    pub struct FakeApi {
        pub calls: RefCell<Vec<RecordedCall>>,
        pub services: RefCell<Vec<Service>>,
        pub bookings: RefCell<Vec<Booking>>,
        pub profile: RefCell<Profile>,
        pub slots: RefCell<Vec<NaiveTime>>,
        /// Scripted outcomes for upcoming calls; `None` lets a call through
        outcomes: RefCell<VecDeque<Option<ApiError>>>,
    }

    impl FakeApi {
        /// Fail the next unscripted call with `error`
        pub fn fail_next(&self, error: ApiError) {
            self.outcomes.borrow_mut().push_back(Some(error));
        }

        /// Let the next unscripted call through, so a later one can fail
        pub fn succeed_next(&self) {
            self.outcomes.borrow_mut().push_back(None);
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.borrow().clone()
        }

        pub fn paths(&self) -> Vec<String> {
            self.calls
                .borrow()
                .iter()
                .map(|call| format!("{} {}", call.method, call.path))
                .collect()
        }

        fn record<B: Serialize>(&self, method: &'static str, path: String, body: Option<&B>) -> Result<(), ApiError> {
            let body = body.and_then(|b| serde_json::to_value(b).ok());
            self.calls.borrow_mut().push(RecordedCall { method, path, body });
            match self.outcomes.borrow_mut().pop_front() {
                Some(Some(error)) => Err(error),
                _ => Ok(()),
            }
        }

        fn record_empty(&self, method: &'static str, endpoint: Endpoint) -> Result<(), ApiError> {
            self.record::<Value>(method, endpoint.path(), None)
        }

        fn not_found(what: &str) -> ApiError {
            ApiError::Server {
                status: 404,
                message: format!("{} não encontrado", what),
            }
        }
    }

    #[async_trait(?Send)]
    impl AgendaApi for FakeApi {
        /// File name of the picked avatar
        type Upload = String;

        async fn get_profile(&self) -> Result<Profile, ApiError> {
            self.record_empty("GET", Endpoint::Profile)?;
            Ok(self.profile.borrow().clone())
        }

        async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, ApiError> {
            self.record("PUT", Endpoint::Profile.path(), Some(update))?;
            let mut profile = self.profile.borrow_mut();
            profile.full_name = update.full_name.clone();
            profile.clinic_name = update.clinic_name.clone();
            profile.email = update.email.clone();
            profile.phone = update.phone.clone();
            Ok(profile.clone())
        }

        async fn upload_avatar(&self, file: String) -> Result<String, ApiError> {
            self.record("POST", Endpoint::ProfileAvatar.path(), Some(&file))?;
            let url = format!("/uploads/{}", file);
            self.profile.borrow_mut().avatar_url = Some(url.clone());
            Ok(url)
        }

        async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
            self.record_empty("GET", Endpoint::Services)?;
            Ok(self.services.borrow().clone())
        }

        async fn get_service(&self, id: ServiceId) -> Result<Service, ApiError> {
            self.record_empty("GET", Endpoint::Service(id))?;
            self.services
                .borrow()
                .iter()
                .find(|s| s.id == id)
                .cloned()
                .ok_or_else(|| Self::not_found("Serviço"))
        }

        async fn create_service(&self, payload: &ServicePayload) -> Result<Service, ApiError> {
            self.record("POST", Endpoint::Services.path(), Some(payload))?;
            let mut services = self.services.borrow_mut();
            let service = Service {
                id: services.iter().map(|s| s.id).max().unwrap_or(0) + 1,
                name: payload.name.clone(),
                duration_minutes: payload.duration_minutes,
                price: payload.price,
                description: Some(payload.description.clone()),
            };
            services.push(service.clone());
            Ok(service)
        }

        async fn update_service(&self, id: ServiceId, payload: &ServicePayload) -> Result<Service, ApiError> {
            self.record("PUT", Endpoint::Service(id).path(), Some(payload))?;
            let mut services = self.services.borrow_mut();
            let service = services
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| Self::not_found("Serviço"))?;
            service.name = payload.name.clone();
            service.duration_minutes = payload.duration_minutes;
            service.price = payload.price;
            service.description = Some(payload.description.clone());
            Ok(service.clone())
        }

        async fn delete_service(&self, id: ServiceId) -> Result<(), ApiError> {
            self.record_empty("DELETE", Endpoint::Service(id))?;
            self.services.borrow_mut().retain(|s| s.id != id);
            Ok(())
        }

        async fn list_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>, ApiError> {
            let query: Vec<String> = filter
                .query_pairs()
                .into_iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect();
            let mut path = Endpoint::Bookings.path();
            if !query.is_empty() {
                path = format!("{}?{}", path, query.join("&"));
            }
            self.record::<Value>("GET", path, None)?;

            Ok(self
                .bookings
                .borrow()
                .iter()
                .filter(|b| filter.start_date.map_or(true, |start| b.date >= start))
                .filter(|b| filter.end_date.map_or(true, |end| b.date <= end))
                .filter(|b| filter.status.map_or(true, |status| b.status == status))
                .cloned()
                .collect())
        }

        async fn list_month_bookings(&self, month: MonthCursor) -> Result<Vec<Booking>, ApiError> {
            self.record_empty("GET", Endpoint::MonthBookings(month))?;
            Ok(self
                .bookings
                .borrow()
                .iter()
                .filter(|b| month.contains(b.date))
                .cloned()
                .collect())
        }

        async fn available_times(&self, date: NaiveDate, service_id: ServiceId) -> Result<Vec<NaiveTime>, ApiError> {
            self.record_empty("GET", Endpoint::AvailableTimes { date, service_id })?;
            Ok(self.slots.borrow().clone())
        }

        async fn create_booking(&self, payload: &BookingPayload) -> Result<Booking, ApiError> {
            self.record("POST", Endpoint::Bookings.path(), Some(payload))?;
            let mut bookings = self.bookings.borrow_mut();
            let booking = Booking {
                id: bookings.iter().map(|b| b.id).max().unwrap_or(0) + 1,
                service_id: payload.service_id,
                date: payload.date,
                time: payload.time,
                client_name: payload.client_name.clone(),
                client_contact: payload.client_contact.clone(),
                status: BookingStatus::Scheduled,
            };
            bookings.push(booking.clone());
            Ok(booking)
        }

        async fn update_booking(&self, id: BookingId, payload: &BookingPayload) -> Result<Booking, ApiError> {
            self.record("PUT", Endpoint::Booking(id).path(), Some(payload))?;
            let mut bookings = self.bookings.borrow_mut();
            let booking = bookings
                .iter_mut()
                .find(|b| b.id == id)
                .ok_or_else(|| Self::not_found("Agendamento"))?;
            booking.service_id = payload.service_id;
            booking.date = payload.date;
            booking.time = payload.time;
            booking.client_name = payload.client_name.clone();
            booking.client_contact = payload.client_contact.clone();
            Ok(booking.clone())
        }

        async fn cancel_booking(&self, id: BookingId) -> Result<(), ApiError> {
            self.record_empty("DELETE", Endpoint::Booking(id))?;
            let mut bookings = self.bookings.borrow_mut();
            let booking = bookings
                .iter_mut()
                .find(|b| b.id == id)
                .ok_or_else(|| Self::not_found("Agendamento"))?;
            booking.status = BookingStatus::Cancelled;
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct FakeNotifier {
        pub toasts: RefCell<Vec<(ToastKind, String)>>,
    }

    impl FakeNotifier {
        pub fn messages(&self) -> Vec<(ToastKind, String)> {
            self.toasts.borrow().clone()
        }

        pub fn last(&self) -> Option<(ToastKind, String)> {
            self.toasts.borrow().last().cloned()
        }
    }

    impl Notifier for FakeNotifier {
        fn notify(&self, kind: ToastKind, message: String) {
            self.toasts.borrow_mut().push((kind, message));
        }
    }

    pub fn service(id: ServiceId, name: &str, duration_minutes: u32, price: f64) -> Service {
        Service {
            id,
            name: name.to_string(),
            duration_minutes,
            price,
            description: None,
        }
    }

    pub fn booking(id: BookingId, service_id: ServiceId, date: &str, time: &str, client: &str) -> Booking {
        Booking {
            id,
            service_id,
            date: crate::format::parse_date(date).unwrap(),
            time: crate::format::parse_time(time).unwrap(),
            client_name: client.to_string(),
            client_contact: format!("{}@example.com", client.to_lowercase()),
            status: BookingStatus::Scheduled,
        }
    }
}
