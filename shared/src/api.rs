//! The REST boundary: endpoints, the response envelope, errors and the
//! [`AgendaApi`] trait the views are written against.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    format::format_date_iso, Booking, BookingFilter, BookingId, BookingPayload, MonthCursor,
    Profile, ProfileUpdate, Service, ServiceId, ServicePayload,
};

/// Shown when the request never got an answer from the server
pub const GENERIC_TRANSPORT_MESSAGE: &str = "Network error, please check your connection and try again";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request did not complete (offline, DNS, CORS, aborted)
    #[error("Network error: {0}")]
    Transport(String),
    /// Non-2xx status; `message` is taken from the body when present
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },
    /// 2xx status but the body reported `success: false`
    #[error("{0}")]
    Rejected(String),
    #[error("Failed to encode request: {0}")]
    Encode(String),
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Response did not include any data")]
    MissingData,
}

impl ApiError {
    /// Message for a toast: the server's own words when it sent any,
    /// otherwise a generic explanation
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => GENERIC_TRANSPORT_MESSAGE.to_string(),
            ApiError::Server { status, message } => {
                if message.trim().is_empty() {
                    format!("Request failed with status {}", status)
                } else {
                    message.clone()
                }
            }
            ApiError::Rejected(message) => message.clone(),
            ApiError::Encode(_) => "Could not prepare the request".to_string(),
            ApiError::Decode(_) | ApiError::MissingData => {
                "Unexpected response from the server".to_string()
            }
        }
    }
}

/// `{ success, data, error, message }` wrapper around every JSON response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload of a successful response
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(self.failure_message()));
        }
        self.data.ok_or(ApiError::MissingData)
    }

    /// Accept a successful response that carries no payload
    pub fn into_ack(self) -> Result<Option<String>, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(self.failure_message()));
        }
        Ok(self.message)
    }

    fn failure_message(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "The server rejected the request".to_string())
    }
}

/// Body of `POST /profile/avatar`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarUploadResponse {
    #[serde(default)]
    pub success: bool,
    pub avatar_url: Option<String>,
    pub error: Option<String>,
}

impl AvatarUploadResponse {
    pub fn into_url(self) -> Result<String, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(
                self.error.unwrap_or_else(|| "Avatar upload failed".to_string()),
            ));
        }
        self.avatar_url.ok_or(ApiError::MissingData)
    }
}

/// One open slot from the available-times endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSlot(#[serde(with = "crate::format::hhmm")] pub NaiveTime);

/// Payload of `GET /bookings/calendar/{month}/{year}`
pub type CalendarBookings = BTreeMap<NaiveDate, Vec<Booking>>;

/// Flatten the date-keyed calendar payload into a single list
pub fn flatten_calendar(calendar: CalendarBookings) -> Vec<Booking> {
    calendar.into_values().flatten().collect()
}

/// Build an [`ApiError`] from a non-2xx response body
pub fn error_from_body(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.error.or(envelope.message))
        .unwrap_or_else(|| {
            let text = body.trim();
            // HTML error pages are not worth showing
            if text.starts_with('<') {
                String::new()
            } else {
                text.to_string()
            }
        });

    ApiError::Server { status, message }
}

/// Resource paths, relative to the API base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Profile,
    ProfileAvatar,
    Services,
    Service(ServiceId),
    Bookings,
    Booking(BookingId),
    MonthBookings(MonthCursor),
    AvailableTimes { date: NaiveDate, service_id: ServiceId },
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Endpoint::Profile => "/profile".to_string(),
            Endpoint::ProfileAvatar => "/profile/avatar".to_string(),
            Endpoint::Services => "/services".to_string(),
            Endpoint::Service(id) => format!("/services/{}", id),
            Endpoint::Bookings => "/bookings".to_string(),
            Endpoint::Booking(id) => format!("/bookings/{}", id),
            Endpoint::MonthBookings(month) => {
                format!("/bookings/calendar/{}/{}", month.month(), month.year())
            }
            Endpoint::AvailableTimes { date, service_id } => {
                format!("/bookings/available-times/{}/{}", format_date_iso(*date), service_id)
            }
        }
    }

    /// Absolute URL under `base_url`, tolerating a trailing slash
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

/// Every call the client makes to the booking backend.
///
/// The browser implementation lives in the frontend crate; tests use an
/// in-memory fake. `Upload` is whatever the platform uses to hand over an
/// avatar file.
#[async_trait(?Send)]
pub trait AgendaApi {
    type Upload;

    async fn get_profile(&self) -> Result<Profile, ApiError>;

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, ApiError>;

    /// Multipart upload; returns the new avatar URL
    async fn upload_avatar(&self, file: Self::Upload) -> Result<String, ApiError>;

    async fn list_services(&self) -> Result<Vec<Service>, ApiError>;

    async fn get_service(&self, id: ServiceId) -> Result<Service, ApiError>;

    async fn create_service(&self, payload: &ServicePayload) -> Result<Service, ApiError>;

    async fn update_service(&self, id: ServiceId, payload: &ServicePayload) -> Result<Service, ApiError>;

    async fn delete_service(&self, id: ServiceId) -> Result<(), ApiError>;

    async fn list_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>, ApiError>;

    /// Bookings of one month, flattened from the calendar endpoint
    async fn list_month_bookings(&self, month: MonthCursor) -> Result<Vec<Booking>, ApiError>;

    async fn available_times(&self, date: NaiveDate, service_id: ServiceId) -> Result<Vec<NaiveTime>, ApiError>;

    async fn create_booking(&self, payload: &BookingPayload) -> Result<Booking, ApiError>;

    async fn update_booking(&self, id: BookingId, payload: &BookingPayload) -> Result<Booking, ApiError>;

    async fn cancel_booking(&self, id: BookingId) -> Result<(), ApiError>;
}
