//! Types and client-side logic shared by the agenda web client.
//!
//! Everything in this crate is platform independent: the browser-specific
//! pieces (HTTP transport, timers, rendering) live in the frontend crate and
//! plug in through [`AgendaApi`] and [`views::Notifier`].

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub mod api;
pub mod booking_index;
pub mod calendar;
pub mod config;
pub mod format;
pub mod request;
pub mod toast;
pub mod validation;
pub mod views;

pub use api::{AgendaApi, ApiEnvelope, ApiError, AvatarUploadResponse, Endpoint, TimeSlot};
pub use booking_index::{bookings_on, has_bookings_on, BookingDayIndex};
pub use calendar::{build_month_grid, CalendarCell, CalendarError, MonthCursor, MonthGrid};
pub use config::ClientConfig;
pub use request::{RequestGate, RequestTicket, RequestTracker, TrackedApi};
pub use toast::{Toast, ToastId, ToastKind, ToastQueue};

pub type ServiceId = u64;
pub type BookingId = u64;

/// A service offered by the professional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    /// Length of one appointment, always greater than zero
    pub duration_minutes: u32,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body sent when creating or updating a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePayload {
    pub name: String,
    pub duration_minutes: u32,
    pub price: f64,
    pub description: String,
}

/// Lifecycle of a booking as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    #[serde(other)]
    Other,
}

/// A client appointment on a given date and time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub service_id: ServiceId,
    /// Calendar date, never converted between time zones
    #[serde(alias = "appointment_date")]
    pub date: NaiveDate,
    /// Wall clock start time with minute precision
    #[serde(alias = "appointment_time", with = "format::hhmm")]
    pub time: NaiveTime,
    pub client_name: String,
    /// Free-text phone number or email address
    pub client_contact: String,
    #[serde(default)]
    pub status: BookingStatus,
}

impl Booking {
    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }
}

/// Body sent when creating or updating a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingPayload {
    pub service_id: ServiceId,
    pub date: NaiveDate,
    #[serde(with = "format::hhmm")]
    pub time: NaiveTime,
    pub client_name: String,
    pub client_contact: String,
}

/// Optional filters for the booking list endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    /// Filter covering every day of `month`
    pub fn for_month(month: MonthCursor) -> Self {
        Self {
            start_date: Some(month.first_day()),
            end_date: Some(month.last_day()),
            status: None,
        }
    }

    /// Query string pairs, omitting unset filters
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = self.start_date {
            pairs.push(("start_date", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("end_date", end.format("%Y-%m-%d").to_string()));
        }
        if let Some(status) = self.status {
            let value = serde_json::to_value(status)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string));
            if let Some(value) = value {
                pairs.push(("status", value));
            }
        }
        pairs
    }
}

/// The professional's profile (one per account)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub clinic_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Body sent when updating the profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub clinic_name: String,
    pub email: String,
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_booking_accepts_backend_field_names() {
        let booking: Booking = serde_json::from_value(json!({
            "id": 12,
            "service_id": 3,
            "appointment_date": "2024-06-10",
            "appointment_time": "09:00:00",
            "client_name": "Ana",
            "client_contact": "ana@x.com",
            "status": "scheduled"
        }))
        .unwrap();

        assert_eq!(booking.date, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert_eq!(booking.time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(booking.status, BookingStatus::Scheduled);
    }

    #[test]
    fn test_booking_status_defaults_and_unknown_values() {
        let booking: Booking = serde_json::from_value(json!({
            "id": 1,
            "service_id": 1,
            "date": "2024-06-10",
            "time": "14:30",
            "client_name": "Bia",
            "client_contact": "+55 11 99999-0000"
        }))
        .unwrap();
        assert_eq!(booking.status, BookingStatus::Scheduled);

        let status: BookingStatus = serde_json::from_value(json!("no_show")).unwrap();
        assert_eq!(status, BookingStatus::Other);
    }

    #[test]
    fn test_service_description_is_optional() {
        let service: Service = serde_json::from_value(json!({
            "id": 4,
            "name": "Limpeza de pele",
            "duration_minutes": 60,
            "price": 150.0,
            "created_at": "2024-01-01T10:00:00"
        }))
        .unwrap();
        assert_eq!(service.description, None);
        assert_eq!(service.duration_minutes, 60);
    }

    #[test]
    fn test_booking_filter_query_pairs() {
        let month = MonthCursor::new(2024, 2).unwrap();
        let mut filter = BookingFilter::for_month(month);
        filter.status = Some(BookingStatus::Cancelled);

        assert_eq!(
            filter.query_pairs(),
            vec![
                ("start_date", "2024-02-01".to_string()),
                ("end_date", "2024-02-29".to_string()),
                ("status", "cancelled".to_string()),
            ]
        );
        assert!(BookingFilter::default().query_pairs().is_empty());
    }

    #[test]
    fn test_profile_tolerates_missing_fields() {
        let profile: Profile = serde_json::from_value(json!({ "full_name": "Dra. Ana" })).unwrap();
        assert_eq!(profile.full_name, "Dra. Ana");
        assert!(profile.email.is_empty());
        assert_eq!(profile.avatar_url, None);
    }
}
