//! Client-side form validation.
//!
//! Forms hold the raw text of their inputs. `validate` either produces the
//! typed request body or a [`FormErrors`] map keyed by field, in which case
//! nothing is sent to the backend.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::format::{format_date_iso, format_time, parse_date, parse_time};
use crate::{Booking, BookingPayload, Profile, ProfileUpdate, Service, ServiceId, ServicePayload};

/// Shown as a toast when a submit is blocked by validation
pub const INVALID_FORM_MESSAGE: &str = "Please fix the errors in the form";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{0} must be a number greater than zero")]
    NotPositive(&'static str),
    #[error("{0} must be a valid amount")]
    InvalidAmount(&'static str),
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Invalid date, expected YYYY-MM-DD")]
    InvalidDate,
    #[error("Invalid time, expected HH:MM")]
    InvalidTime,
    #[error("Select a service from the list")]
    UnknownService,
}

/// Field-level errors of one form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormErrors<F: Ord> {
    errors: BTreeMap<F, FieldError>,
}

impl<F: Ord> Default for FormErrors<F> {
    fn default() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> FormErrors<F> {
    pub fn insert(&mut self, field: F, error: FieldError) {
        self.errors.insert(field, error);
    }

    pub fn get(&self, field: F) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Display text for the error on `field`, if any
    pub fn message(&self, field: F) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    /// Forget the error on `field`, done as soon as the user edits it
    pub fn clear(&mut self, field: F) {
        self.errors.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &FieldError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }
}

fn required(value: &str, label: &'static str) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FieldError::Required(label))
    } else {
        Ok(trimmed.to_string())
    }
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ServiceField {
    Name,
    Duration,
    Price,
    Description,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceInput {
    Name(String),
    Duration(String),
    Price(String),
    Description(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceForm {
    pub name: String,
    pub duration_minutes: String,
    pub price: String,
    pub description: String,
}

impl ServiceForm {
    /// Form prefilled for editing an existing service
    pub fn from_service(service: &Service) -> Self {
        Self {
            name: service.name.clone(),
            duration_minutes: service.duration_minutes.to_string(),
            price: service.price.to_string(),
            description: service.description.clone().unwrap_or_default(),
        }
    }

    /// Store one edited input, returning the field it belongs to
    pub fn apply(&mut self, input: ServiceInput) -> ServiceField {
        match input {
            ServiceInput::Name(value) => {
                self.name = value;
                ServiceField::Name
            }
            ServiceInput::Duration(value) => {
                self.duration_minutes = value;
                ServiceField::Duration
            }
            ServiceInput::Price(value) => {
                self.price = value;
                ServiceField::Price
            }
            ServiceInput::Description(value) => {
                self.description = value;
                ServiceField::Description
            }
        }
    }

    pub fn validate(&self) -> Result<ServicePayload, FormErrors<ServiceField>> {
        let mut errors = FormErrors::default();

        let name = required(&self.name, "Service name")
            .map_err(|e| errors.insert(ServiceField::Name, e))
            .ok();

        let duration = required(&self.duration_minutes, "Duration")
            .and_then(|raw| parse_duration(&raw))
            .map_err(|e| errors.insert(ServiceField::Duration, e))
            .ok();

        let price = required(&self.price, "Price")
            .and_then(|raw| parse_price(&raw))
            .map_err(|e| errors.insert(ServiceField::Price, e))
            .ok();

        match (name, duration, price) {
            (Some(name), Some(duration_minutes), Some(price)) if errors.is_empty() => Ok(ServicePayload {
                name,
                duration_minutes,
                price,
                description: self.description.trim().to_string(),
            }),
            _ => Err(errors),
        }
    }
}

/// Whole minutes, strictly positive
fn parse_duration(raw: &str) -> Result<u32, FieldError> {
    raw.parse::<i64>()
        .ok()
        .filter(|minutes| *minutes > 0)
        .and_then(|minutes| u32::try_from(minutes).ok())
        .ok_or(FieldError::NotPositive("Duration"))
}

/// Non-negative amount; a decimal comma is accepted
fn parse_price(raw: &str) -> Result<f64, FieldError> {
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite() && *price >= 0.0)
        .ok_or(FieldError::InvalidAmount("Price"))
}

// ---------------------------------------------------------------------------
// Bookings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BookingField {
    Service,
    Date,
    Time,
    ClientName,
    ClientContact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingInput {
    Service(String),
    Date(String),
    Time(String),
    ClientName(String),
    ClientContact(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    /// Selected service id as it comes from the `<select>`
    pub service_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub client_name: String,
    pub client_contact: String,
}

impl BookingForm {
    /// Blank form, with the date prefilled when a day is selected
    pub fn for_date(date: Option<NaiveDate>) -> Self {
        Self {
            date: date.map(format_date_iso).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Form prefilled for editing an existing booking
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            service_id: booking.service_id.to_string(),
            date: format_date_iso(booking.date),
            time: format_time(booking.time),
            client_name: booking.client_name.clone(),
            client_contact: booking.client_contact.clone(),
        }
    }

    pub fn apply(&mut self, input: BookingInput) -> BookingField {
        match input {
            BookingInput::Service(value) => {
                self.service_id = value;
                BookingField::Service
            }
            BookingInput::Date(value) => {
                self.date = value;
                BookingField::Date
            }
            BookingInput::Time(value) => {
                self.time = value;
                BookingField::Time
            }
            BookingInput::ClientName(value) => {
                self.client_name = value;
                BookingField::ClientName
            }
            BookingInput::ClientContact(value) => {
                self.client_contact = value;
                BookingField::ClientContact
            }
        }
    }

    /// Date and service to ask open slots for, once both are chosen
    pub fn slot_query(&self) -> Option<(NaiveDate, ServiceId)> {
        let date = parse_date(&self.date)?;
        let service_id = self.service_id.trim().parse().ok()?;
        Some((date, service_id))
    }

    pub fn validate(&self) -> Result<BookingPayload, FormErrors<BookingField>> {
        let mut errors = FormErrors::default();

        let service_id = required(&self.service_id, "Service")
            .and_then(|raw| raw.parse::<ServiceId>().map_err(|_| FieldError::UnknownService))
            .map_err(|e| errors.insert(BookingField::Service, e))
            .ok();

        let date = required(&self.date, "Date")
            .and_then(|raw| parse_date(&raw).ok_or(FieldError::InvalidDate))
            .map_err(|e| errors.insert(BookingField::Date, e))
            .ok();

        let time = required(&self.time, "Time")
            .and_then(|raw| parse_time(&raw).ok_or(FieldError::InvalidTime))
            .map_err(|e| errors.insert(BookingField::Time, e))
            .ok();

        let client_name = required(&self.client_name, "Client name")
            .map_err(|e| errors.insert(BookingField::ClientName, e))
            .ok();

        let client_contact = required(&self.client_contact, "Client contact")
            .map_err(|e| errors.insert(BookingField::ClientContact, e))
            .ok();

        match (service_id, date, time, client_name, client_contact) {
            (Some(service_id), Some(date), Some(time), Some(client_name), Some(client_contact)) => {
                Ok(BookingPayload {
                    service_id,
                    date,
                    time,
                    client_name,
                    client_contact,
                })
            }
            _ => Err(errors),
        }
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileField {
    FullName,
    ClinicName,
    Email,
    Phone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileInput {
    FullName(String),
    ClinicName(String),
    Email(String),
    Phone(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub full_name: String,
    pub clinic_name: String,
    pub email: String,
    pub phone: String,
}

impl ProfileForm {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            full_name: profile.full_name.clone(),
            clinic_name: profile.clinic_name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
        }
    }

    pub fn apply(&mut self, input: ProfileInput) -> ProfileField {
        match input {
            ProfileInput::FullName(value) => {
                self.full_name = value;
                ProfileField::FullName
            }
            ProfileInput::ClinicName(value) => {
                self.clinic_name = value;
                ProfileField::ClinicName
            }
            ProfileInput::Email(value) => {
                self.email = value;
                ProfileField::Email
            }
            ProfileInput::Phone(value) => {
                self.phone = value;
                ProfileField::Phone
            }
        }
    }

    pub fn validate(&self) -> Result<ProfileUpdate, FormErrors<ProfileField>> {
        let mut errors = FormErrors::default();

        let full_name = required(&self.full_name, "Full name")
            .map_err(|e| errors.insert(ProfileField::FullName, e))
            .ok();

        let clinic_name = required(&self.clinic_name, "Clinic name")
            .map_err(|e| errors.insert(ProfileField::ClinicName, e))
            .ok();

        let email = required(&self.email, "Email")
            .and_then(|raw| {
                if EMAIL_PATTERN.is_match(&raw) {
                    Ok(raw)
                } else {
                    Err(FieldError::InvalidEmail)
                }
            })
            .map_err(|e| errors.insert(ProfileField::Email, e))
            .ok();

        let phone = required(&self.phone, "Phone")
            .map_err(|e| errors.insert(ProfileField::Phone, e))
            .ok();

        match (full_name, clinic_name, email, phone) {
            (Some(full_name), Some(clinic_name), Some(email), Some(phone)) => Ok(ProfileUpdate {
                full_name,
                clinic_name,
                email,
                phone,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvatarError {
    #[error("Please select an image file")]
    NotAnImage,
    #[error("The image must be at most {max_mb}MB")]
    TooLarge { max_mb: u64 },
}

/// Check a picked avatar file before it is uploaded
pub fn validate_avatar(mime_type: &str, size_bytes: u64, max_bytes: u64) -> Result<(), AvatarError> {
    if !mime_type.starts_with("image/") {
        return Err(AvatarError::NotAnImage);
    }
    if size_bytes > max_bytes {
        return Err(AvatarError::TooLarge {
            max_mb: max_bytes / (1024 * 1024),
        });
    }
    Ok(())
}
