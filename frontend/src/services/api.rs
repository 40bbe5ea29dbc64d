use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::api::{error_from_body, flatten_calendar, CalendarBookings};
use shared::{
    AgendaApi, ApiEnvelope, ApiError, AvatarUploadResponse, Booking, BookingFilter, BookingId, BookingPayload,
    ClientConfig, Endpoint, MonthCursor, Profile, ProfileUpdate, Service, ServiceId, ServicePayload, TimeSlot,
};
use web_sys::{File, FormData};

use super::config::client_config;

/// API client for communicating with the booking backend
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the configured base URL
    pub fn new() -> Self {
        Self::from_config(&client_config())
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self::from_config(&ClientConfig::with_base_url(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        endpoint.url(&self.base_url)
    }

    async fn send(request: Result<Request, gloo::net::Error>) -> Result<Response, ApiError> {
        let request = request.map_err(|e| ApiError::Encode(e.to_string()))?;
        request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    async fn send_builder(builder: RequestBuilder) -> Result<Response, ApiError> {
        builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    /// Read a body, turning non-2xx statuses into errors carrying the server's message
    async fn read_body<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let ok = response.ok();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        if !ok {
            return Err(error_from_body(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        let response = Self::send_builder(Request::get(&self.url(endpoint))).await?;
        Self::read_body::<ApiEnvelope<T>>(response).await?.into_data()
    }

    async fn send_json<B, T>(&self, builder: RequestBuilder, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = Self::send(builder.json(body)).await?;
        Self::read_body::<ApiEnvelope<T>>(response).await?.into_data()
    }

    async fn delete(&self, endpoint: Endpoint) -> Result<(), ApiError> {
        let response = Self::send_builder(Request::delete(&self.url(endpoint))).await?;
        Self::read_body::<ApiEnvelope<serde_json::Value>>(response)
            .await?
            .into_ack()
            .map(|_| ())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl AgendaApi for ApiClient {
    type Upload = File;

    async fn get_profile(&self) -> Result<Profile, ApiError> {
        self.get(Endpoint::Profile).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, ApiError> {
        self.send_json(Request::put(&self.url(Endpoint::Profile)), update).await
    }

    async fn upload_avatar(&self, file: File) -> Result<String, ApiError> {
        let form = FormData::new().map_err(|e| ApiError::Encode(format!("{:?}", e)))?;
        form.append_with_blob("avatar", &file)
            .map_err(|e| ApiError::Encode(format!("{:?}", e)))?;

        // The browser sets the multipart boundary itself
        let response = Self::send(Request::post(&self.url(Endpoint::ProfileAvatar)).body(form)).await?;
        Self::read_body::<AvatarUploadResponse>(response).await?.into_url()
    }

    async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
        self.get(Endpoint::Services).await
    }

    async fn get_service(&self, id: ServiceId) -> Result<Service, ApiError> {
        self.get(Endpoint::Service(id)).await
    }

    async fn create_service(&self, payload: &ServicePayload) -> Result<Service, ApiError> {
        self.send_json(Request::post(&self.url(Endpoint::Services)), payload).await
    }

    async fn update_service(&self, id: ServiceId, payload: &ServicePayload) -> Result<Service, ApiError> {
        self.send_json(Request::put(&self.url(Endpoint::Service(id))), payload).await
    }

    async fn delete_service(&self, id: ServiceId) -> Result<(), ApiError> {
        self.delete(Endpoint::Service(id)).await
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>, ApiError> {
        let pairs = filter.query_pairs();
        let builder = Request::get(&self.url(Endpoint::Bookings))
            .query(pairs.iter().map(|(key, value)| (*key, value.as_str())));
        let response = Self::send_builder(builder).await?;
        Self::read_body::<ApiEnvelope<Vec<Booking>>>(response).await?.into_data()
    }

    async fn list_month_bookings(&self, month: MonthCursor) -> Result<Vec<Booking>, ApiError> {
        let calendar: CalendarBookings = self.get(Endpoint::MonthBookings(month)).await?;
        Ok(flatten_calendar(calendar))
    }

    async fn available_times(&self, date: NaiveDate, service_id: ServiceId) -> Result<Vec<NaiveTime>, ApiError> {
        let slots: Vec<TimeSlot> = self.get(Endpoint::AvailableTimes { date, service_id }).await?;
        Ok(slots.into_iter().map(|slot| slot.0).collect())
    }

    async fn create_booking(&self, payload: &BookingPayload) -> Result<Booking, ApiError> {
        self.send_json(Request::post(&self.url(Endpoint::Bookings)), payload).await
    }

    async fn update_booking(&self, id: BookingId, payload: &BookingPayload) -> Result<Booking, ApiError> {
        self.send_json(Request::put(&self.url(Endpoint::Booking(id))), payload).await
    }

    async fn cancel_booking(&self, id: BookingId) -> Result<(), ApiError> {
        self.delete(Endpoint::Booking(id)).await
    }
}
