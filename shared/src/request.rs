//! In-flight request bookkeeping.
//!
//! [`RequestTracker`] backs the busy flag and last error of a view.
//! [`TrackedApi`] feeds every call through a tracker. [`RequestGate`] hands out
//! tickets per resource key so a response that was superseded by a newer
//! request for the same key is dropped instead of overwriting fresher state.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

use crate::{
    AgendaApi, ApiError, Booking, BookingFilter, BookingId, BookingPayload, MonthCursor, Profile,
    ProfileUpdate, Service, ServiceId, ServicePayload,
};

/// Proof that a call was started; consumed by [`RequestTracker::finish`]
#[derive(Debug)]
#[must_use]
pub struct CallHandle(u64);

/// Busy flag and last error for a group of calls
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RequestTracker {
    in_flight: usize,
    started: u64,
    last_error: Option<String>,
}

impl RequestTracker {
    pub fn start(&mut self) -> CallHandle {
        self.in_flight += 1;
        self.started += 1;
        self.last_error = None;
        CallHandle(self.started)
    }

    /// Settle one call. Success passes the payload through, failure yields
    /// the normalized message, which is also kept as the last error.
    pub fn finish<T>(&mut self, handle: CallHandle, result: Result<T, ApiError>) -> Result<T, String> {
        let CallHandle(_) = handle;
        self.in_flight = self.in_flight.saturating_sub(1);
        result.map_err(|error| {
            let message = error.user_message();
            self.last_error = Some(message.clone());
            message
        })
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }
}

/// [`AgendaApi`] wrapper that reports every call to a shared tracker.
///
/// `on_change` runs after the tracker changes (start and finish), which is
/// how the UI learns it has to re-render.
pub struct TrackedApi<A, F> {
    inner: A,
    tracker: Rc<RefCell<RequestTracker>>,
    on_change: F,
}

impl<A, F> TrackedApi<A, F>
where
    A: AgendaApi,
    F: Fn(),
{
    pub fn new(inner: A, tracker: Rc<RefCell<RequestTracker>>, on_change: F) -> Self {
        Self { inner, tracker, on_change }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    async fn track<T, Fut>(&self, call: Fut) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let handle = self.tracker.borrow_mut().start();
        (self.on_change)();

        let result = call.await;

        let failure = result.as_ref().err().cloned();
        let settled = self.tracker.borrow_mut().finish(handle, result);
        (self.on_change)();

        // The tracker keeps the normalized message, callers keep the typed error
        match (settled, failure) {
            (Ok(value), _) => Ok(value),
            (Err(_), Some(error)) => Err(error),
            (Err(message), None) => Err(ApiError::Rejected(message)),
        }
    }
}

#[async_trait(?Send)]
impl<A, F> AgendaApi for TrackedApi<A, F>
where
    A: AgendaApi,
    F: Fn(),
{
    type Upload = A::Upload;

    async fn get_profile(&self) -> Result<Profile, ApiError> {
        self.track(self.inner.get_profile()).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile, ApiError> {
        self.track(self.inner.update_profile(update)).await
    }

    async fn upload_avatar(&self, file: Self::Upload) -> Result<String, ApiError> {
        self.track(self.inner.upload_avatar(file)).await
    }

    async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
        self.track(self.inner.list_services()).await
    }

    async fn get_service(&self, id: ServiceId) -> Result<Service, ApiError> {
        self.track(self.inner.get_service(id)).await
    }

    async fn create_service(&self, payload: &ServicePayload) -> Result<Service, ApiError> {
        self.track(self.inner.create_service(payload)).await
    }

    async fn update_service(&self, id: ServiceId, payload: &ServicePayload) -> Result<Service, ApiError> {
        self.track(self.inner.update_service(id, payload)).await
    }

    async fn delete_service(&self, id: ServiceId) -> Result<(), ApiError> {
        self.track(self.inner.delete_service(id)).await
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>, ApiError> {
        self.track(self.inner.list_bookings(filter)).await
    }

    async fn list_month_bookings(&self, month: MonthCursor) -> Result<Vec<Booking>, ApiError> {
        self.track(self.inner.list_month_bookings(month)).await
    }

    async fn available_times(&self, date: NaiveDate, service_id: ServiceId) -> Result<Vec<NaiveTime>, ApiError> {
        self.track(self.inner.available_times(date, service_id)).await
    }

    async fn create_booking(&self, payload: &BookingPayload) -> Result<Booking, ApiError> {
        self.track(self.inner.create_booking(payload)).await
    }

    async fn update_booking(&self, id: BookingId, payload: &BookingPayload) -> Result<Booking, ApiError> {
        self.track(self.inner.update_booking(id, payload)).await
    }

    async fn cancel_booking(&self, id: BookingId) -> Result<(), ApiError> {
        self.track(self.inner.cancel_booking(id)).await
    }
}

/// Handle for one request issued through a [`RequestGate`]
#[derive(Debug, Clone)]
pub struct RequestTicket<K> {
    key: K,
    generation: u64,
    cancelled: Rc<Cell<bool>>,
}

impl<K> RequestTicket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    /// True once a newer request for the same key was issued, or the key
    /// was cancelled explicitly
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Latest-request-wins bookkeeping per resource key
#[derive(Debug)]
pub struct RequestGate<K> {
    next_generation: u64,
    active: HashMap<K, (u64, Rc<Cell<bool>>)>,
}

impl<K> Default for RequestGate<K> {
    fn default() -> Self {
        Self {
            next_generation: 0,
            active: HashMap::new(),
        }
    }
}

impl<K> RequestGate<K>
where
    K: Eq + Hash + Clone,
{
    /// Start a request for `key`, cancelling the previous one for that key
    pub fn begin(&mut self, key: K) -> RequestTicket<K> {
        self.next_generation += 1;
        let cancelled = Rc::new(Cell::new(false));
        let previous = self
            .active
            .insert(key.clone(), (self.next_generation, Rc::clone(&cancelled)));
        if let Some((_, flag)) = previous {
            flag.set(true);
        }

        RequestTicket {
            key,
            generation: self.next_generation,
            cancelled,
        }
    }

    /// Whether the response for `ticket` may be applied. Accepting settles
    /// the key, so a ticket is accepted at most once.
    pub fn accept(&mut self, ticket: &RequestTicket<K>) -> bool {
        if ticket.is_cancelled() {
            return false;
        }
        match self.active.get(&ticket.key) {
            Some((generation, _)) if *generation == ticket.generation => {
                self.active.remove(&ticket.key);
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self, key: &K) {
        if let Some((_, flag)) = self.active.remove(key) {
            flag.set(true);
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, (_, flag)) in self.active.drain() {
            flag.set(true);
        }
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.active.contains_key(key)
    }
}
