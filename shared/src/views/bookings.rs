//! The bookings page: month calendar, day panel and booking modal.

use std::cell::RefCell;

use chrono::{NaiveDate, NaiveTime};

use super::{Notifier, SubmitOutcome};
use crate::validation::{BookingField, BookingForm, BookingInput, FormErrors, INVALID_FORM_MESSAGE};
use crate::{
    build_month_grid, AgendaApi, ApiError, Booking, BookingDayIndex, BookingId, MonthCursor, MonthGrid,
    RequestGate, RequestTicket, Service, ServiceId,
};

/// Shown in the day panel when a booking points at a service that no longer exists
pub const UNKNOWN_SERVICE_LABEL: &str = "Service not found";

#[derive(Debug, Clone, PartialEq)]
pub struct BookingsState {
    /// Month shown in the calendar
    pub month: MonthCursor,
    pub selected: Option<NaiveDate>,
    /// Non-cancelled bookings of `month`
    pub bookings: Vec<Booking>,
    pub services: Vec<Service>,
    pub modal_open: bool,
    /// Booking being edited, `None` while creating
    pub editing: Option<BookingId>,
    pub form: BookingForm,
    pub errors: FormErrors<BookingField>,
    /// Open slots for the form's service and date
    pub slots: Vec<NaiveTime>,
    /// Booking waiting for the user to confirm its cancellation
    pub pending_cancel: Option<BookingId>,
}

impl BookingsState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            month: MonthCursor::containing(today),
            selected: None,
            bookings: Vec::new(),
            services: Vec::new(),
            modal_open: false,
            editing: None,
            form: BookingForm::default(),
            errors: FormErrors::default(),
            slots: Vec::new(),
            pending_cancel: None,
        }
    }

    pub fn grid(&self) -> MonthGrid {
        build_month_grid(self.month)
    }

    pub fn index(&self) -> BookingDayIndex {
        BookingDayIndex::build(&self.bookings)
    }

    /// Bookings of the selected day, earliest first
    pub fn day_bookings(&self) -> Vec<Booking> {
        self.selected
            .map(|date| crate::bookings_on(&self.bookings, date))
            .unwrap_or_default()
    }

    /// Move the calendar by `months` and clear the selected day
    pub fn navigate(&mut self, months: i32) {
        self.month = self.month.offset(months);
        self.selected = None;
    }

    pub fn select(&mut self, date: NaiveDate) {
        self.selected = Some(date);
    }

    /// Replace the bookings with a freshly loaded month. Ignored when the
    /// user has already moved to another month.
    pub fn apply_month(&mut self, month: MonthCursor, bookings: Vec<Booking>) -> bool {
        if month != self.month {
            return false;
        }
        self.bookings = bookings;
        true
    }

    pub fn service_name(&self, id: ServiceId) -> &str {
        self.services
            .iter()
            .find(|service| service.id == id)
            .map(|service| service.name.as_str())
            .unwrap_or(UNKNOWN_SERVICE_LABEL)
    }

    pub fn open_create(&mut self) {
        self.editing = None;
        self.form = BookingForm::for_date(self.selected);
        self.errors = FormErrors::default();
        self.slots.clear();
        self.modal_open = true;
    }

    pub fn open_edit(&mut self, booking: &Booking) {
        self.editing = Some(booking.id);
        self.form = BookingForm::from_booking(booking);
        self.errors = FormErrors::default();
        self.slots.clear();
        self.modal_open = true;
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
        self.editing = None;
        self.errors = FormErrors::default();
    }

    /// Store one form input and clear its error. Returns the date and service
    /// to fetch slots for when the edit changed either of them.
    pub fn apply_input(&mut self, input: BookingInput) -> Option<(NaiveDate, ServiceId)> {
        let field = self.form.apply(input);
        self.errors.clear(field);
        match field {
            BookingField::Service | BookingField::Date => self.form.slot_query(),
            _ => None,
        }
    }

    /// Slots loaded for `query`; dropped if the form moved on meanwhile
    pub fn apply_slots(&mut self, query: (NaiveDate, ServiceId), slots: Vec<NaiveTime>) {
        if self.form.slot_query() == Some(query) {
            self.slots = slots;
        }
    }

    /// Time options for the select: open slots plus the booking's own time when editing
    pub fn time_options(&self) -> Vec<NaiveTime> {
        let mut options = self.slots.clone();
        if self.editing.is_some() {
            if let Some(current) = crate::format::parse_time(&self.form.time) {
                if !options.contains(&current) {
                    options.push(current);
                    options.sort();
                }
            }
        }
        options
    }
}

/// Requests of the bookings page whose responses may be superseded.
///
/// Month loads are keyed by month, so finishing a save for one month never
/// cancels the load of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingsLoad {
    Month(MonthCursor),
    Slots,
}

pub type BookingsGate = RequestGate<BookingsLoad>;

/// The calendar moved away from `month`; its pending load is dropped
pub fn leave_month(gate: &RefCell<BookingsGate>, month: MonthCursor) {
    gate.borrow_mut().cancel(&BookingsLoad::Month(month));
}

/// Accept a reload of `month` made outside the month effect (after a save or
/// a cancel), superseding an older load of that same month
pub fn supersede_month(gate: &RefCell<BookingsGate>, month: MonthCursor) -> bool {
    let mut gate = gate.borrow_mut();
    let ticket = gate.begin(BookingsLoad::Month(month));
    gate.accept(&ticket)
}

fn without_cancelled(bookings: Vec<Booking>) -> Vec<Booking> {
    bookings.into_iter().filter(|b| !b.is_cancelled()).collect()
}

/// Async flows of the bookings page
pub struct BookingsController<'a, A, N> {
    api: &'a A,
    notifier: &'a N,
}

impl<'a, A, N> BookingsController<'a, A, N>
where
    A: AgendaApi,
    N: Notifier,
{
    pub fn new(api: &'a A, notifier: &'a N) -> Self {
        Self { api, notifier }
    }

    /// Bookings of `month`, cancelled ones left out
    pub async fn load_month(&self, month: MonthCursor) -> Result<Vec<Booking>, String> {
        self.api
            .list_month_bookings(month)
            .await
            .map(without_cancelled)
            .map_err(|error| self.report_month_error(error))
    }

    /// Load `month` under `ticket`, begun on `gate`.
    ///
    /// `None` when the ticket was superseded or the load failed. A failure is
    /// only reported while the ticket is still current.
    pub async fn load_month_gated(
        &self,
        gate: &RefCell<BookingsGate>,
        ticket: &RequestTicket<BookingsLoad>,
        month: MonthCursor,
    ) -> Option<Vec<Booking>> {
        let result = self.api.list_month_bookings(month).await;
        if !gate.borrow_mut().accept(ticket) {
            return None;
        }
        match result {
            Ok(bookings) => Some(without_cancelled(bookings)),
            Err(error) => {
                self.report_month_error(error);
                None
            }
        }
    }

    fn report_month_error(&self, error: ApiError) -> String {
        let message = error.user_message();
        self.notifier.error(format!("Failed to load bookings: {}", message));
        message
    }

    pub async fn load_services(&self) -> Result<Vec<Service>, String> {
        self.api.list_services().await.map_err(|error| {
            let message = error.user_message();
            self.notifier.error(format!("Failed to load services: {}", message));
            message
        })
    }

    /// Open slots; an empty list when the lookup fails
    pub async fn load_available_times(&self, date: NaiveDate, service_id: ServiceId) -> Vec<NaiveTime> {
        match self.api.available_times(date, service_id).await {
            Ok(mut slots) => {
                slots.sort();
                slots
            }
            Err(error) => {
                self.notifier
                    .error(format!("Failed to load available times: {}", error.user_message()));
                Vec::new()
            }
        }
    }

    /// Create or update a booking, then reload `month`.
    ///
    /// `Saved` carries the reloaded bookings, or `None` when the save went
    /// through but the reload did not.
    pub async fn save(
        &self,
        form: &BookingForm,
        editing: Option<BookingId>,
        month: MonthCursor,
    ) -> SubmitOutcome<BookingField, Option<Vec<Booking>>> {
        let payload = match form.validate() {
            Ok(payload) => payload,
            Err(errors) => {
                self.notifier.error(INVALID_FORM_MESSAGE);
                return SubmitOutcome::Invalid(errors);
            }
        };

        let result = match editing {
            Some(id) => self.api.update_booking(id, &payload).await,
            None => self.api.create_booking(&payload).await,
        };

        if let Err(error) = result {
            let message = error.user_message();
            self.notifier.error(format!("Failed to save booking: {}", message));
            return SubmitOutcome::Failed(message);
        }

        self.notifier.success(if editing.is_some() {
            "Booking updated successfully!"
        } else {
            "Booking created successfully!"
        });

        SubmitOutcome::Saved(self.load_month(month).await.ok())
    }

    /// Cancel a booking and return the month's bookings afterwards.
    ///
    /// Nothing changes on failure. When the cancel succeeds but the reload
    /// fails, the booking is dropped from `current`.
    pub async fn cancel(
        &self,
        id: BookingId,
        month: MonthCursor,
        current: &[Booking],
    ) -> Result<Vec<Booking>, String> {
        if let Err(error) = self.api.cancel_booking(id).await {
            let message = error.user_message();
            self.notifier.error(format!("Failed to cancel booking: {}", message));
            return Err(message);
        }

        self.notifier.success("Booking cancelled successfully!");

        match self.load_month(month).await {
            Ok(bookings) => Ok(bookings),
            Err(_) => Ok(current.iter().filter(|b| b.id != id).cloned().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::ToastKind;
    use crate::views::fake::{booking, service, FakeApi, FakeNotifier};
    use crate::ApiError;
    use serde_json::json;

    fn june() -> MonthCursor {
        MonthCursor::new(2024, 6).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn seeded_api() -> FakeApi {
        let api = FakeApi::default();
        api.services.borrow_mut().push(service(3, "Limpeza de pele", 60, 150.0));
        api.bookings.borrow_mut().extend([
            booking(7, 3, "2024-06-10", "09:00", "Bia"),
            booking(8, 3, "2024-06-10", "08:00", "Carla"),
            booking(9, 3, "2024-07-01", "10:00", "Dani"),
        ]);
        api
    }

    #[tokio::test]
    async fn test_create_booking_posts_payload_and_reloads_month() {
        let api = seeded_api();
        let notifier = FakeNotifier::default();
        let controller = BookingsController::new(&api, &notifier);

        let form = BookingForm {
            service_id: "3".to_string(),
            date: "2024-06-10".to_string(),
            time: "14:30".to_string(),
            client_name: "Ana".to_string(),
            client_contact: "ana@x.com".to_string(),
        };

        let outcome = controller.save(&form, None, june()).await;

        let calls = api.calls();
        assert_eq!(calls[0].method, "POST");
        assert_eq!(calls[0].path, "/bookings");
        assert_eq!(
            calls[0].body,
            Some(json!({
                "service_id": 3,
                "date": "2024-06-10",
                "time": "14:30",
                "client_name": "Ana",
                "client_contact": "ana@x.com"
            }))
        );
        assert_eq!(api.paths()[1], "GET /bookings/calendar/6/2024");
        assert_eq!(
            notifier.messages(),
            vec![(ToastKind::Success, "Booking created successfully!".to_string())]
        );

        let reloaded = match outcome {
            SubmitOutcome::Saved(Some(bookings)) => bookings,
            other => panic!("expected a reloaded month, got {:?}", other),
        };
        assert!(reloaded.iter().any(|b| b.client_name == "Ana" && b.date == date(10)));
        assert!(reloaded.iter().all(|b| june().contains(b.date)));
    }

    #[tokio::test]
    async fn test_invalid_booking_never_reaches_the_api() {
        let api = seeded_api();
        let notifier = FakeNotifier::default();
        let controller = BookingsController::new(&api, &notifier);

        let outcome = controller.save(&BookingForm::default(), None, june()).await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(ref errors) if errors.len() == 5));
        assert!(api.calls().is_empty());
        assert_eq!(
            notifier.last(),
            Some((ToastKind::Error, "Please fix the errors in the form".to_string()))
        );
    }

    #[tokio::test]
    async fn test_update_booking_uses_put() {
        let api = seeded_api();
        let notifier = FakeNotifier::default();
        let controller = BookingsController::new(&api, &notifier);

        let mut form = BookingForm::from_booking(&booking(7, 3, "2024-06-10", "09:00", "Bia"));
        form.apply(BookingInput::Time("11:00".to_string()));

        let outcome = controller.save(&form, Some(7), june()).await;
        assert!(outcome.is_saved());
        assert_eq!(api.paths()[0], "PUT /bookings/7");
        assert_eq!(
            notifier.last(),
            Some((ToastKind::Success, "Booking updated successfully!".to_string()))
        );
    }

    #[tokio::test]
    async fn test_rejected_booking_reports_server_message() {
        let api = seeded_api();
        let notifier = FakeNotifier::default();
        let controller = BookingsController::new(&api, &notifier);
        api.fail_next(ApiError::Server {
            status: 400,
            message: "Horário não disponível".to_string(),
        });

        let form = BookingForm::from_booking(&booking(0, 3, "2024-06-10", "09:00", "Eva"));
        let outcome = controller.save(&form, None, june()).await;

        assert_eq!(outcome, SubmitOutcome::Failed("Horário não disponível".to_string()));
        // no reload after a failed save
        assert_eq!(api.calls().len(), 1);
        assert_eq!(
            notifier.last(),
            Some((ToastKind::Error, "Failed to save booking: Horário não disponível".to_string()))
        );
    }

    #[tokio::test]
    async fn test_cancel_calls_delete_then_updates_day_panel() {
        let api = seeded_api();
        let notifier = FakeNotifier::default();
        let controller = BookingsController::new(&api, &notifier);

        let mut state = BookingsState::new(date(1));
        let loaded = controller.load_month(june()).await.unwrap();
        assert!(state.apply_month(june(), loaded));
        state.select(date(10));
        assert_eq!(state.day_bookings().iter().map(|b| b.id).collect::<Vec<_>>(), vec![8, 7]);

        let remaining = controller.cancel(7, june(), &state.bookings).await.unwrap();
        assert!(api.paths().contains(&"DELETE /bookings/7".to_string()));

        state.apply_month(june(), remaining);
        assert_eq!(state.day_bookings().iter().map(|b| b.id).collect::<Vec<_>>(), vec![8]);
        assert_eq!(
            notifier.last(),
            Some((ToastKind::Success, "Booking cancelled successfully!".to_string()))
        );
    }

    #[tokio::test]
    async fn test_failed_cancel_leaves_bookings_untouched() {
        let api = seeded_api();
        let notifier = FakeNotifier::default();
        let controller = BookingsController::new(&api, &notifier);

        let mut state = BookingsState::new(date(1));
        state.apply_month(june(), controller.load_month(june()).await.unwrap());
        state.select(date(10));
        let before = state.clone();

        api.fail_next(ApiError::Transport("offline".to_string()));
        let result = controller.cancel(7, june(), &state.bookings).await;

        assert!(result.is_err());
        if let Ok(bookings) = result {
            state.apply_month(june(), bookings);
        }
        assert_eq!(state, before);
        assert_eq!(api.paths().last(), Some(&"DELETE /bookings/7".to_string()));
    }

    #[tokio::test]
    async fn test_cancel_falls_back_to_local_removal_when_reload_fails() {
        let api = seeded_api();
        let notifier = FakeNotifier::default();
        let controller = BookingsController::new(&api, &notifier);
        let current = controller.load_month(june()).await.unwrap();

        // DELETE succeeds, the reload fails
        api.succeed_next();
        api.fail_next(ApiError::MissingData);
        let remaining = controller.cancel(8, june(), &current).await.unwrap();

        assert_eq!(remaining.iter().map(|b| b.id).collect::<Vec<_>>(), vec![7]);
    }

    #[tokio::test]
    async fn test_load_month_skips_cancelled_bookings() {
        let api = seeded_api();
        let notifier = FakeNotifier::default();
        let controller = BookingsController::new(&api, &notifier);
        api.cancel_booking(8).await.unwrap();

        let bookings = controller.load_month(june()).await.unwrap();
        assert_eq!(bookings.iter().map(|b| b.id).collect::<Vec<_>>(), vec![7]);
    }

    #[tokio::test]
    async fn test_slot_lookup_failure_yields_no_slots() {
        let api = seeded_api();
        let notifier = FakeNotifier::default();
        let controller = BookingsController::new(&api, &notifier);
        api.slots.borrow_mut().extend([
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        ]);

        let slots = controller.load_available_times(date(10), 3).await;
        assert_eq!(slots[0], NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(api.paths()[0], "GET /bookings/available-times/2024-06-10/3");

        api.fail_next(ApiError::Transport("offline".to_string()));
        assert!(controller.load_available_times(date(10), 3).await.is_empty());
        assert_eq!(notifier.last().map(|(kind, _)| kind), Some(ToastKind::Error));
    }

    #[tokio::test]
    async fn test_reload_after_save_does_not_cancel_the_next_month() {
        let api = seeded_api();
        let notifier = FakeNotifier::default();
        let controller = BookingsController::new(&api, &notifier);
        let gate = RefCell::new(BookingsGate::default());
        let july = june().next();

        let mut state = BookingsState::new(date(15));
        let june_ticket = gate.borrow_mut().begin(BookingsLoad::Month(june()));

        // a save is pending for June while the user moves on to July
        state.navigate(1);
        leave_month(&gate, june());
        let july_ticket = gate.borrow_mut().begin(BookingsLoad::Month(july));

        let form = BookingForm::from_booking(&booking(0, 3, "2024-06-20", "10:00", "Eva"));
        let reloaded = match controller.save(&form, None, june()).await {
            SubmitOutcome::Saved(Some(bookings)) => bookings,
            other => panic!("expected a reloaded month, got {:?}", other),
        };
        assert!(supersede_month(&gate, june()));
        assert!(!state.apply_month(june(), reloaded));

        assert_eq!(controller.load_month_gated(&gate, &june_ticket, june()).await, None);
        let bookings = controller
            .load_month_gated(&gate, &july_ticket, july)
            .await
            .expect("July is still the current load");
        assert!(state.apply_month(july, bookings));
        assert_eq!(state.bookings.iter().map(|b| b.id).collect::<Vec<_>>(), vec![9]);
    }

    #[tokio::test]
    async fn test_superseded_failing_load_stays_silent() {
        let api = seeded_api();
        let notifier = FakeNotifier::default();
        let controller = BookingsController::new(&api, &notifier);
        let gate = RefCell::new(BookingsGate::default());

        let june_ticket = gate.borrow_mut().begin(BookingsLoad::Month(june()));
        leave_month(&gate, june());
        api.fail_next(ApiError::Transport("offline".to_string()));

        assert_eq!(controller.load_month_gated(&gate, &june_ticket, june()).await, None);
        assert!(notifier.messages().is_empty());

        let retry = gate.borrow_mut().begin(BookingsLoad::Month(june()));
        api.fail_next(ApiError::Transport("offline".to_string()));
        assert_eq!(controller.load_month_gated(&gate, &retry, june()).await, None);
        assert_eq!(notifier.last().map(|(kind, _)| kind), Some(ToastKind::Error));
    }

    #[test]
    fn test_navigation_clears_selection() {
        let mut state = BookingsState::new(date(15));
        state.select(date(10));
        state.navigate(1);
        assert_eq!(state.month, MonthCursor::new(2024, 7).unwrap());
        assert_eq!(state.selected, None);
        assert!(state.day_bookings().is_empty());

        // a late response for June is ignored once July is shown
        assert!(!state.apply_month(june(), vec![booking(1, 3, "2024-06-10", "09:00", "Ana")]));
        assert!(state.bookings.is_empty());
    }

    #[test]
    fn test_form_edits_request_slots_once_service_and_date_are_set() {
        let mut state = BookingsState::new(date(1));
        state.select(date(10));
        state.open_create();
        assert_eq!(state.form.date, "2024-06-10");

        assert_eq!(state.apply_input(BookingInput::ClientName("Ana".to_string())), None);
        let query = state.apply_input(BookingInput::Service("3".to_string()));
        assert_eq!(query, Some((date(10), 3)));

        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        state.apply_slots((date(11), 3), vec![nine]);
        assert!(state.slots.is_empty());
        state.apply_slots((date(10), 3), vec![nine]);
        assert_eq!(state.slots, vec![nine]);
    }

    #[test]
    fn test_edit_keeps_current_time_selectable() {
        let mut state = BookingsState::new(date(1));
        state.open_edit(&booking(7, 3, "2024-06-10", "09:00", "Bia"));
        state.apply_slots((date(10), 3), vec![NaiveTime::from_hms_opt(10, 0, 0).unwrap()]);

        let options: Vec<String> = state.time_options().into_iter().map(crate::format::format_time).collect();
        assert_eq!(options, vec!["09:00", "10:00"]);
    }

    #[test]
    fn test_service_name_fallback() {
        let mut state = BookingsState::new(date(1));
        state.services.push(service(3, "Limpeza de pele", 60, 150.0));
        assert_eq!(state.service_name(3), "Limpeza de pele");
        assert_eq!(state.service_name(99), UNKNOWN_SERVICE_LABEL);
    }
}
