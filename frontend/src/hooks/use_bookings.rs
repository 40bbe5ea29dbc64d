use std::rc::Rc;

use chrono::{NaiveDate, NaiveTime};
use shared::validation::{BookingField, BookingInput, FormErrors};
use shared::views::{
    leave_month, supersede_month, BookingsController, BookingsGate, BookingsLoad, BookingsState, SubmitOutcome,
};
use shared::{Booking, BookingId, MonthCursor, Service, ServiceId};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::use_api::use_api;
use super::use_toasts::use_notifier;
use crate::services::logging::Logger;

const COMPONENT: &str = "use_bookings";

pub enum BookingsAction {
    Navigate(i32),
    Select(NaiveDate),
    MonthLoaded(MonthCursor, Vec<Booking>),
    ServicesLoaded(Vec<Service>),
    OpenCreate,
    OpenEdit(Booking),
    CloseModal,
    Input(BookingInput),
    SlotsLoaded((NaiveDate, ServiceId), Vec<NaiveTime>),
    Invalid(FormErrors<BookingField>),
    AskCancel(BookingId),
    DismissCancel,
}

#[derive(Clone, PartialEq)]
pub struct BookingsStore(pub BookingsState);

impl Reducible for BookingsStore {
    type Action = BookingsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = self.0.clone();
        match action {
            BookingsAction::Navigate(months) => state.navigate(months),
            BookingsAction::Select(date) => state.select(date),
            BookingsAction::MonthLoaded(month, bookings) => {
                state.apply_month(month, bookings);
            }
            BookingsAction::ServicesLoaded(services) => state.services = services,
            BookingsAction::OpenCreate => state.open_create(),
            BookingsAction::OpenEdit(booking) => state.open_edit(&booking),
            BookingsAction::CloseModal => state.close_modal(),
            BookingsAction::Input(input) => {
                state.apply_input(input);
            }
            BookingsAction::SlotsLoaded(query, slots) => state.apply_slots(query, slots),
            BookingsAction::Invalid(errors) => state.errors = errors,
            BookingsAction::AskCancel(id) => state.pending_cancel = Some(id),
            BookingsAction::DismissCancel => state.pending_cancel = None,
        }
        Rc::new(Self(state))
    }
}

pub struct UseBookingsResult {
    pub state: BookingsState,
    pub loading: bool,
    /// Message of the last failed call
    pub error: Option<String>,
    pub actions: UseBookingsActions,
}

#[derive(Clone)]
pub struct UseBookingsActions {
    pub navigate: Callback<i32>,
    pub select_day: Callback<NaiveDate>,
    pub open_create: Callback<()>,
    pub open_edit: Callback<Booking>,
    pub close_modal: Callback<()>,
    pub on_input: Callback<BookingInput>,
    pub submit: Callback<()>,
    pub ask_cancel: Callback<BookingId>,
    pub dismiss_cancel: Callback<()>,
    pub clear_error: Callback<()>,
    pub confirm_cancel: Callback<()>,
}

#[hook]
pub fn use_bookings(today: NaiveDate) -> UseBookingsResult {
    let store = use_reducer(move || BookingsStore(BookingsState::new(today)));
    let gate = use_mut_ref(BookingsGate::default);
    let api = use_api();
    let notifier = use_notifier();

    let state = &store.0;

    // Load the visible month whenever it changes; older loads are discarded
    {
        let api = api.api.clone();
        let notifier = notifier.clone();
        let dispatcher = store.dispatcher();
        let gate = gate.clone();
        use_effect_with(state.month, move |month| {
            let month = *month;
            let ticket = gate.borrow_mut().begin(BookingsLoad::Month(month));
            {
                let gate = gate.clone();
                spawn_local(async move {
                    let api = api.tracked();
                    let controller = BookingsController::new(&api, &notifier);
                    match controller.load_month_gated(&gate, &ticket, month).await {
                        Some(bookings) => {
                            Logger::info_with_component(
                                COMPONENT,
                                &format!("Loaded {} bookings for {}", bookings.len(), month),
                            );
                            dispatcher.dispatch(BookingsAction::MonthLoaded(month, bookings));
                        }
                        None => Logger::debug_with_component(COMPONENT, &format!("No bookings applied for {}", month)),
                    }
                });
            }
            move || leave_month(&gate, month)
        });
    }

    // Services feed the booking form and the day panel labels
    {
        let api = api.api.clone();
        let notifier = notifier.clone();
        let dispatcher = store.dispatcher();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let api = api.tracked();
                let controller = BookingsController::new(&api, &notifier);
                if let Ok(services) = controller.load_services().await {
                    dispatcher.dispatch(BookingsAction::ServicesLoaded(services));
                }
            });
            || ()
        });
    }

    // Open slots follow the form's service and date while the modal is open
    {
        let api = api.api.clone();
        let notifier = notifier.clone();
        let dispatcher = store.dispatcher();
        let gate = gate.clone();
        use_effect_with((state.modal_open, state.form.slot_query()), move |(open, query)| {
            if let (true, Some((date, service_id))) = (*open, *query) {
                let ticket = gate.borrow_mut().begin(BookingsLoad::Slots);
                spawn_local(async move {
                    let api = api.tracked();
                    let controller = BookingsController::new(&api, &notifier);
                    let slots = controller.load_available_times(date, service_id).await;
                    if gate.borrow_mut().accept(&ticket) {
                        dispatcher.dispatch(BookingsAction::SlotsLoaded((date, service_id), slots));
                    }
                });
            } else {
                gate.borrow_mut().cancel(&BookingsLoad::Slots);
            }
            || ()
        });
    }

    let navigate = {
        let dispatcher = store.dispatcher();
        Callback::from(move |months: i32| dispatcher.dispatch(BookingsAction::Navigate(months)))
    };

    let select_day = {
        let dispatcher = store.dispatcher();
        Callback::from(move |date: NaiveDate| dispatcher.dispatch(BookingsAction::Select(date)))
    };

    let open_create = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(BookingsAction::OpenCreate))
    };

    let open_edit = {
        let dispatcher = store.dispatcher();
        Callback::from(move |booking: Booking| dispatcher.dispatch(BookingsAction::OpenEdit(booking)))
    };

    let close_modal = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(BookingsAction::CloseModal))
    };

    let on_input = {
        let dispatcher = store.dispatcher();
        Callback::from(move |input: BookingInput| dispatcher.dispatch(BookingsAction::Input(input)))
    };

    let submit = {
        let api = api.api.clone();
        let notifier = notifier.clone();
        let dispatcher = store.dispatcher();
        let gate = gate.clone();
        let form = state.form.clone();
        let editing = state.editing;
        let month = state.month;
        Callback::from(move |_: ()| {
            let api = api.clone();
            let notifier = notifier.clone();
            let dispatcher = dispatcher.clone();
            let gate = gate.clone();
            let form = form.clone();

            spawn_local(async move {
                let api = api.tracked();
                let controller = BookingsController::new(&api, &notifier);
                match controller.save(&form, editing, month).await {
                    SubmitOutcome::Invalid(errors) => dispatcher.dispatch(BookingsAction::Invalid(errors)),
                    SubmitOutcome::Failed(message) => {
                        Logger::error_with_component(COMPONENT, &format!("Saving booking failed: {}", message));
                    }
                    SubmitOutcome::Saved(reloaded) => {
                        dispatcher.dispatch(BookingsAction::CloseModal);
                        if let Some(bookings) = reloaded {
                            if supersede_month(&gate, month) {
                                dispatcher.dispatch(BookingsAction::MonthLoaded(month, bookings));
                            }
                        }
                    }
                }
            });
        })
    };

    let ask_cancel = {
        let dispatcher = store.dispatcher();
        Callback::from(move |id: BookingId| dispatcher.dispatch(BookingsAction::AskCancel(id)))
    };

    let dismiss_cancel = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(BookingsAction::DismissCancel))
    };

    let confirm_cancel = {
        let api = api.api.clone();
        let notifier = notifier.clone();
        let dispatcher = store.dispatcher();
        let gate = gate.clone();
        let pending = state.pending_cancel;
        let month = state.month;
        let current = state.bookings.clone();
        Callback::from(move |_: ()| {
            dispatcher.dispatch(BookingsAction::DismissCancel);
            let Some(id) = pending else {
                return;
            };

            let api = api.clone();
            let notifier = notifier.clone();
            let dispatcher = dispatcher.clone();
            let gate = gate.clone();
            let current = current.clone();

            spawn_local(async move {
                let api = api.tracked();
                let controller = BookingsController::new(&api, &notifier);
                // The day panel only changes once the backend confirmed the cancellation
                if let Ok(bookings) = controller.cancel(id, month, &current).await {
                    if supersede_month(&gate, month) {
                        dispatcher.dispatch(BookingsAction::MonthLoaded(month, bookings));
                    }
                }
            });
        })
    };

    let clear_error = {
        let api = api.api.clone();
        Callback::from(move |_: ()| api.clear_error())
    };

    UseBookingsResult {
        state: state.clone(),
        loading: api.loading,
        error: api.error.clone(),
        actions: UseBookingsActions {
            navigate,
            select_day,
            open_create,
            open_edit,
            close_modal,
            on_input,
            submit,
            ask_cancel,
            dismiss_cancel,
            clear_error,
            confirm_cancel,
        },
    }
}
