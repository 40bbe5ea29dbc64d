use std::cell::RefCell;
use std::rc::Rc;

use shared::{RequestTracker, TrackedApi};
use yew::prelude::*;

use crate::services::api::ApiClient;

/// Cloneable access to the backend for one view, sharing that view's tracker
#[derive(Clone)]
pub struct ApiHandle {
    client: ApiClient,
    tracker: Rc<RefCell<RequestTracker>>,
    on_change: Callback<()>,
}

impl ApiHandle {
    /// Client whose calls update this view's loading and error state
    pub fn tracked(&self) -> TrackedApi<ApiClient, impl Fn()> {
        let on_change = self.on_change.clone();
        TrackedApi::new(self.client.clone(), Rc::clone(&self.tracker), move || on_change.emit(()))
    }

    pub fn clear_error(&self) {
        self.tracker.borrow_mut().clear_error();
        self.on_change.emit(());
    }
}

pub struct UseApiResult {
    pub api: ApiHandle,
    /// True while any call of this view is in flight
    pub loading: bool,
    /// Message of the last failed call, cleared when the next call starts
    pub error: Option<String>,
}

#[hook]
pub fn use_api() -> UseApiResult {
    let client = use_memo((), |_| ApiClient::new());
    let tracker = use_mut_ref(RequestTracker::default);
    let force_update = use_force_update();

    let on_change = Callback::from(move |_: ()| force_update.force_update());

    let (loading, error) = {
        let tracker = tracker.borrow();
        (tracker.is_busy(), tracker.error().map(str::to_string))
    };

    UseApiResult {
        api: ApiHandle {
            client: (*client).clone(),
            tracker,
            on_change,
        },
        loading,
        error,
    }
}
