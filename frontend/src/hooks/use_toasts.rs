use std::rc::Rc;

use shared::views::Notifier;
use shared::{Toast, ToastId, ToastKind, ToastQueue};
use yew::prelude::*;

use crate::services::date_utils::now_ms;
use crate::services::logging::Logger;

pub enum ToastAction {
    Push { kind: ToastKind, message: String },
    Dismiss(ToastId),
    /// The display timer of a toast fired
    Expire(ToastId),
}

#[derive(Clone, PartialEq)]
pub struct ToastStore {
    queue: ToastQueue,
}

impl Reducible for ToastStore {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut queue = self.queue.clone();
        match action {
            ToastAction::Push { kind, message } => {
                queue.enqueue(message, kind, now_ms());
            }
            ToastAction::Dismiss(id) => {
                queue.dismiss(id);
            }
            ToastAction::Expire(id) => {
                queue.expire(now_ms());
                queue.dismiss(id);
            }
        }
        Rc::new(Self { queue })
    }
}

/// Provided through context; every page reports outcomes through it
#[derive(Clone, PartialEq)]
pub struct ToastHandle {
    dispatcher: UseReducerDispatcher<ToastStore>,
}

impl ToastHandle {
    pub fn dismiss(&self, id: ToastId) {
        self.dispatcher.dispatch(ToastAction::Dismiss(id));
    }

    pub fn expire(&self, id: ToastId) {
        self.dispatcher.dispatch(ToastAction::Expire(id));
    }
}

impl Notifier for ToastHandle {
    fn notify(&self, kind: ToastKind, message: String) {
        if kind == ToastKind::Error {
            Logger::warn_with_component("toast", &message);
        }
        self.dispatcher.dispatch(ToastAction::Push { kind, message });
    }
}

pub struct UseToastsResult {
    pub toasts: Vec<Toast>,
    pub display_ms: u32,
    pub handle: ToastHandle,
}

#[hook]
pub fn use_toasts(display_ms: u32) -> UseToastsResult {
    let store = use_reducer(move || ToastStore {
        queue: ToastQueue::new(display_ms),
    });

    UseToastsResult {
        toasts: store.queue.toasts().to_vec(),
        display_ms: store.queue.display_ms(),
        handle: ToastHandle {
            dispatcher: store.dispatcher(),
        },
    }
}

/// Notifier for components below the app root. Without a toast context the
/// messages only reach the console.
#[derive(Clone, PartialEq)]
pub struct NotifierHandle(Option<ToastHandle>);

impl Notifier for NotifierHandle {
    fn notify(&self, kind: ToastKind, message: String) {
        match &self.0 {
            Some(handle) => handle.notify(kind, message),
            None => Logger::info_with_component("toast", &message),
        }
    }
}

#[hook]
pub fn use_notifier() -> NotifierHandle {
    NotifierHandle(use_context::<ToastHandle>())
}
