//! Transient user notifications.
//!
//! The queue itself is synchronous and clock-agnostic: callers pass the
//! current time in milliseconds. The frontend schedules one cancellable timer
//! per toast that dismisses it when the display window elapses.

/// Default display window for a toast
pub const DEFAULT_TOAST_DURATION_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToastId(u64);

impl ToastId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast success",
            ToastKind::Error => "toast error",
            ToastKind::Warning => "toast warning",
            ToastKind::Info => "toast info",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✅",
            ToastKind::Error => "⛔",
            ToastKind::Warning => "⚠️",
            ToastKind::Info => "ℹ️",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
    /// Milliseconds since the epoch when the toast was created
    pub created_at_ms: f64,
}

/// Ordered set of live toasts
#[derive(Debug, Clone, PartialEq)]
pub struct ToastQueue {
    next_id: u64,
    display_ms: u32,
    toasts: Vec<Toast>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION_MS)
    }
}

impl ToastQueue {
    pub fn new(display_ms: u32) -> Self {
        Self {
            next_id: 1,
            display_ms,
            toasts: Vec::new(),
        }
    }

    pub fn display_ms(&self) -> u32 {
        self.display_ms
    }

    /// Append a toast and return its id. Ids strictly increase.
    pub fn enqueue(&mut self, message: impl Into<String>, kind: ToastKind, now_ms: f64) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
            created_at_ms: now_ms,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>, now_ms: f64) -> ToastId {
        self.enqueue(message, ToastKind::Success, now_ms)
    }

    pub fn error(&mut self, message: impl Into<String>, now_ms: f64) -> ToastId {
        self.enqueue(message, ToastKind::Error, now_ms)
    }

    pub fn warning(&mut self, message: impl Into<String>, now_ms: f64) -> ToastId {
        self.enqueue(message, ToastKind::Warning, now_ms)
    }

    pub fn info(&mut self, message: impl Into<String>, now_ms: f64) -> ToastId {
        self.enqueue(message, ToastKind::Info, now_ms)
    }

    /// Remove a toast right away. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    /// Drop every toast whose display window has elapsed at `now_ms`
    pub fn expire(&mut self, now_ms: f64) -> Vec<ToastId> {
        let window = f64::from(self.display_ms);
        let mut expired = Vec::new();
        self.toasts.retain(|toast| {
            let keep = now_ms - toast.created_at_ms < window;
            if !keep {
                expired.push(toast.id);
            }
            keep
        });
        expired
    }

    /// Live toasts in insertion order
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase_and_order_is_insertion_order() {
        let mut queue = ToastQueue::default();
        let a = queue.success("saved", 0.0);
        let b = queue.error("failed", 10.0);
        let c = queue.info("hello", 5.0);

        assert!(a < b && b < c);
        let messages: Vec<&str> = queue.toasts().iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["saved", "failed", "hello"]);
    }

    #[test]
    fn test_expires_after_display_window() {
        let mut queue = ToastQueue::default();
        let id = queue.warning("heads up", 1_000.0);

        assert!(queue.expire(5_999.0).is_empty());
        assert_eq!(queue.len(), 1);

        assert_eq!(queue.expire(6_000.0), vec![id]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dismiss_is_immediate() {
        let mut queue = ToastQueue::default();
        let first = queue.info("one", 0.0);
        let second = queue.info("two", 0.0);

        assert!(queue.dismiss(first));
        assert!(!queue.dismiss(first));
        assert_eq!(queue.toasts().len(), 1);
        assert_eq!(queue.toasts()[0].id, second);
    }

    #[test]
    fn test_expire_only_removes_old_entries() {
        let mut queue = ToastQueue::new(1_000);
        let old = queue.info("old", 0.0);
        let fresh = queue.info("fresh", 800.0);

        assert_eq!(queue.expire(1_200.0), vec![old]);
        assert_eq!(queue.toasts()[0].id, fresh);
    }

    #[test]
    fn test_ids_are_not_reused_after_dismissal() {
        let mut queue = ToastQueue::default();
        let first = queue.info("one", 0.0);
        queue.dismiss(first);
        let second = queue.info("two", 0.0);
        assert!(second > first);
        assert_eq!(second.value(), 2);
    }
}
