//! Transient user notifications (toasts).
//!
//! Cart mutations post short-lived feedback messages through the
//! [`NotificationSink`] port. The cart does not depend on the sink for
//! correctness: a no-op sink leaves every cart invariant intact.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

/// How long a posted message stays visible unless replaced sooner.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

/// Side-effect port for user-facing feedback messages.
pub trait NotificationSink: Send + Sync {
    /// Post a message, replacing whatever is currently displayed.
    fn post(&self, message: &str);
}

#[derive(Debug)]
struct Slot {
    message: String,
    posted_at: Instant,
}

/// Single-slot notifier.
///
/// Holds at most one message at a time: posting replaces the current
/// message immediately, and a message expires [`TOAST_TTL`] after it was
/// posted. No history is retained.
#[derive(Debug, Default)]
pub struct SlotNotifier {
    slot: Mutex<Option<Slot>>,
}

impl SlotNotifier {
    /// Create an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently displayed message, if it has not expired.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref()
            .filter(|s| s.posted_at.elapsed() < TOAST_TTL)
            .map(|s| s.message.clone())
    }
}

impl NotificationSink for SlotNotifier {
    fn post(&self, message: &str) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Slot {
            message: message.to_owned(),
            posted_at: Instant::now(),
        });
    }
}

/// Sink that discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl NotificationSink for NoopSink {
    fn post(&self, _message: &str) {}
}

/// Test double that records every posted message.
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages posted so far, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NotificationSink for RecordingSink {
    fn post(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
    }
}
