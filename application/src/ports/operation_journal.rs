//! Port for structured operation journaling.
//!
//! Defines the [`OperationJournal`] trait for recording dispatch outcomes to a
//! machine-readable log (JSONL).
//!
//! This is separate from `tracing`-based diagnostics: tracing handles
//! human-readable messages, while the journal captures every dispatch with
//! its full payload.

use serde_json::Value;

/// A structured journal event.
///
/// Each event has a type string and a JSON payload containing event-specific
/// fields. The timestamp is added by the writer.
pub struct JournalEvent {
    /// Event type identifier (e.g., "dispatch_completed", "provider_disabled").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl JournalEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for writing journal events.
///
/// `log` is synchronous and non-fallible so it never disrupts a dispatch;
/// write failures are dropped by the implementation.
pub trait OperationJournal: Send + Sync {
    /// Record a journal event.
    fn log(&self, event: JournalEvent);
}

/// No-op implementation for tests and when journaling is disabled.
pub struct NoOperationJournal;

impl OperationJournal for NoOperationJournal {
    fn log(&self, _event: JournalEvent) {}
}
