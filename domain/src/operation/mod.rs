//! Operation records
//!
//! One [`OperationRecord`] is appended per finished council dispatch. Records
//! are immutable; [`OperationSummary`] is their serialisable projection.

pub mod record;

pub use record::{OperationOutcome, OperationRecord, OperationStats, OperationStatus, OperationSummary};
