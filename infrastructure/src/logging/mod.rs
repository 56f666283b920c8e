//! Logging infrastructure: the JSONL operation journal.
//!
//! Provides [`JsonlOperationJournal`], an append-only file writer that
//! implements the [`OperationJournal`](council_application::OperationJournal) port.

mod jsonl_journal;

pub use jsonl_journal::JsonlOperationJournal;
