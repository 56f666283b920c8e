//! Shared council state
//!
//! - [`registry::ProviderRegistry`] — known providers and the enabled set
//! - [`recorder::OperationRecorder`] — append-only log of dispatches

pub mod recorder;
pub mod registry;
