//! Application layer for ai-council
//!
//! This crate contains use cases, port definitions, services and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod services;
pub mod use_cases;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::CouncilConfig;
pub use ports::{
    operation_journal::{JournalEvent, NoOperationJournal, OperationJournal},
    persona_sink::{NoPersona, PersonaSink},
    progress::{DispatchProgress, NoProgress},
    provider_client::{ProviderClient, ProviderError},
};
pub use services::{
    recorder::{OperationRecorder, RecorderView},
    registry::{ProviderRegistry, RegistryError},
};
pub use use_cases::dispatch_consensus::{DispatchConsensusUseCase, DispatchError, DispatchInput};
pub use use_cases::report_status::ReportStatusUseCase;
