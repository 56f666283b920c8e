//! Domain layer for ai-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A fixed set of AI providers ([`ProviderId`]) is asked the same request.
//! Every provider that answers contributes a [`ProviderResponse`]; the
//! answers are folded into a [`ConsensusResult`] holding the best response,
//! the mean confidence and an [`Agreement`] label.
//!
//! ## Operation log
//!
//! Each finished dispatch becomes an immutable [`OperationRecord`]. The
//! [`StatusSnapshot`] projects provider state and recent operations for
//! display.

pub mod config;
pub mod consensus;
pub mod core;
pub mod operation;
pub mod persona;
pub mod providers;
pub mod status;
pub mod util;

// Re-export commonly used types
pub use config::OutputFormat;
pub use consensus::{
    Agreement, AgreementThresholds, ConsensusResult, ConsensusSummary, ProviderFailure,
    ProviderResponse, validate_confidence,
};
pub use core::{error::DomainError, provider::ProviderId, request::RequestKind};
pub use operation::{OperationOutcome, OperationRecord, OperationStats, OperationStatus, OperationSummary};
pub use persona::{Emotion, Mood, PersonaEvent, PersonaEventKind, Reflection};
pub use providers::{CredentialSource, INPUT_PLACEHOLDER, KindTable, ProviderProfile};
pub use status::{ProviderStatus, StatusSnapshot};
