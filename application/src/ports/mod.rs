//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod operation_journal;
pub mod persona_sink;
pub mod progress;
pub mod provider_client;
