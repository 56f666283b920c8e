//! Status snapshot
//!
//! Read-side view of the council at one instant, suitable for JSON output.

use crate::core::provider::ProviderId;
use crate::operation::OperationSummary;
use serde::{Deserialize, Serialize};

/// State of one registered provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub id: ProviderId,
    /// Declared model label (display only)
    pub model: String,
    pub enabled: bool,
    /// Number of dispatches this provider was part of
    pub requests: u64,
}

/// Point-in-time view of registry and recorder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Enabled providers, in enumeration order
    pub enabled_providers: Vec<ProviderId>,
    pub providers: Vec<ProviderStatus>,
    pub total_providers: usize,
    pub enabled_count: usize,
    /// Operations recorded since start
    pub total_operations: usize,
    pub succeeded_operations: usize,
    pub failed_operations: usize,
    /// Most recent operations, oldest first
    pub recent_operations: Vec<OperationSummary>,
    /// Most recent failed operations, oldest first
    pub recent_errors: Vec<OperationSummary>,
    pub timestamp: u64,
}

impl StatusSnapshot {
    pub fn is_enabled(&self, id: ProviderId) -> bool {
        self.enabled_providers.contains(&id)
    }
}
