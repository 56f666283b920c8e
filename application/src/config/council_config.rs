//! Council execution parameters.
//!
//! [`CouncilConfig`] groups the static parameters that control
//! [`DispatchConsensusUseCase`](crate::use_cases::dispatch_consensus::DispatchConsensusUseCase)
//! and [`ReportStatusUseCase`](crate::use_cases::report_status::ReportStatusUseCase).
//! These are application-layer concerns, not domain policy.

use council_domain::AgreementThresholds;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-provider timeout
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

/// Default number of operations shown in status output
pub const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilConfig {
    /// Timeout applied to each provider call independently
    pub provider_timeout: Duration,
    /// Mean-confidence cut-offs for the agreement label
    pub thresholds: AgreementThresholds,
    /// Operations included in a status snapshot
    pub recent_limit: usize,
}

impl Default for CouncilConfig {
    fn default() -> Self {
        Self {
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            thresholds: AgreementThresholds::default(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl CouncilConfig {
    // ==================== Builder Methods ====================

    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn with_thresholds(mut self, thresholds: AgreementThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }
}
