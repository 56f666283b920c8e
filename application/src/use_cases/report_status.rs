//! Report Status use case

use crate::services::recorder::OperationRecorder;
use crate::services::registry::ProviderRegistry;
use council_domain::util::current_timestamp_ms;
use council_domain::StatusSnapshot;
use std::sync::Arc;

/// Failed operations listed in a snapshot
pub const RECENT_ERROR_LIMIT: usize = 5;

/// Builds a [`StatusSnapshot`] from the registry and the recorder
pub struct ReportStatusUseCase {
    registry: Arc<ProviderRegistry>,
    recorder: Arc<OperationRecorder>,
    recent_limit: usize,
}

impl ReportStatusUseCase {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        recorder: Arc<OperationRecorder>,
        recent_limit: usize,
    ) -> Self {
        Self {
            registry,
            recorder,
            recent_limit,
        }
    }

    pub fn status(&self) -> StatusSnapshot {
        self.status_with_limit(self.recent_limit)
    }

    /// Same as [`status`](Self::status) with an explicit history length
    pub fn status_with_limit(&self, recent_limit: usize) -> StatusSnapshot {
        let providers = self.registry.providers();
        let enabled_providers: Vec<_> = providers
            .iter()
            .filter(|p| p.enabled)
            .map(|p| p.id)
            .collect();

        let view = self.recorder.view(recent_limit, RECENT_ERROR_LIMIT);

        StatusSnapshot {
            enabled_count: enabled_providers.len(),
            total_providers: providers.len(),
            enabled_providers,
            providers,
            total_operations: view.stats.total,
            succeeded_operations: view.stats.succeeded,
            failed_operations: view.stats.failed,
            recent_operations: view.recent.iter().map(|r| r.summary()).collect(),
            recent_errors: view.recent_failures.iter().map(|r| r.summary()).collect(),
            timestamp: current_timestamp_ms(),
        }
    }
}
