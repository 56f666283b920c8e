//! Operation record entities

use crate::consensus::{Agreement, ConsensusResult};
use crate::core::provider::ProviderId;
use crate::core::request::RequestKind;
use crate::util::{current_timestamp_ms, truncate_str};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Bytes of the request input kept in summaries
const INPUT_PREVIEW_BYTES: usize = 60;

/// How a dispatch ended
#[derive(Debug, Clone)]
pub enum OperationOutcome {
    /// At least one provider responded
    Completed(Arc<ConsensusResult>),
    /// The dispatch produced no result
    Failed { error: String },
}

impl OperationOutcome {
    pub fn status(&self) -> OperationStatus {
        match self {
            OperationOutcome::Completed(_) => OperationStatus::Succeeded,
            OperationOutcome::Failed { .. } => OperationStatus::Failed,
        }
    }
}

/// Success flag of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    Succeeded,
    Failed,
}

impl std::fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationStatus::Succeeded => write!(f, "succeeded"),
            OperationStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One entry in the append-only operation log
#[derive(Debug, Clone)]
pub struct OperationRecord {
    /// Position in the log, starting at 1
    pub sequence: u64,
    /// Append time (milliseconds since epoch)
    pub timestamp: u64,
    pub kind: RequestKind,
    pub input: String,
    pub outcome: OperationOutcome,
}

impl OperationRecord {
    pub fn new(
        sequence: u64,
        kind: RequestKind,
        input: impl Into<String>,
        outcome: OperationOutcome,
    ) -> Self {
        Self {
            sequence,
            timestamp: current_timestamp_ms(),
            kind,
            input: input.into(),
            outcome,
        }
    }

    pub fn status(&self) -> OperationStatus {
        self.outcome.status()
    }

    /// The consensus result, if the operation completed
    pub fn result(&self) -> Option<&Arc<ConsensusResult>> {
        match &self.outcome {
            OperationOutcome::Completed(result) => Some(result),
            OperationOutcome::Failed { .. } => None,
        }
    }

    /// Flatten into a serialisable summary
    pub fn summary(&self) -> OperationSummary {
        let result = self.result();
        OperationSummary {
            sequence: self.sequence,
            timestamp: self.timestamp,
            kind: self.kind,
            status: self.status(),
            input_preview: truncate_str(&self.input, INPUT_PREVIEW_BYTES).to_string(),
            best_provider: result.map(|r| r.best.provider),
            mean_confidence: result.map(|r| r.mean_confidence()),
            agreement: result.map(|r| r.agreement()),
            error: match &self.outcome {
                OperationOutcome::Failed { error } => Some(error.clone()),
                OperationOutcome::Completed(_) => None,
            },
        }
    }
}

/// Serialisable projection of an [`OperationRecord`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationSummary {
    pub sequence: u64,
    pub timestamp: u64,
    pub kind: RequestKind,
    pub status: OperationStatus,
    pub input_preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_provider: Option<ProviderId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement: Option<Agreement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Operation counts by outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationStats {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl OperationStats {
    /// Count one more operation with the given status
    pub fn count(&mut self, status: OperationStatus) {
        self.total += 1;
        match status {
            OperationStatus::Succeeded => self.succeeded += 1,
            OperationStatus::Failed => self.failed += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::{AgreementThresholds, ProviderResponse};

    fn completed() -> OperationOutcome {
        let result = ConsensusResult::aggregate(
            RequestKind::GenerateCode,
            "fizzbuzz",
            vec![ProviderResponse::new(ProviderId::DeepSeek, "fn main() {}", 0.94)],
            vec![],
            &AgreementThresholds::default(),
        )
        .unwrap();
        OperationOutcome::Completed(Arc::new(result))
    }

    #[test]
    fn test_completed_summary() {
        let record = OperationRecord::new(1, RequestKind::GenerateCode, "fizzbuzz", completed());
        let summary = record.summary();

        assert_eq!(summary.status, OperationStatus::Succeeded);
        assert_eq!(summary.best_provider, Some(ProviderId::DeepSeek));
        assert_eq!(summary.mean_confidence, Some(0.94));
        assert_eq!(summary.agreement, Some(Agreement::High));
        assert!(summary.error.is_none());
    }

    #[test]
    fn test_failed_summary() {
        let record = OperationRecord::new(
            2,
            RequestKind::AnswerQuestion,
            "why?",
            OperationOutcome::Failed {
                error: "No providers responded".to_string(),
            },
        );
        let summary = record.summary();

        assert_eq!(summary.status, OperationStatus::Failed);
        assert!(record.result().is_none());
        assert!(summary.best_provider.is_none());
        assert_eq!(summary.error.as_deref(), Some("No providers responded"));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["status"], "failed");
        assert!(json.get("agreement").is_none());
    }

    #[test]
    fn test_input_preview_is_truncated() {
        let long_input = "x".repeat(500);
        let record = OperationRecord::new(3, RequestKind::AnalyzeCode, long_input, completed());
        assert_eq!(record.summary().input_preview.len(), INPUT_PREVIEW_BYTES);
    }

    #[test]
    fn test_stats_count_by_status() {
        let mut stats = OperationStats::default();
        stats.count(OperationStatus::Succeeded);
        stats.count(OperationStatus::Failed);
        stats.count(OperationStatus::Succeeded);

        assert_eq!(
            stats,
            OperationStats {
                total: 3,
                succeeded: 2,
                failed: 1
            }
        );
    }
}
