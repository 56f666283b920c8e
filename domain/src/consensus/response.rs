//! Per-provider response value objects

use crate::core::error::DomainError;
use crate::core::provider::ProviderId;
use crate::util::current_timestamp_ms;
use serde::{Deserialize, Serialize};

/// Check that a confidence value lies in [0, 1]
pub fn validate_confidence(confidence: f64) -> Result<f64, DomainError> {
    if (0.0..=1.0).contains(&confidence) {
        Ok(confidence)
    } else {
        Err(DomainError::InvalidConfidence(confidence))
    }
}

/// Response from a single provider for a single request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// The provider that produced this response
    pub provider: ProviderId,
    /// Response text
    pub content: String,
    /// Self-reported confidence in [0, 1]
    pub confidence: f64,
    /// Creation time (milliseconds since epoch)
    pub timestamp: u64,
    /// Why the provider is suited to this kind of request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl ProviderResponse {
    /// Creates a response stamped with the current time.
    ///
    /// Confidence is clamped into [0, 1]; NaN becomes 0.
    pub fn new(provider: ProviderId, content: impl Into<String>, confidence: f64) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };

        Self {
            provider,
            content: content.into(),
            confidence,
            timestamp: current_timestamp_ms(),
            rationale: None,
        }
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }
}

/// A dispatched provider that did not produce a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderFailure {
    pub provider: ProviderId,
    pub reason: String,
}

impl ProviderFailure {
    pub fn new(provider: ProviderId, reason: impl Into<String>) -> Self {
        Self {
            provider,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(ProviderResponse::new(ProviderId::Grok, "x", 1.4).confidence, 1.0);
        assert_eq!(ProviderResponse::new(ProviderId::Grok, "x", -0.1).confidence, 0.0);
        assert_eq!(ProviderResponse::new(ProviderId::Grok, "x", f64::NAN).confidence, 0.0);
    }

    #[test]
    fn test_validate_confidence() {
        assert_eq!(validate_confidence(0.92), Ok(0.92));
        assert_eq!(validate_confidence(1.0), Ok(1.0));
        assert!(validate_confidence(1.01).is_err());
        assert!(validate_confidence(f64::NAN).is_err());
    }

    #[test]
    fn test_rationale_skipped_when_absent() {
        let response = ProviderResponse::new(ProviderId::Claude, "answer", 0.9);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("rationale").is_none());

        let response = response.with_rationale("strong reasoning");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["rationale"], "strong reasoning");
    }
}
