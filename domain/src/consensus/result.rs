//! Consensus aggregation
//!
//! [`ConsensusResult::aggregate`] turns the successful responses of one
//! council request into a best pick plus a [`ConsensusSummary`].

use super::agreement::{Agreement, AgreementThresholds};
use super::response::{ProviderFailure, ProviderResponse};
use crate::core::error::DomainError;
use crate::core::provider::ProviderId;
use crate::core::request::RequestKind;
use crate::util::current_timestamp_ms;
use serde::{Deserialize, Serialize};

/// Decimal places kept on the mean confidence.
///
/// Summing binary floats drifts in the last bit (0.9 + 0.8 is not 1.7), which
/// would flip a mean that sits exactly on a threshold.
const MEAN_PRECISION: f64 = 1e10;

/// Aggregate figures over the successful responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusSummary {
    /// Arithmetic mean of the successful responses' confidence
    pub mean_confidence: f64,
    /// Threshold class of `mean_confidence`
    pub agreement: Agreement,
    /// Number of providers that responded
    pub responded: usize,
    /// Number of providers that were dispatched but failed
    pub failed: usize,
}

/// Complete, immutable result of one council request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub kind: RequestKind,
    /// The prompt, code or question that was dispatched
    pub input: String,
    /// Successful responses, in provider enumeration order
    pub responses: Vec<ProviderResponse>,
    /// Dispatched providers that did not respond
    #[serde(default)]
    pub failures: Vec<ProviderFailure>,
    /// Highest-confidence response
    pub best: ProviderResponse,
    pub summary: ConsensusSummary,
    /// Completion time (milliseconds since epoch)
    pub timestamp: u64,
}

impl ConsensusResult {
    /// Aggregate responses into a result.
    ///
    /// The best response is the one with maximal confidence; ties go to the
    /// provider earliest in enumeration order. Failures are carried along for
    /// display but never enter the mean.
    ///
    /// Returns [`DomainError::NoProvidersAvailable`] when `responses` is empty.
    pub fn aggregate(
        kind: RequestKind,
        input: impl Into<String>,
        mut responses: Vec<ProviderResponse>,
        mut failures: Vec<ProviderFailure>,
        thresholds: &AgreementThresholds,
    ) -> Result<Self, DomainError> {
        responses.sort_by_key(|r| r.provider);
        failures.sort_by_key(|f| f.provider);

        let best = select_best(&responses)
            .cloned()
            .ok_or(DomainError::NoProvidersAvailable)?;

        let mean_confidence = mean_confidence(&responses);
        let summary = ConsensusSummary {
            mean_confidence,
            agreement: thresholds.classify(mean_confidence),
            responded: responses.len(),
            failed: failures.len(),
        };

        Ok(Self {
            kind,
            input: input.into(),
            responses,
            failures,
            best,
            summary,
            timestamp: current_timestamp_ms(),
        })
    }

    pub fn mean_confidence(&self) -> f64 {
        self.summary.mean_confidence
    }

    pub fn agreement(&self) -> Agreement {
        self.summary.agreement
    }

    /// Providers that took part in this result, responded or not
    pub fn participants(&self) -> Vec<ProviderId> {
        let mut ids: Vec<_> = self
            .responses
            .iter()
            .map(|r| r.provider)
            .chain(self.failures.iter().map(|f| f.provider))
            .collect();
        ids.sort();
        ids
    }
}

/// First response with maximal confidence.
///
/// Expects `responses` in enumeration order; a later response only wins on a
/// strictly greater confidence.
fn select_best(responses: &[ProviderResponse]) -> Option<&ProviderResponse> {
    responses.iter().fold(None, |best, candidate| match best {
        Some(current) if candidate.confidence <= current.confidence => Some(current),
        _ => Some(candidate),
    })
}

fn mean_confidence(responses: &[ProviderResponse]) -> f64 {
    if responses.is_empty() {
        return 0.0;
    }
    let sum: f64 = responses.iter().map(|r| r.confidence).sum();
    let mean = sum / responses.len() as f64;
    (mean * MEAN_PRECISION).round() / MEAN_PRECISION
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(provider: ProviderId, confidence: f64) -> ProviderResponse {
        ProviderResponse::new(provider, format!("{} says hi", provider), confidence)
    }

    fn aggregate(
        responses: Vec<ProviderResponse>,
        failures: Vec<ProviderFailure>,
    ) -> Result<ConsensusResult, DomainError> {
        ConsensusResult::aggregate(
            RequestKind::AnswerQuestion,
            "what is rust?",
            responses,
            failures,
            &AgreementThresholds::default(),
        )
    }

    #[test]
    fn test_partial_failure_sits_on_medium_boundary() {
        let result = aggregate(
            vec![
                response(ProviderId::Claude, 0.9),
                response(ProviderId::DeepSeek, 0.8),
            ],
            vec![ProviderFailure::new(ProviderId::Perplexity, "timed out")],
        )
        .unwrap();

        assert_eq!(result.responses.len(), 2);
        assert_eq!(result.best.provider, ProviderId::Claude);
        assert_eq!(result.mean_confidence(), 0.85);
        assert_eq!(result.agreement(), Agreement::Medium);
        assert_eq!(result.summary.failed, 1);
    }

    #[test]
    fn test_single_response() {
        let result = aggregate(vec![response(ProviderId::Gemini, 0.95)], vec![]).unwrap();

        assert_eq!(result.best.provider, ProviderId::Gemini);
        assert_eq!(result.mean_confidence(), 0.95);
        assert_eq!(result.agreement(), Agreement::High);
    }

    #[test]
    fn test_tie_goes_to_enumeration_order() {
        // Arrival order should not matter
        let result = aggregate(
            vec![
                response(ProviderId::Grok, 0.9),
                response(ProviderId::Perplexity, 0.9),
                response(ProviderId::Gemini, 0.7),
            ],
            vec![],
        )
        .unwrap();

        assert_eq!(result.best.provider, ProviderId::Perplexity);
        assert_eq!(
            result.responses.iter().map(|r| r.provider).collect::<Vec<_>>(),
            vec![ProviderId::Perplexity, ProviderId::Gemini, ProviderId::Grok]
        );
    }

    #[test]
    fn test_best_is_maximum() {
        let result = aggregate(
            vec![
                response(ProviderId::Claude, 0.5),
                response(ProviderId::DeepSeek, 0.6),
                response(ProviderId::Grok, 0.99),
            ],
            vec![],
        )
        .unwrap();

        let max = result
            .responses
            .iter()
            .map(|r| r.confidence)
            .fold(f64::MIN, f64::max);
        assert_eq!(result.best.confidence, max);
        assert_eq!(result.best.provider, ProviderId::Grok);
    }

    #[test]
    fn test_mean_excludes_failures() {
        let result = aggregate(
            vec![
                response(ProviderId::Claude, 0.6),
                response(ProviderId::Gemini, 0.7),
            ],
            vec![
                ProviderFailure::new(ProviderId::DeepSeek, "unavailable"),
                ProviderFailure::new(ProviderId::Grok, "unavailable"),
            ],
        )
        .unwrap();

        assert!((result.mean_confidence() - 0.65).abs() < 1e-9);
        assert_eq!(result.agreement(), Agreement::Low);
    }

    #[test]
    fn test_lower_boundary_is_low() {
        let result = aggregate(
            vec![
                response(ProviderId::Claude, 0.7),
                response(ProviderId::DeepSeek, 0.8),
            ],
            vec![],
        )
        .unwrap();

        assert_eq!(result.mean_confidence(), 0.75);
        assert_eq!(result.agreement(), Agreement::Low);
    }

    #[test]
    fn test_empty_responses_fail() {
        let err = aggregate(
            vec![],
            vec![ProviderFailure::new(ProviderId::Claude, "down")],
        )
        .unwrap_err();
        assert_eq!(err, DomainError::NoProvidersAvailable);
    }

    #[test]
    fn test_participants_include_failures() {
        let result = aggregate(
            vec![response(ProviderId::Grok, 0.9)],
            vec![ProviderFailure::new(ProviderId::Claude, "down")],
        )
        .unwrap();
        assert_eq!(
            result.participants(),
            vec![ProviderId::Claude, ProviderId::Grok]
        );
    }

    #[test]
    fn test_json_round_trip_preserves_fields() {
        let result = aggregate(
            vec![
                response(ProviderId::Claude, 0.92).with_rationale("careful"),
                response(ProviderId::DeepSeek, 0.123_456_789_012_345),
            ],
            vec![ProviderFailure::new(ProviderId::Grok, "timed out after 50ms")],
        )
        .unwrap();

        let json = serde_json::to_string(&result).unwrap();
        let back: ConsensusResult = serde_json::from_str(&json).unwrap();

        assert_eq!(back, result);
        assert_eq!(back.responses[1].confidence, 0.123_456_789_012_345);
    }
}
