//! Agreement classification
//!
//! The mean confidence of a council request is bucketed into a three-level
//! [`Agreement`] label. The cut-off points live in [`AgreementThresholds`] so
//! they can be tuned from configuration.

use serde::{Deserialize, Serialize};

/// Three-level agreement label derived from mean confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Agreement {
    Low,
    Medium,
    High,
}

impl Agreement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Agreement::Low => "low",
            Agreement::Medium => "medium",
            Agreement::High => "high",
        }
    }
}

impl std::fmt::Display for Agreement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Threshold pair used by [`AgreementThresholds::classify`]
///
/// Both bounds are exclusive lower bounds:
/// - `mean > high` → [`Agreement::High`]
/// - `medium < mean <= high` → [`Agreement::Medium`]
/// - otherwise → [`Agreement::Low`]
///
/// # Example
///
/// ```
/// use council_domain::consensus::{Agreement, AgreementThresholds};
///
/// let thresholds = AgreementThresholds::default();
/// assert_eq!(thresholds.classify(0.90), Agreement::High);
/// assert_eq!(thresholds.classify(0.85), Agreement::Medium);
/// assert_eq!(thresholds.classify(0.75), Agreement::Low);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgreementThresholds {
    pub high: f64,
    pub medium: f64,
}

impl Default for AgreementThresholds {
    fn default() -> Self {
        Self {
            high: 0.85,
            medium: 0.75,
        }
    }
}

impl AgreementThresholds {
    pub fn new(high: f64, medium: f64) -> Self {
        Self { high, medium }
    }

    /// Bucket a mean confidence into an agreement label
    pub fn classify(&self, mean_confidence: f64) -> Agreement {
        if mean_confidence > self.high {
            Agreement::High
        } else if mean_confidence > self.medium {
            Agreement::Medium
        } else {
            Agreement::Low
        }
    }

    /// Thresholds are usable when both lie in [0, 1] and `medium <= high`
    pub fn is_ordered(&self) -> bool {
        (0.0..=1.0).contains(&self.medium)
            && (0.0..=1.0).contains(&self.high)
            && self.medium <= self.high
    }
}
