//! Council configuration from TOML (`[council]` section)
//!
//! ```toml
//! [council]
//! timeout_ms = 5000
//! recent_limit = 10
//! enabled = ["claude", "deepseek"]
//!
//! [council.thresholds]
//! high = 0.85
//! medium = 0.75
//! ```

use super::ConfigValidationError;
use council_application::CouncilConfig;
use council_application::config::council_config::{DEFAULT_PROVIDER_TIMEOUT, DEFAULT_RECENT_LIMIT};
use council_domain::{AgreementThresholds, ProviderId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Per-provider timeout in milliseconds
    pub timeout_ms: u64,
    /// Operations shown by `status`
    pub recent_limit: usize,
    pub thresholds: AgreementThresholds,
    /// Providers enabled at start; all of them when absent
    pub enabled: Option<Vec<String>>,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_PROVIDER_TIMEOUT.as_millis() as u64,
            recent_limit: DEFAULT_RECENT_LIMIT,
            thresholds: AgreementThresholds::default(),
            enabled: None,
        }
    }
}

impl FileCouncilConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.timeout_ms == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if !self.thresholds.is_ordered() {
            return Err(ConfigValidationError::ThresholdsOutOfOrder {
                high: self.thresholds.high,
                medium: self.thresholds.medium,
            });
        }
        self.parse_enabled()?;
        Ok(())
    }

    /// Parse the `enabled` list into provider ids
    pub fn parse_enabled(&self) -> Result<Option<Vec<ProviderId>>, ConfigValidationError> {
        self.enabled
            .as_ref()
            .map(|names| {
                names
                    .iter()
                    .map(|name| {
                        name.parse()
                            .map_err(|_| ConfigValidationError::UnknownProvider(name.clone()))
                    })
                    .collect()
            })
            .transpose()
    }

    pub fn to_council_config(&self) -> CouncilConfig {
        CouncilConfig::default()
            .with_provider_timeout(Duration::from_millis(self.timeout_ms))
            .with_thresholds(self.thresholds)
            .with_recent_limit(self.recent_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_out_of_order() {
        let config = FileCouncilConfig {
            thresholds: AgreementThresholds::new(0.7, 0.8),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ThresholdsOutOfOrder {
                high: 0.7,
                medium: 0.8
            })
        );
    }

    #[test]
    fn test_unknown_enabled_provider() {
        let config = FileCouncilConfig {
            enabled: Some(vec!["claude".to_string(), "bard".to_string()]),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::UnknownProvider("bard".to_string()))
        );
    }

    #[test]
    fn test_partial_thresholds_keep_defaults() {
        let config: FileCouncilConfig = toml::from_str("[thresholds]\nhigh = 0.9\n").unwrap();
        assert_eq!(config.thresholds.high, 0.9);
        assert_eq!(config.thresholds.medium, 0.75);
        assert_eq!(config.timeout_ms, 5000);
    }
}
