//! Provider overrides from TOML (`[providers.<id>]` sections)
//!
//! Every field is optional; unset fields keep the built-in profile value.
//!
//! ```toml
//! [providers.perplexity]
//! model = "sonar-large"
//! latency_ms = 250
//! api_key_env = "PPLX_KEY"
//! require_credentials = true
//!
//! [providers.perplexity.confidence]
//! answer_question = 0.95
//! ```

use super::ConfigValidationError;
use council_domain::{ProviderProfile, RequestKind, validate_confidence};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-kind confidence overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfidenceTable {
    pub generate_code: Option<f64>,
    pub analyze_code: Option<f64>,
    pub answer_question: Option<f64>,
}

impl FileConfidenceTable {
    fn get(&self, kind: RequestKind) -> Option<f64> {
        match kind {
            RequestKind::GenerateCode => self.generate_code,
            RequestKind::AnalyzeCode => self.analyze_code,
            RequestKind::AnswerQuestion => self.answer_question,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Declared model label
    pub model: Option<String>,
    pub confidence: FileConfidenceTable,
    /// Simulated response latency
    pub latency_ms: Option<u64>,
    /// Force every request to fail with this reason
    pub fail: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Direct API key (prefer `api_key_env`)
    pub api_key: Option<String>,
    /// Refuse requests when no key resolves
    pub require_credentials: bool,
}

impl FileProviderConfig {
    pub fn validate(&self, name: &str) -> Result<(), ConfigValidationError> {
        for kind in RequestKind::ALL {
            if let Some(value) = self.confidence.get(kind) {
                validate_confidence(value).map_err(|_| ConfigValidationError::InvalidConfidence {
                    provider: name.to_string(),
                    value,
                })?;
            }
        }
        Ok(())
    }

    /// Overlay this section on a profile
    pub fn apply(&self, mut profile: ProviderProfile) -> ProviderProfile {
        if let Some(model) = &self.model {
            profile.model = model.clone();
        }
        for kind in RequestKind::ALL {
            if let Some(value) = self.confidence.get(kind) {
                profile = profile.with_confidence(kind, value);
            }
        }
        if let Some(ms) = self.latency_ms {
            profile = profile.with_latency(Duration::from_millis(ms));
        }
        if let Some(reason) = &self.fail {
            profile = profile.with_failure(reason.clone());
        }
        if let Some(env) = &self.api_key_env {
            profile.credentials.api_key_env = Some(env.clone());
        }
        if let Some(key) = &self.api_key {
            profile.credentials.api_key = Some(key.clone());
        }
        profile.credentials.required = self.require_credentials;
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::catalog::builtin_profile;
    use council_domain::ProviderId;

    #[test]
    fn test_empty_override_keeps_profile() {
        let profile = builtin_profile(ProviderId::Claude);
        assert_eq!(FileProviderConfig::default().apply(profile.clone()), profile);
    }

    #[test]
    fn test_credentials_override() {
        let config: FileProviderConfig = toml::from_str(
            r#"
api_key_env = "CLAUDE_KEY"
require_credentials = true
"#,
        )
        .unwrap();
        let profile = config.apply(builtin_profile(ProviderId::Claude));
        assert_eq!(profile.credentials.api_key_env.as_deref(), Some("CLAUDE_KEY"));
        assert!(profile.credentials.required);
        assert!(profile.credentials.api_key.is_none());
    }
}
