//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application and domain
//! types after validation.

mod council;
mod logging;
mod output;
mod providers;
mod repl;

pub use council::FileCouncilConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use providers::{FileConfidenceTable, FileProviderConfig};
pub use repl::FileReplConfig;

use crate::providers::catalog::builtin_profiles;
use council_application::CouncilConfig;
use council_domain::{ProviderId, ProviderProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("council.timeout_ms cannot be 0")]
    InvalidTimeout,

    #[error("providers.{provider}: confidence {value} is outside [0, 1]")]
    InvalidConfidence { provider: String, value: f64 },

    #[error("council.thresholds: high ({high}) must be above medium ({medium}), both within [0, 1]")]
    ThresholdsOutOfOrder { high: f64, medium: f64 },

    #[error("unknown provider '{0}' in configuration")]
    UnknownProvider(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Dispatch settings
    pub council: FileCouncilConfig,
    /// Per-provider overrides keyed by provider name
    pub providers: BTreeMap<String, FileProviderConfig>,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Journal and log file settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.council.validate()?;

        for (name, provider) in &self.providers {
            name.parse::<ProviderId>()
                .map_err(|_| ConfigValidationError::UnknownProvider(name.clone()))?;
            provider.validate(name)?;
        }

        Ok(())
    }

    /// Application config for the dispatch use case
    pub fn council_config(&self) -> CouncilConfig {
        self.council.to_council_config()
    }

    /// Built-in profiles with the `[providers.<id>]` overrides applied
    pub fn provider_profiles(&self) -> Result<Vec<ProviderProfile>, ConfigValidationError> {
        let mut overrides = BTreeMap::new();
        for (name, provider) in &self.providers {
            let id: ProviderId = name
                .parse()
                .map_err(|_| ConfigValidationError::UnknownProvider(name.clone()))?;
            overrides.insert(id, provider);
        }

        Ok(builtin_profiles()
            .into_iter()
            .map(|profile| match overrides.get(&profile.id) {
                Some(provider) => provider.apply(profile),
                None => profile,
            })
            .collect())
    }
}
