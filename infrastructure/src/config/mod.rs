//! Configuration file loading for ai-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COUNCIL_` prefixed environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./council.toml` or `./.council.toml`
//! 4. Global: `$XDG_CONFIG_HOME/ai-council/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfidenceTable, FileConfig, FileCouncilConfig,
    FileLoggingConfig, FileOutputConfig, FileOutputFormat, FileProviderConfig, FileReplConfig,
};
pub use loader::ConfigLoader;
