//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL journal of dispatch outcomes
    pub journal: Option<String>,
    /// Directory for daily-rolling diagnostic logs
    pub directory: Option<String>,
}
