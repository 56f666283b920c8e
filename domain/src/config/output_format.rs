//! Output format value object

use serde::{Deserialize, Serialize};

/// How council results are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every provider response plus the consensus
    Full,
    /// Best response and consensus line only (default)
    #[default]
    Summary,
    /// JSON output
    Json,
}
