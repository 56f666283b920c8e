//! Provider client port
//!
//! Defines the interface every council provider implements, simulated or
//! real. Implementations (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use council_domain::{ProviderId, ProviderResponse, RequestKind};
use std::time::Duration;
use thiserror::Error;

/// Errors a single provider can report.
///
/// These never abort a council dispatch; the orchestrator records them per
/// provider and leaves the provider out of the aggregate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Not authenticated: {0} has no credential")]
    NotAuthenticated(ProviderId),

    #[error("Provider unavailable: timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
}

impl ProviderError {
    /// Whether the provider could not produce a response (failure or timeout)
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ProviderError::Unavailable(_) | ProviderError::Timeout(_))
    }
}

/// A single AI provider on the council
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Identity of this provider
    fn id(&self) -> ProviderId;

    /// Declared model label (display only)
    fn model(&self) -> &str;

    /// Generate code for a prompt
    async fn generate_code(&self, prompt: &str) -> Result<ProviderResponse, ProviderError>;

    /// Review a piece of code
    async fn analyze_code(&self, code: &str) -> Result<ProviderResponse, ProviderError>;

    /// Answer a question
    async fn answer_question(&self, question: &str) -> Result<ProviderResponse, ProviderError>;

    /// Route a request to the operation matching `kind`
    async fn respond(
        &self,
        kind: RequestKind,
        input: &str,
    ) -> Result<ProviderResponse, ProviderError> {
        match kind {
            RequestKind::GenerateCode => self.generate_code(input).await,
            RequestKind::AnalyzeCode => self.analyze_code(input).await,
            RequestKind::AnswerQuestion => self.answer_question(input).await,
        }
    }
}
