//! Configuration-driven simulated provider
//!
//! One [`SimulatedProvider`] per council member; members differ only in
//! their [`ProviderProfile`].

use async_trait::async_trait;
use council_application::{ProviderClient, ProviderError};
use council_domain::{CredentialSource, ProviderId, ProviderProfile, ProviderResponse, RequestKind};
use std::sync::Arc;
use tracing::debug;

/// Resolve a credential: the environment variable wins over the inline key.
///
/// Empty values count as unset.
pub fn resolve_credential(
    source: &CredentialSource,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    source
        .api_key_env
        .as_deref()
        .and_then(lookup)
        .filter(|key| !key.trim().is_empty())
        .or_else(|| {
            source
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty())
        })
}

/// Provider answering from its profile without any network access
pub struct SimulatedProvider {
    profile: ProviderProfile,
    authenticated: bool,
}

impl SimulatedProvider {
    /// Build a provider, resolving credentials from the process environment
    pub fn new(profile: ProviderProfile) -> Self {
        Self::with_env(profile, |name| std::env::var(name).ok())
    }

    /// Build a provider, resolving credentials through `lookup`
    pub fn with_env(profile: ProviderProfile, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let authenticated = resolve_credential(&profile.credentials, lookup).is_some();
        if profile.credentials.required && !authenticated {
            debug!("{} has no credential and will refuse requests", profile.id);
        }
        Self {
            profile,
            authenticated,
        }
    }

    pub fn profile(&self) -> &ProviderProfile {
        &self.profile
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn into_client(self) -> Arc<dyn ProviderClient> {
        Arc::new(self)
    }

    async fn answer(&self, kind: RequestKind, input: &str) -> Result<ProviderResponse, ProviderError> {
        let profile = &self.profile;

        if profile.credentials.required && !self.authenticated {
            return Err(ProviderError::NotAuthenticated(profile.id));
        }

        if let Some(latency) = profile.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(reason) = &profile.failure {
            return Err(ProviderError::Unavailable(reason.clone()));
        }

        let confidence = *profile.confidence.get(kind);
        debug!("{} answering {} ({:.2})", profile.id, kind, confidence);

        let response = ProviderResponse::new(profile.id, profile.render(kind, input), confidence);
        Ok(match profile.rationale.get(kind) {
            Some(rationale) => response.with_rationale(rationale.clone()),
            None => response,
        })
    }
}

#[async_trait]
impl ProviderClient for SimulatedProvider {
    fn id(&self) -> ProviderId {
        self.profile.id
    }

    fn model(&self) -> &str {
        &self.profile.model
    }

    async fn generate_code(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        self.answer(RequestKind::GenerateCode, prompt).await
    }

    async fn analyze_code(&self, code: &str) -> Result<ProviderResponse, ProviderError> {
        self.answer(RequestKind::AnalyzeCode, code).await
    }

    async fn answer_question(&self, question: &str) -> Result<ProviderResponse, ProviderError> {
        self.answer(RequestKind::AnswerQuestion, question).await
    }
}
