//! Provider profile types (provider-neutral, serde-free).
//!
//! A [`ProviderProfile`] carries everything a simulated provider needs to
//! answer requests: model label, per-kind confidence and content templates,
//! and the optional latency, failure and credential settings used to
//! exercise the orchestrator.

use crate::core::provider::ProviderId;
use crate::core::request::RequestKind;
use std::time::Duration;

/// Placeholder substituted with the request input in content templates
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// One value per [`RequestKind`]
#[derive(Debug, Clone, PartialEq)]
pub struct KindTable<T> {
    pub generate_code: T,
    pub analyze_code: T,
    pub answer_question: T,
}

impl<T> KindTable<T> {
    pub fn new(generate_code: T, analyze_code: T, answer_question: T) -> Self {
        Self {
            generate_code,
            analyze_code,
            answer_question,
        }
    }

    pub fn get(&self, kind: RequestKind) -> &T {
        match kind {
            RequestKind::GenerateCode => &self.generate_code,
            RequestKind::AnalyzeCode => &self.analyze_code,
            RequestKind::AnswerQuestion => &self.answer_question,
        }
    }

    pub fn get_mut(&mut self, kind: RequestKind) -> &mut T {
        match kind {
            RequestKind::GenerateCode => &mut self.generate_code,
            RequestKind::AnalyzeCode => &mut self.analyze_code,
            RequestKind::AnswerQuestion => &mut self.answer_question,
        }
    }
}

impl<T: Clone> KindTable<T> {
    /// Same value for every kind
    pub fn uniform(value: T) -> Self {
        Self::new(value.clone(), value.clone(), value)
    }
}

/// Where a provider's credential comes from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CredentialSource {
    /// Environment variable holding the key
    pub api_key_env: Option<String>,
    /// Inline key
    pub api_key: Option<String>,
    /// Refuse to answer when no key resolves
    pub required: bool,
}

/// Configuration of one simulated provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderProfile {
    pub id: ProviderId,
    /// Declared model label (display only)
    pub model: String,
    pub confidence: KindTable<f64>,
    /// Content templates; `{input}` is replaced by the request input
    pub content: KindTable<String>,
    pub rationale: KindTable<Option<String>>,
    /// Artificial delay before answering
    pub latency: Option<Duration>,
    /// When set, every request fails as unavailable with this reason
    pub failure: Option<String>,
    pub credentials: CredentialSource,
}

impl ProviderProfile {
    /// Minimal profile with a uniform confidence and generic content
    pub fn new(id: ProviderId, model: impl Into<String>, confidence: f64) -> Self {
        let name = id.display_name();
        Self {
            id,
            model: model.into(),
            confidence: KindTable::uniform(confidence),
            content: KindTable::new(
                format!("# {name}-generated code for: {INPUT_PLACEHOLDER}"),
                format!("{name} analysis of the submitted code"),
                format!("{name}'s answer to '{INPUT_PLACEHOLDER}'"),
            ),
            rationale: KindTable::uniform(None),
            latency: None,
            failure: None,
            credentials: CredentialSource::default(),
        }
    }

    pub fn with_confidence(mut self, kind: RequestKind, confidence: f64) -> Self {
        *self.confidence.get_mut(kind) = confidence;
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_failure(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }

    pub fn with_credentials(mut self, credentials: CredentialSource) -> Self {
        self.credentials = credentials;
        self
    }

    /// Content for `kind` with the input substituted
    pub fn render(&self, kind: RequestKind, input: &str) -> String {
        self.content.get(kind).replace(INPUT_PLACEHOLDER, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_input() {
        let profile = ProviderProfile::new(ProviderId::Grok, "grok-1", 0.9);
        assert_eq!(
            profile.render(RequestKind::AnswerQuestion, "why?"),
            "Grok's answer to 'why?'"
        );
        assert_eq!(
            profile.render(RequestKind::AnalyzeCode, "fn x() {}"),
            "Grok analysis of the submitted code"
        );
    }

    #[test]
    fn test_with_confidence_targets_one_kind() {
        let profile = ProviderProfile::new(ProviderId::Claude, "claude-3-opus", 0.9)
            .with_confidence(RequestKind::AnalyzeCode, 0.5);
        assert_eq!(*profile.confidence.get(RequestKind::AnalyzeCode), 0.5);
        assert_eq!(*profile.confidence.get(RequestKind::GenerateCode), 0.9);
    }
}
