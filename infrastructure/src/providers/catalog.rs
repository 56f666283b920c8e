//! Built-in council members
//!
//! Models, confidence tables and canned content of the five default
//! providers. Everything here can be overridden from `[providers.<id>]`.

use super::simulated::SimulatedProvider;
use council_application::{ProviderClient, ProviderRegistry};
use council_domain::{CredentialSource, KindTable, ProviderId, ProviderProfile};
use std::sync::Arc;

/// Environment variable conventionally holding a provider's key
pub fn default_api_key_env(id: ProviderId) -> &'static str {
    match id {
        ProviderId::Claude => "ANTHROPIC_API_KEY",
        ProviderId::DeepSeek => "DEEPSEEK_API_KEY",
        ProviderId::Perplexity => "PERPLEXITY_API_KEY",
        ProviderId::Gemini => "GEMINI_API_KEY",
        ProviderId::Grok => "XAI_API_KEY",
    }
}

/// Default profile of one provider
pub fn builtin_profile(id: ProviderId) -> ProviderProfile {
    let name = id.display_name();
    let (model, confidence, solution, analysis, answer_note) = match id {
        ProviderId::Claude => (
            "claude-3-opus",
            KindTable::new(0.92, 0.88, 0.90),
            "solution",
            "Code quality: 8.5/10\n- Good structure\n- Could improve error handling",
            "[Detailed analysis would go here]",
        ),
        ProviderId::DeepSeek => (
            "deepseek-coder",
            KindTable::new(0.94, 0.91, 0.89),
            "optimized_solution",
            "Performance analysis: Optimized for speed\n- Time complexity: O(n)\n- Space complexity: O(1)",
            "[Technical deep-dive would go here]",
        ),
        ProviderId::Perplexity => (
            "perplexity-pro",
            KindTable::new(0.85, 0.87, 0.91),
            "solution",
            "Code review with research context: [Analysis with sources would go here]",
            "[Research-backed answer with sources]",
        ),
        ProviderId::Gemini => (
            "gemini-pro",
            KindTable::new(0.88, 0.86, 0.88),
            "solution",
            "Code analysis: [Comprehensive analysis would go here]",
            "[Balanced answer would go here]",
        ),
        ProviderId::Grok => (
            "grok-1",
            KindTable::new(0.90, 0.87, 0.89),
            "solution",
            "Code analysis with creative insights: [Analysis would go here]",
            "[Creative, witty answer would go here]",
        ),
    };

    let rationale = match id {
        ProviderId::Claude => [
            "Claude excels at code generation with strong reasoning",
            "Claude provides detailed code analysis",
            "Claude provides comprehensive, nuanced answers",
        ],
        ProviderId::DeepSeek => [
            "DeepSeek specializes in technical and code-related tasks",
            "DeepSeek excels at performance and optimization analysis",
            "DeepSeek provides technical depth",
        ],
        ProviderId::Perplexity => [
            "Perplexity provides research-backed solutions",
            "Perplexity excels at research and context",
            "Perplexity provides well-researched answers",
        ],
        ProviderId::Gemini => [
            "Gemini provides versatile code generation",
            "Gemini provides balanced analysis",
            "Gemini provides balanced, thoughtful answers",
        ],
        ProviderId::Grok => [
            "Grok provides creative and unconventional solutions",
            "Grok provides creative analysis perspectives",
            "Grok provides creative, sometimes irreverent answers",
        ],
    }
    .map(|r| Some(r.to_string()));
    let [generate, analyze, answer] = rationale;

    let mut profile = ProviderProfile::new(id, model, 0.0);
    profile.confidence = confidence;
    profile.content = KindTable::new(
        format!("# {name}-generated code for: {{input}}\n\ndef {solution}():\n    pass"),
        analysis.to_string(),
        format!("{name}'s answer to '{{input}}': {answer_note}"),
    );
    profile.rationale = KindTable::new(generate, analyze, answer);
    profile.with_credentials(CredentialSource {
        api_key_env: Some(default_api_key_env(id).to_string()),
        api_key: None,
        required: false,
    })
}

/// Default profiles of all providers, in enumeration order
pub fn builtin_profiles() -> Vec<ProviderProfile> {
    ProviderId::ALL.iter().map(|id| builtin_profile(*id)).collect()
}

/// Build a registry of simulated providers
///
/// `enabled` restricts the initially enabled set; `None` enables everything.
pub fn build_registry(
    profiles: impl IntoIterator<Item = ProviderProfile>,
    enabled: Option<&[ProviderId]>,
) -> ProviderRegistry {
    let clients: Vec<Arc<dyn ProviderClient>> = profiles
        .into_iter()
        .map(|p| SimulatedProvider::new(p).into_client())
        .collect();
    let registry = ProviderRegistry::new(clients);
    match enabled {
        Some(ids) => registry.with_enabled(ids.iter().copied()),
        None => registry,
    }
}
