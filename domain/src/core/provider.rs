//! Provider identity value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identity of an AI provider that can sit on the council (Value Object)
///
/// The set is closed. Declaration order is the enumeration order used to
/// break confidence ties, and `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Claude,
    DeepSeek,
    Perplexity,
    Gemini,
    Grok,
}

impl ProviderId {
    /// Every provider, in enumeration order
    pub const ALL: [ProviderId; 5] = [
        ProviderId::Claude,
        ProviderId::DeepSeek,
        ProviderId::Perplexity,
        ProviderId::Gemini,
        ProviderId::Grok,
    ];

    /// Get the string identifier for this provider
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Claude => "claude",
            ProviderId::DeepSeek => "deepseek",
            ProviderId::Perplexity => "perplexity",
            ProviderId::Gemini => "gemini",
            ProviderId::Grok => "grok",
        }
    }

    /// Human-facing name (e.g. "DeepSeek")
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::Claude => "Claude",
            ProviderId::DeepSeek => "DeepSeek",
            ProviderId::Perplexity => "Perplexity",
            ProviderId::Gemini => "Gemini",
            ProviderId::Grok => "Grok",
        }
    }

    /// Position in the enumeration order
    pub fn position(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ProviderId::ALL
            .into_iter()
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownProvider(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("DeepSeek".parse::<ProviderId>().unwrap(), ProviderId::DeepSeek);
        assert_eq!(" grok ".parse::<ProviderId>().unwrap(), ProviderId::Grok);
    }

    #[test]
    fn test_parse_unknown_provider() {
        let err = "chatgpt".parse::<ProviderId>().unwrap_err();
        assert_eq!(err, DomainError::UnknownProvider("chatgpt".to_string()));
    }

    #[test]
    fn test_enumeration_order_matches_ord() {
        let mut shuffled = vec![ProviderId::Grok, ProviderId::Claude, ProviderId::Gemini];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![ProviderId::Claude, ProviderId::Gemini, ProviderId::Grok]
        );
        assert_eq!(ProviderId::Claude.position(), 0);
        assert_eq!(ProviderId::Grok.position(), 4);
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&ProviderId::DeepSeek).unwrap();
        assert_eq!(json, "\"deepseek\"");
    }
}
