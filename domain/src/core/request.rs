//! Request kind value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The operation a council request asks every provider to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Produce code for a prompt
    GenerateCode,
    /// Review a piece of code
    AnalyzeCode,
    /// Answer a free-form question
    AnswerQuestion,
}

impl RequestKind {
    pub const ALL: [RequestKind; 3] = [
        RequestKind::GenerateCode,
        RequestKind::AnalyzeCode,
        RequestKind::AnswerQuestion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::GenerateCode => "generate_code",
            RequestKind::AnalyzeCode => "analyze_code",
            RequestKind::AnswerQuestion => "answer_question",
        }
    }

    /// Short label used in console output
    pub fn label(&self) -> &'static str {
        match self {
            RequestKind::GenerateCode => "Code Generation",
            RequestKind::AnalyzeCode => "Code Analysis",
            RequestKind::AnswerQuestion => "Question",
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generate_code" | "generate" | "code" => Ok(RequestKind::GenerateCode),
            "analyze_code" | "analyze" | "review" => Ok(RequestKind::AnalyzeCode),
            "answer_question" | "ask" | "question" => Ok(RequestKind::AnswerQuestion),
            other => Err(DomainError::UnknownRequestKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("code".parse::<RequestKind>().unwrap(), RequestKind::GenerateCode);
        assert_eq!("review".parse::<RequestKind>().unwrap(), RequestKind::AnalyzeCode);
        assert_eq!(
            "answer_question".parse::<RequestKind>().unwrap(),
            RequestKind::AnswerQuestion
        );
        assert!("deploy".parse::<RequestKind>().is_err());
    }

    #[test]
    fn test_serialize_snake_case() {
        let json = serde_json::to_string(&RequestKind::AnalyzeCode).unwrap();
        assert_eq!(json, "\"analyze_code\"");
    }
}
