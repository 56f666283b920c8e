//! Chat session: executes parsed chat commands against the council

use crate::chat::command::{ChatCommand, HELP_TEXT};
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressReporter;
use council_application::{
    DispatchConsensusUseCase, DispatchError, DispatchInput, PersonaSink, ProviderRegistry,
    ReportStatusUseCase,
};
use council_domain::persona::DEFAULT_REFLECTION_SIGNIFICANCE;
use council_domain::OutputFormat;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Text produced by one command
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub text: String,
    /// The session should end
    pub quit: bool,
}

impl ChatReply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }
}

pub struct ChatSession {
    dispatch: Arc<DispatchConsensusUseCase>,
    status: ReportStatusUseCase,
    registry: Arc<ProviderRegistry>,
    persona: Arc<dyn PersonaSink>,
    format: OutputFormat,
    timeout: Option<Duration>,
    show_progress: bool,
}

impl ChatSession {
    pub fn new(
        dispatch: Arc<DispatchConsensusUseCase>,
        status: ReportStatusUseCase,
        registry: Arc<ProviderRegistry>,
        persona: Arc<dyn PersonaSink>,
    ) -> Self {
        Self {
            dispatch,
            status,
            registry,
            persona,
            format: OutputFormat::default(),
            timeout: None,
            show_progress: false,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Per-provider timeout for every dispatch of this session
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub async fn execute(
        &self,
        command: ChatCommand,
        cancellation: Option<CancellationToken>,
    ) -> ChatReply {
        match command {
            ChatCommand::Dispatch { kind, input } => {
                let mut request = DispatchInput::new(kind, input);
                if let Some(timeout) = self.timeout {
                    request = request.with_timeout(timeout);
                }
                if let Some(token) = cancellation {
                    request = request.with_cancellation(token);
                }
                ChatReply::text(self.dispatch(request).await)
            }
            ChatCommand::Status => {
                let snapshot = self.status.status();
                ChatReply::text(match self.format {
                    OutputFormat::Json => ConsoleFormatter::format_status_json(&snapshot),
                    _ => ConsoleFormatter::format_status(&snapshot),
                })
            }
            ChatCommand::Providers => {
                ChatReply::text(ConsoleFormatter::format_providers(&self.registry.providers()))
            }
            ChatCommand::Enable(name) => ChatReply::text(match self.registry.enable_named(&name) {
                Ok((id, true)) => format!("Enabled {}", id.display_name()),
                Ok((id, false)) => format!("{} is already enabled", id.display_name()),
                Err(e) => e.to_string(),
            }),
            ChatCommand::Disable(name) => {
                ChatReply::text(match self.registry.disable_named(&name) {
                    Ok((id, true)) => format!("Disabled {}", id.display_name()),
                    Ok((id, false)) => format!("{} is already disabled", id.display_name()),
                    Err(e) => e.to_string(),
                })
            }
            ChatCommand::Mood => ChatReply::text(match self.persona.current_mood() {
                Some(mood) => ConsoleFormatter::format_mood(&mood, &self.persona.reflections()),
                None => "Mood tracking is not enabled".to_string(),
            }),
            ChatCommand::Think(topic) => ChatReply::text(
                match self.persona.reflect(&topic, DEFAULT_REFLECTION_SIGNIFICANCE) {
                    Some(reflection) => ConsoleFormatter::format_reflection(&reflection),
                    None => "Mood tracking is not enabled".to_string(),
                },
            ),
            ChatCommand::History(limit) => {
                let snapshot = match limit {
                    Some(n) => self.status.status_with_limit(n),
                    None => self.status.status(),
                };
                ChatReply::text(ConsoleFormatter::format_history(&snapshot.recent_operations))
            }
            ChatCommand::Help => ChatReply::text(HELP_TEXT),
            ChatCommand::Quit => ChatReply {
                text: "Bye!".to_string(),
                quit: true,
            },
        }
    }

    async fn dispatch(&self, request: DispatchInput) -> String {
        let result = if self.show_progress {
            let progress = ProgressReporter::new();
            self.dispatch.execute_with_progress(request, &progress).await
        } else {
            self.dispatch.execute(request).await
        };

        match result {
            Ok(result) => ConsoleFormatter::render(&result, self.format),
            Err(DispatchError::NoProvidersAvailable { failures }) => {
                ConsoleFormatter::format_no_response(&failures)
            }
            Err(DispatchError::Cancelled) => "Cancelled".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use council_application::{
        CouncilConfig, OperationRecorder, ProviderClient, ProviderError,
    };
    use council_domain::{Mood, PersonaEvent, ProviderId, ProviderResponse, Reflection, RequestKind};

    struct FixedProvider(ProviderId, f64);

    #[async_trait]
    impl ProviderClient for FixedProvider {
        fn id(&self) -> ProviderId {
            self.0
        }

        fn model(&self) -> &str {
            "fixed"
        }

        async fn generate_code(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
            Ok(ProviderResponse::new(self.0, format!("code for {prompt}"), self.1))
        }

        async fn analyze_code(&self, _code: &str) -> Result<ProviderResponse, ProviderError> {
            Ok(ProviderResponse::new(self.0, "looks fine", self.1))
        }

        async fn answer_question(&self, q: &str) -> Result<ProviderResponse, ProviderError> {
            Ok(ProviderResponse::new(self.0, format!("answer to {q}"), self.1))
        }
    }

    #[derive(Default)]
    struct FixedMood {
        reflections: std::sync::Mutex<Vec<Reflection>>,
    }

    impl PersonaSink for FixedMood {
        fn on_event(&self, _event: PersonaEvent) {}

        fn current_mood(&self) -> Option<Mood> {
            Some(Mood::default())
        }

        fn reflections(&self) -> Vec<Reflection> {
            self.reflections.lock().unwrap().clone()
        }

        fn reflect(&self, context: &str, significance: f64) -> Option<Reflection> {
            let reflection = Reflection::new(context, significance);
            self.reflections.lock().unwrap().push(reflection.clone());
            Some(reflection)
        }
    }

    fn session() -> ChatSession {
        colored::control::set_override(false);
        let registry = Arc::new(ProviderRegistry::new(vec![
            Arc::new(FixedProvider(ProviderId::Claude, 0.9)) as Arc<dyn ProviderClient>,
            Arc::new(FixedProvider(ProviderId::Gemini, 0.8)),
        ]));
        let recorder = Arc::new(OperationRecorder::new());
        let dispatch = Arc::new(DispatchConsensusUseCase::new(
            Arc::clone(&registry),
            Arc::clone(&recorder),
            CouncilConfig::default(),
        ));
        let status = ReportStatusUseCase::new(Arc::clone(&registry), recorder, 10);
        ChatSession::new(dispatch, status, registry, Arc::new(FixedMood::default()))
    }

    #[tokio::test]
    async fn test_dispatch_renders_summary() {
        let session = session();
        let reply = session
            .execute(
                ChatCommand::Dispatch {
                    kind: RequestKind::GenerateCode,
                    input: "a stack".to_string(),
                },
                None,
            )
            .await;
        assert!(reply.text.contains("code for a stack"));
        assert!(reply.text.contains("agreement medium"));
        assert!(!reply.quit);
    }

    #[tokio::test]
    async fn test_disable_everything_then_dispatch() {
        let session = session();
        assert_eq!(
            session.execute(ChatCommand::Disable("claude".into()), None).await.text,
            "Disabled Claude"
        );
        assert_eq!(
            session.execute(ChatCommand::Disable("claude".into()), None).await.text,
            "Claude is already disabled"
        );
        session.execute(ChatCommand::Disable("gemini".into()), None).await;

        let reply = session
            .execute(
                ChatCommand::Dispatch {
                    kind: RequestKind::AnswerQuestion,
                    input: "anyone?".to_string(),
                },
                None,
            )
            .await;
        assert!(reply.text.starts_with("No providers responded"));

        let history = session.execute(ChatCommand::History(None), None).await;
        assert!(history.text.contains("(none)"));
    }

    #[tokio::test]
    async fn test_unknown_provider_is_reported() {
        let session = session();
        let reply = session.execute(ChatCommand::Enable("bard".into()), None).await;
        assert_eq!(reply.text, "Unknown provider: bard");
        assert_eq!(session.registry().list_enabled().len(), 2);
    }

    #[tokio::test]
    async fn test_history_after_dispatch() {
        let session = session();
        for q in ["one", "two", "three"] {
            session
                .execute(
                    ChatCommand::Dispatch {
                        kind: RequestKind::AnswerQuestion,
                        input: q.to_string(),
                    },
                    None,
                )
                .await;
        }
        let reply = session.execute(ChatCommand::History(Some(2)), None).await;
        let lines: Vec<_> = reply.text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("#2"));
        assert!(lines[1].contains("three"));
    }

    #[tokio::test]
    async fn test_mood_help_and_quit() {
        let session = session();
        assert!(session.execute(ChatCommand::Mood, None).await.text.contains("joy"));
        assert_eq!(session.execute(ChatCommand::Help, None).await.text, HELP_TEXT);
        assert!(session.execute(ChatCommand::Quit, None).await.quit);
    }

    #[tokio::test]
    async fn test_think_shows_up_in_mood() {
        let session = session();
        let reply = session
            .execute(ChatCommand::Think("zero-cost abstractions".into()), None)
            .await;
        assert_eq!(reply.text, "  - zero-cost abstractions (0.50)\n");

        let mood = session.execute(ChatCommand::Mood, None).await;
        assert!(mood.text.contains("Reflections"));
        assert!(mood.text.contains("zero-cost abstractions"));
    }

    #[tokio::test]
    async fn test_think_without_persona() {
        let session = session();
        let session = ChatSession {
            persona: Arc::new(council_application::NoPersona),
            ..session
        };
        let reply = session.execute(ChatCommand::Think("anything".into()), None).await;
        assert_eq!(reply.text, "Mood tracking is not enabled");
    }

    #[tokio::test]
    async fn test_cancelled_dispatch() {
        let session = session();
        let token = CancellationToken::new();
        token.cancel();
        let reply = session
            .execute(
                ChatCommand::Dispatch {
                    kind: RequestKind::AnalyzeCode,
                    input: "fn main() {}".to_string(),
                },
                Some(token),
            )
            .await;
        assert_eq!(reply.text, "Cancelled");
    }
}
