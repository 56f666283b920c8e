//! Test doubles shared by the application tests

use crate::ports::operation_journal::{JournalEvent, OperationJournal};
use crate::ports::persona_sink::PersonaSink;
use crate::ports::provider_client::{ProviderClient, ProviderError};
use async_trait::async_trait;
use council_domain::{PersonaEvent, ProviderId, ProviderResponse, RequestKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scriptable provider
pub(crate) struct MockProvider {
    id: ProviderId,
    model: String,
    confidence: f64,
    delay: Option<Duration>,
    error: Option<ProviderError>,
    panics: bool,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    pub(crate) fn new(id: ProviderId, confidence: f64) -> Self {
        Self {
            id,
            model: format!("{}-mock", id),
            confidence,
            delay: None,
            error: None,
            panics: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn failing(mut self, error: ProviderError) -> Self {
        self.error = Some(error);
        self
    }

    pub(crate) fn panicking(mut self) -> Self {
        self.panics = true;
        self
    }

    /// Shared counter of invocations
    pub(crate) fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub(crate) fn into_client(self) -> Arc<dyn ProviderClient> {
        Arc::new(self)
    }

    async fn answer(&self, kind: RequestKind, input: &str) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.panics {
            panic!("{} blew up", self.id);
        }
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        Ok(ProviderResponse::new(
            self.id,
            format!("{} {}: {}", self.id, kind, input),
            self.confidence,
        ))
    }
}

#[async_trait]
impl ProviderClient for MockProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn model(&self) -> &str {
        &self.model
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

/// Journal that keeps event types in memory
#[derive(Default)]
pub(crate) struct MemoryJournal {
    pub(crate) events: Mutex<Vec<(String, serde_json::Value)>>,
}

impl OperationJournal for MemoryJournal {
    fn log(&self, event: JournalEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type.to_string(), event.payload));
    }
}

/// Persona sink that keeps events in memory
#[derive(Default)]
pub(crate) struct MemoryPersona {
    pub(crate) events: Mutex<Vec<PersonaEvent>>,
}

impl PersonaSink for MemoryPersona {
    fn on_event(&self, event: PersonaEvent) {
        self.events.lock().unwrap().push(event);
    }
}
