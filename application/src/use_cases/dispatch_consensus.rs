//! Dispatch Consensus use case
//!
//! Fans a request out to every enabled provider, waits for all of them and
//! folds the answers into a [`ConsensusResult`].

use crate::config::CouncilConfig;
use crate::ports::operation_journal::{JournalEvent, NoOperationJournal, OperationJournal};
use crate::ports::persona_sink::{NoPersona, PersonaSink};
use crate::ports::progress::{DispatchProgress, NoProgress};
use crate::ports::provider_client::{ProviderClient, ProviderError};
use crate::services::recorder::OperationRecorder;
use crate::services::registry::ProviderRegistry;
use council_domain::{
    Agreement, ConsensusResult, DomainError, OperationOutcome, PersonaEvent, PersonaEventKind,
    ProviderFailure, ProviderId, ProviderResponse, RequestKind,
};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur during a dispatch
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Nothing was enabled, or every dispatched provider failed
    #[error("No providers responded")]
    NoProvidersAvailable { failures: Vec<ProviderFailure> },

    #[error("Dispatch cancelled")]
    Cancelled,
}

impl DispatchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DispatchError::Cancelled)
    }
}

/// Input for the DispatchConsensus use case
#[derive(Debug, Clone)]
pub struct DispatchInput {
    pub kind: RequestKind,
    /// Prompt, code or question, depending on `kind`
    pub input: String,
    /// Per-provider timeout for this call; falls back to the configured one
    pub timeout: Option<Duration>,
    pub cancellation: Option<CancellationToken>,
}

impl DispatchInput {
    pub fn new(kind: RequestKind, input: impl Into<String>) -> Self {
        Self {
            kind,
            input: input.into(),
            timeout: None,
            cancellation: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Cancel the dispatch when `token` fires
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Use case for dispatching a request to the council
pub struct DispatchConsensusUseCase {
    registry: Arc<ProviderRegistry>,
    recorder: Arc<OperationRecorder>,
    config: CouncilConfig,
    journal: Arc<dyn OperationJournal>,
    persona: Arc<dyn PersonaSink>,
}

impl DispatchConsensusUseCase {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        recorder: Arc<OperationRecorder>,
        config: CouncilConfig,
    ) -> Self {
        Self {
            registry,
            recorder,
            config,
            journal: Arc::new(NoOperationJournal),
            persona: Arc::new(NoPersona),
        }
    }

    /// Write every outcome to a journal
    pub fn with_journal(mut self, journal: Arc<dyn OperationJournal>) -> Self {
        self.journal = journal;
        self
    }

    /// Report outcomes to the persona layer
    pub fn with_persona(mut self, persona: Arc<dyn PersonaSink>) -> Self {
        self.persona = persona;
        self
    }

    pub fn config(&self) -> &CouncilConfig {
        &self.config
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: DispatchInput) -> Result<Arc<ConsensusResult>, DispatchError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: DispatchInput,
        progress: &dyn DispatchProgress,
    ) -> Result<Arc<ConsensusResult>, DispatchError> {
        let clients = self.registry.snapshot();
        if clients.is_empty() {
            warn!("No providers enabled, {} request not dispatched", input.kind);
            return Err(DispatchError::NoProvidersAvailable { failures: vec![] });
        }

        let provider_ids: Vec<ProviderId> = clients.iter().map(|c| c.id()).collect();
        let timeout = input.timeout.unwrap_or(self.config.provider_timeout);

        info!(
            "Dispatching {} to {} providers (timeout {}ms)",
            input.kind,
            provider_ids.len(),
            timeout.as_millis()
        );
        progress.on_dispatch_start(input.kind, &provider_ids);

        let (responses, failures) = self.collect(&input, clients, timeout, progress).await?;

        progress.on_dispatch_complete(input.kind);
        self.registry.record_requests(&provider_ids);

        match ConsensusResult::aggregate(
            input.kind,
            input.input.as_str(),
            responses,
            failures.clone(),
            &self.config.thresholds,
        ) {
            Ok(result) => Ok(self.finish_completed(input, result)),
            Err(_) => {
                self.finish_failed(&input, &failures);
                Err(DispatchError::NoProvidersAvailable { failures })
            }
        }
    }

    /// Run one task per provider and wait for all of them
    async fn collect(
        &self,
        input: &DispatchInput,
        clients: Vec<Arc<dyn ProviderClient>>,
        timeout: Duration,
        progress: &dyn DispatchProgress,
    ) -> Result<(Vec<ProviderResponse>, Vec<ProviderFailure>), DispatchError> {
        let mut join_set = JoinSet::new();

        for client in clients {
            let kind = input.kind;
            let text = input.input.clone();

            join_set.spawn(async move {
                let id = client.id();
                let result = Self::call_provider(client.as_ref(), kind, &text, timeout).await;
                (id, result)
            });
        }

        let mut responses = Vec::new();
        let mut failures = Vec::new();

        loop {
            let joined = if let Some(ref token) = input.cancellation {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        join_set.abort_all();
                        info!("Dispatch of {} cancelled", input.kind);
                        return Err(DispatchError::Cancelled);
                    }
                    joined = join_set.join_next() => joined,
                }
            } else {
                join_set.join_next().await
            };

            let Some(joined) = joined else {
                break;
            };

            match joined {
                Ok((id, Ok(response))) => {
                    debug!("Provider {} responded ({:.2})", id, response.confidence);
                    progress.on_provider_complete(id, true);
                    responses.push(response);
                }
                Ok((id, Err(e))) => {
                    if e.is_unavailable() {
                        warn!("Provider {} failed: {}", id, e);
                    } else {
                        info!("Provider {} skipped: {}", id, e);
                    }
                    progress.on_provider_complete(id, false);
                    failures.push(ProviderFailure::new(id, e.to_string()));
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        Ok((responses, failures))
    }

    /// Call one provider under its own timeout.
    ///
    /// A panicking provider is reported as unavailable.
    async fn call_provider(
        client: &dyn ProviderClient,
        kind: RequestKind,
        input: &str,
        timeout: Duration,
    ) -> Result<ProviderResponse, ProviderError> {
        let call = tokio::time::timeout(timeout, client.respond(kind, input));

        match AssertUnwindSafe(call).catch_unwind().await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(ProviderError::Timeout(timeout)),
            Err(_) => Err(ProviderError::Unavailable("provider panicked".to_string())),
        }
    }

    fn finish_completed(&self, input: DispatchInput, result: ConsensusResult) -> Arc<ConsensusResult> {
        let result = Arc::new(result);
        let record = self.recorder.record(
            input.kind,
            input.input,
            OperationOutcome::Completed(Arc::clone(&result)),
        );

        info!(
            "Dispatch #{} complete: best={} mean={:.3} agreement={}",
            record.sequence,
            result.best.provider,
            result.mean_confidence(),
            result.agreement()
        );

        self.journal.log(JournalEvent::new(
            "dispatch_completed",
            serde_json::json!({
                "sequence": record.sequence,
                "kind": result.kind,
                "best_provider": result.best.provider,
                "mean_confidence": result.mean_confidence(),
                "agreement": result.agreement(),
                "responded": result.summary.responded,
                "failed": result.summary.failed,
            }),
        ));

        let mean = result.mean_confidence();
        let event = if result.agreement() == Agreement::Low {
            PersonaEvent::new(PersonaEventKind::Challenge, 1.0 - mean)
        } else {
            PersonaEvent::new(PersonaEventKind::Success, mean)
        };
        self.persona.on_event(event);

        result
    }

    fn finish_failed(&self, input: &DispatchInput, failures: &[ProviderFailure]) {
        let error = DomainError::NoProvidersAvailable.to_string();
        let record = self.recorder.record(
            input.kind,
            input.input.as_str(),
            OperationOutcome::Failed {
                error: error.clone(),
            },
        );

        warn!(
            "Dispatch #{} failed: all {} providers failed",
            record.sequence,
            failures.len()
        );

        self.journal.log(JournalEvent::new(
            "dispatch_failed",
            serde_json::json!({
                "sequence": record.sequence,
                "kind": input.kind,
                "error": error,
                "failures": failures,
            }),
        ));

        self.persona
            .on_event(PersonaEvent::new(PersonaEventKind::Failure, 1.0));
    }
}
