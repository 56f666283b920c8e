//! Provider registry
//!
//! Owns every provider client known to the process and the set of providers
//! currently enabled. Entries are kept in enumeration order, so snapshots and
//! listings come out in tie-break order regardless of registration order.

use crate::ports::provider_client::ProviderClient;
use council_domain::{ProviderId, ProviderStatus};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}

struct RegistryEntry {
    client: Arc<dyn ProviderClient>,
    requests: AtomicU64,
}

/// Registry of provider clients with an enabled/disabled flag each
///
/// The enabled set sits behind a single `RwLock`; [`snapshot`](Self::snapshot)
/// reads it under one guard, so a dispatch sees either the state before or
/// after a concurrent `enable`/`disable`, never a mix.
pub struct ProviderRegistry {
    entries: Vec<RegistryEntry>,
    enabled: RwLock<BTreeSet<ProviderId>>,
}

impl ProviderRegistry {
    /// Create a registry with every client enabled.
    ///
    /// If two clients share an id the first one wins.
    pub fn new(clients: impl IntoIterator<Item = Arc<dyn ProviderClient>>) -> Self {
        let mut entries: Vec<RegistryEntry> = Vec::new();
        for client in clients {
            if entries.iter().any(|e| e.client.id() == client.id()) {
                warn!("Provider {} registered twice, keeping the first", client.id());
                continue;
            }
            entries.push(RegistryEntry {
                client,
                requests: AtomicU64::new(0),
            });
        }
        entries.sort_by_key(|e| e.client.id());

        let enabled = entries.iter().map(|e| e.client.id()).collect();
        Self {
            entries,
            enabled: RwLock::new(enabled),
        }
    }

    /// Restrict the enabled set at construction time.
    ///
    /// Ids that are not registered are ignored.
    pub fn with_enabled(self, ids: impl IntoIterator<Item = ProviderId>) -> Self {
        let wanted: BTreeSet<ProviderId> = ids.into_iter().filter(|id| self.contains(*id)).collect();
        *self.enabled.write().unwrap_or_else(PoisonError::into_inner) = wanted;
        self
    }

    pub fn contains(&self, id: ProviderId) -> bool {
        self.entries.iter().any(|e| e.client.id() == id)
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Enable a provider.
    ///
    /// Returns `Ok(true)` if the state changed, `Ok(false)` if it was already
    /// enabled.
    pub fn enable(&self, id: ProviderId) -> Result<bool, RegistryError> {
        self.ensure_registered(id)?;
        let changed = self
            .enabled
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id);
        if changed {
            info!("Provider {} enabled", id);
        }
        Ok(changed)
    }

    /// Disable a provider.
    ///
    /// Returns `Ok(true)` if the state changed, `Ok(false)` if it was already
    /// disabled.
    pub fn disable(&self, id: ProviderId) -> Result<bool, RegistryError> {
        self.ensure_registered(id)?;
        let changed = self
            .enabled
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
        if changed {
            info!("Provider {} disabled", id);
        }
        Ok(changed)
    }

    /// [`enable`](Self::enable) by provider name
    pub fn enable_named(&self, name: &str) -> Result<(ProviderId, bool), RegistryError> {
        let id = Self::parse_name(name)?;
        self.enable(id).map(|changed| (id, changed))
    }

    /// [`disable`](Self::disable) by provider name
    pub fn disable_named(&self, name: &str) -> Result<(ProviderId, bool), RegistryError> {
        let id = Self::parse_name(name)?;
        self.disable(id).map(|changed| (id, changed))
    }

    pub fn is_enabled(&self, id: ProviderId) -> bool {
        self.enabled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&id)
    }

    /// Enabled provider ids, in enumeration order
    pub fn list_enabled(&self) -> Vec<ProviderId> {
        self.enabled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect()
    }

    /// Clients of every enabled provider, taken under a single read guard
    pub fn snapshot(&self) -> Vec<Arc<dyn ProviderClient>> {
        let enabled = self.enabled.read().unwrap_or_else(PoisonError::into_inner);
        self.entries
            .iter()
            .filter(|e| enabled.contains(&e.client.id()))
            .map(|e| Arc::clone(&e.client))
            .collect()
    }

    /// State of every registered provider, in enumeration order
    pub fn providers(&self) -> Vec<ProviderStatus> {
        let enabled = self.enabled.read().unwrap_or_else(PoisonError::into_inner);
        self.entries
            .iter()
            .map(|e| ProviderStatus {
                id: e.client.id(),
                model: e.client.model().to_string(),
                enabled: enabled.contains(&e.client.id()),
                requests: e.requests.load(Ordering::Relaxed),
            })
            .collect()
    }

    /// Count one request against each of `ids`
    pub fn record_requests(&self, ids: &[ProviderId]) {
        for entry in self.entries.iter().filter(|e| ids.contains(&e.client.id())) {
            entry.requests.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn ensure_registered(&self, id: ProviderId) -> Result<(), RegistryError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(RegistryError::UnknownProvider(id.to_string()))
        }
    }

    fn parse_name(name: &str) -> Result<ProviderId, RegistryError> {
        name.parse()
            .map_err(|_| RegistryError::UnknownProvider(name.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockProvider;

    fn registry(ids: &[ProviderId]) -> ProviderRegistry {
        ProviderRegistry::new(
            ids.iter()
                .map(|id| MockProvider::new(*id, 0.9).into_client()),
        )
    }

    #[test]
    fn test_entries_follow_enumeration_order() {
        let registry = registry(&[ProviderId::Grok, ProviderId::Claude, ProviderId::Gemini]);
        assert_eq!(
            registry.list_enabled(),
            vec![ProviderId::Claude, ProviderId::Gemini, ProviderId::Grok]
        );
        let snapshot_ids: Vec<_> = registry.snapshot().iter().map(|c| c.id()).collect();
        assert_eq!(
            snapshot_ids,
            vec![ProviderId::Claude, ProviderId::Gemini, ProviderId::Grok]
        );
    }

    #[test]
    fn test_enable_disable_are_idempotent() {
        let registry = registry(&[ProviderId::Claude, ProviderId::DeepSeek]);

        assert_eq!(registry.enable(ProviderId::Claude), Ok(false));
        assert_eq!(registry.disable(ProviderId::Claude), Ok(true));
        assert_eq!(registry.disable(ProviderId::Claude), Ok(false));
        assert!(!registry.is_enabled(ProviderId::Claude));
        assert_eq!(registry.enable(ProviderId::Claude), Ok(true));
        assert!(registry.is_enabled(ProviderId::Claude));
    }

    #[test]
    fn test_enable_unregistered_provider_fails_without_change() {
        let registry = registry(&[ProviderId::Claude]);
        let before = registry.list_enabled();

        assert_eq!(
            registry.enable(ProviderId::Grok),
            Err(RegistryError::UnknownProvider("grok".to_string()))
        );
        assert_eq!(registry.list_enabled(), before);
    }

    #[test]
    fn test_enable_unknown_name_fails_without_change() {
        let registry = registry(&ProviderId::ALL);
        registry.disable(ProviderId::Gemini).unwrap();
        let before = registry.list_enabled();

        assert_eq!(
            registry.enable_named("chatgpt"),
            Err(RegistryError::UnknownProvider("chatgpt".to_string()))
        );
        assert_eq!(registry.list_enabled(), before);

        assert_eq!(registry.enable_named("Gemini"), Ok((ProviderId::Gemini, true)));
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_mutation() {
        let registry = registry(&[ProviderId::Claude, ProviderId::Grok]);
        let snapshot = registry.snapshot();
        registry.disable(ProviderId::Grok).unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(registry.snapshot().len(), 1);
    }

    #[test]
    fn test_with_enabled_ignores_unregistered() {
        let registry = registry(&[ProviderId::Claude, ProviderId::Grok])
            .with_enabled([ProviderId::Grok, ProviderId::Gemini]);
        assert_eq!(registry.list_enabled(), vec![ProviderId::Grok]);
    }

    #[test]
    fn test_duplicate_registration_keeps_first() {
        let registry = ProviderRegistry::new([
            MockProvider::new(ProviderId::Claude, 0.9).with_model("first").into_client(),
            MockProvider::new(ProviderId::Claude, 0.5).with_model("second").into_client(),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.providers()[0].model, "first");
    }

    #[test]
    fn test_record_requests_counts_per_provider() {
        let registry = registry(&[ProviderId::Claude, ProviderId::Grok]);
        registry.record_requests(&[ProviderId::Claude]);
        registry.record_requests(&[ProviderId::Claude, ProviderId::Grok]);

        let providers = registry.providers();
        assert_eq!(providers[0].requests, 2);
        assert_eq!(providers[1].requests, 1);
    }
}
