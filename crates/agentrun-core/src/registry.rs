//! Provider registry.

use dashmap::DashMap;
use std::sync::Arc;

use agentrun_protocols::error::ProviderError;
use agentrun_protocols::provider::TextProvider;

use tracing::warn;

/// Registry mapping provider tags to their streaming adapters.
pub struct ProviderRegistry {
    providers: DashMap<String, Arc<dyn TextProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: DashMap::new(),
        }
    }

    /// Register a provider under its own id, replacing any previous adapter
    /// with the same tag.
    pub fn register(&self, provider: Arc<dyn TextProvider>) {
        let id = provider.id().to_string();
        if self.providers.insert(id.clone(), provider).is_some() {
            warn!(provider = %id, "Replaced existing provider registration");
        }
    }

    /// Get a provider by tag.
    pub fn get(&self, id: &str) -> Option<Arc<dyn TextProvider>> {
        self.providers.get(id).map(|p| p.clone())
    }

    /// Resolve a provider by tag, failing fast for unknown tags before any
    /// network call can happen.
    pub fn resolve(&self, id: &str) -> Result<Arc<dyn TextProvider>, ProviderError> {
        self.get(id)
            .ok_or_else(|| ProviderError::Unsupported(id.to_string()))
    }

    /// List registered provider tags.
    pub fn list_ids(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.key().clone()).collect()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
