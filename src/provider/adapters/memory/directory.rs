//! In-memory provider directory for tests and local runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::provider::{
    domain::{Provider, ProviderId},
    ports::{ProviderDirectory, ProviderDirectoryError, ProviderDirectoryResult},
};

/// Thread-safe in-memory provider directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProviderDirectory {
    state: Arc<RwLock<HashMap<ProviderId, Provider>>>,
}

impl InMemoryProviderDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: &impl ToString) -> ProviderDirectoryError {
    ProviderDirectoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProviderDirectory for InMemoryProviderDirectory {
    async fn register(&self, provider: &Provider) -> ProviderDirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        if state.contains_key(&provider.id()) {
            return Err(ProviderDirectoryError::DuplicateProvider(provider.id()));
        }
        state.insert(provider.id(), provider.clone());
        Ok(())
    }

    async fn update(&self, provider: &Provider) -> ProviderDirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let slot = state
            .get_mut(&provider.id())
            .ok_or(ProviderDirectoryError::NotFound(provider.id()))?;
        *slot = provider.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: ProviderId) -> ProviderDirectoryResult<Option<Provider>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.get(&id).cloned())
    }

    async fn list_active(&self) -> ProviderDirectoryResult<Vec<Provider>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        let mut active: Vec<Provider> = state
            .values()
            .filter(|provider| provider.is_active())
            .cloned()
            .collect();
        active.sort_by(Provider::fairness_cmp);
        Ok(active)
    }

    async fn record_assignment(
        &self,
        id: ProviderId,
        at: DateTime<Utc>,
    ) -> ProviderDirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let provider = state
            .get_mut(&id)
            .ok_or(ProviderDirectoryError::NotFound(id))?;
        provider.record_assignment(at);
        Ok(())
    }
}
