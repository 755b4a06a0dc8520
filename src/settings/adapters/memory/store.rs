//! In-memory versioned settings store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::settings::{
    domain::{LeadSettings, SettingsRevision, SettingsScope, SettingsVersion},
    ports::{SettingsStore, SettingsStoreError, SettingsStoreResult},
};

/// Thread-safe settings history held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettingsStore {
    state: Arc<RwLock<HashMap<SettingsScope, Vec<SettingsRevision>>>>,
}

impl InMemorySettingsStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: &impl ToString) -> SettingsStoreError {
    SettingsStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn current(&self, scope: SettingsScope) -> SettingsStoreResult<Option<SettingsRevision>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state
            .get(&scope)
            .and_then(|revisions| revisions.last())
            .cloned())
    }

    async fn history(&self, scope: SettingsScope) -> SettingsStoreResult<Vec<SettingsRevision>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.get(&scope).cloned().unwrap_or_default())
    }

    async fn append(
        &self,
        scope: SettingsScope,
        expected: SettingsVersion,
        settings: LeadSettings,
        recorded_at: DateTime<Utc>,
    ) -> SettingsStoreResult<SettingsRevision> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let revisions = state.entry(scope).or_default();
        let actual = revisions
            .last()
            .map_or(SettingsVersion::NONE, |revision| revision.version);
        if actual != expected {
            return Err(SettingsStoreError::VersionConflict {
                scope,
                expected,
                actual,
            });
        }
        let revision = SettingsRevision {
            scope,
            version: actual.next(),
            settings,
            recorded_at,
        };
        revisions.push(revision.clone());
        Ok(revision)
    }
}
