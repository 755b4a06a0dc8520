//! Reads and versioned writes of distribution settings.

use crate::distribution::domain::DistributionStrategy;
use crate::settings::{
    domain::{
        LeadSettings, PauseState, SettingsDomainError, SettingsRevision, SettingsScope,
        SettingsUpdate, SettingsVersion,
    },
    ports::{SettingsStore, SettingsStoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for settings operations.
#[derive(Debug, Error)]
pub enum SettingsServiceError {
    /// The requested change is invalid.
    #[error(transparent)]
    Domain(#[from] SettingsDomainError),
    /// The store rejected the read or write.
    #[error(transparent)]
    Store(#[from] SettingsStoreError),
}

/// Result type for settings service operations.
pub type SettingsServiceResult<T> = Result<T, SettingsServiceError>;

/// Settings orchestration service.
#[derive(Clone)]
pub struct SettingsService<S, C>
where
    S: SettingsStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> SettingsService<S, C>
where
    S: SettingsStore,
    C: Clock + Send + Sync,
{
    /// Creates a new settings service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Returns the current revision for `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsServiceError::Store`] when the lookup fails.
    pub async fn current(
        &self,
        scope: SettingsScope,
    ) -> SettingsServiceResult<Option<SettingsRevision>> {
        Ok(self.store.current(scope).await?)
    }

    /// Returns every revision for `scope`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsServiceError::Store`] when the lookup fails.
    pub async fn history(
        &self,
        scope: SettingsScope,
    ) -> SettingsServiceResult<Vec<SettingsRevision>> {
        Ok(self.store.history(scope).await?)
    }

    /// Applies `update` on top of the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsServiceError::Store`] when the write fails or
    /// another writer changed the scope concurrently.
    pub async fn update(
        &self,
        scope: SettingsScope,
        update: SettingsUpdate,
    ) -> SettingsServiceResult<SettingsRevision> {
        self.change(scope, |settings| settings.with_update(update))
            .await
    }

    /// Suspends distribution for `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsDomainError::NotAPauseState`] for
    /// [`PauseState::Active`]; use [`Self::resume`] instead.
    pub async fn pause(
        &self,
        scope: SettingsScope,
        state: PauseState,
    ) -> SettingsServiceResult<SettingsRevision> {
        if !state.is_paused() {
            return Err(SettingsDomainError::NotAPauseState.into());
        }
        self.change(scope, |settings| settings.with_pause(state))
            .await
    }

    /// Resumes distribution for `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsServiceError::Store`] when the write fails.
    pub async fn resume(&self, scope: SettingsScope) -> SettingsServiceResult<SettingsRevision> {
        self.change(scope, |settings| settings.with_pause(PauseState::Active))
            .await
    }

    /// Returns the strategy configured for `scope`, falling back to the
    /// global settings for company scopes.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsServiceError::Store`] when a lookup fails.
    pub async fn effective_strategy(
        &self,
        scope: SettingsScope,
    ) -> SettingsServiceResult<Option<DistributionStrategy>> {
        let scoped = self
            .store
            .current(scope)
            .await?
            .and_then(|revision| revision.settings.strategy);
        if scoped.is_some() || scope == SettingsScope::Global {
            return Ok(scoped);
        }
        Ok(self
            .store
            .current(SettingsScope::Global)
            .await?
            .and_then(|revision| revision.settings.strategy))
    }

    async fn change(
        &self,
        scope: SettingsScope,
        apply: impl FnOnce(&LeadSettings) -> LeadSettings + Send,
    ) -> SettingsServiceResult<SettingsRevision> {
        let (expected, base) = self.store.current(scope).await?.map_or_else(
            || (SettingsVersion::NONE, LeadSettings::default()),
            |revision| (revision.version, revision.settings),
        );
        let next = apply(&base);
        let revision = self
            .store
            .append(scope, expected, next, self.clock.utc())
            .await?;
        tracing::info!(
            %scope,
            version = %revision.version,
            pause = %revision.settings.pause,
            "settings revision recorded"
        );
        Ok(revision)
    }
}
