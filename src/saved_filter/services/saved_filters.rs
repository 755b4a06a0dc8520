//! Saving, listing and defaulting lead filter presets.

use crate::config::SavedFilterConfig;
use crate::identity::UserId;
use crate::saved_filter::{
    domain::{SaveFilterRequest, SavedFilterDomainError, SavedFilterId, SavedLeadFilter},
    ports::{SavedFilterRepository, SavedFilterRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for saved filter operations.
#[derive(Debug, Error)]
pub enum SavedFilterServiceError {
    /// The filter failed validation.
    #[error(transparent)]
    Domain(#[from] SavedFilterDomainError),
    /// The repository rejected the read or write.
    #[error(transparent)]
    Repository(#[from] SavedFilterRepositoryError),
    /// Listing did not finish within the configured timeout.
    #[error("saved filters did not load within {timeout_ms} ms")]
    TimedOut {
        /// Configured timeout.
        timeout_ms: u64,
    },
}

/// Result type for saved filter service operations.
pub type SavedFilterServiceResult<T> = Result<T, SavedFilterServiceError>;

/// Saved filter orchestration service.
#[derive(Clone)]
pub struct SavedFilterService<R, C>
where
    R: SavedFilterRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: SavedFilterConfig,
}

impl<R, C> SavedFilterService<R, C>
where
    R: SavedFilterRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new saved filter service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, config: SavedFilterConfig) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    /// Validates and stores a filter for `user_id`.
    ///
    /// With `make_default` set the stored filter then becomes the user's
    /// only default.
    ///
    /// # Errors
    ///
    /// Returns [`SavedFilterServiceError::Domain`] for an invalid name or
    /// payload and [`SavedFilterServiceError::Repository`] when a write
    /// fails.
    pub async fn save(
        &self,
        user_id: UserId,
        request: SaveFilterRequest,
    ) -> SavedFilterServiceResult<SavedLeadFilter> {
        let SaveFilterRequest {
            name,
            filter_data,
            make_default,
        } = request;
        let filter = SavedLeadFilter::new(user_id, &name, filter_data, &*self.clock)?;
        self.repository.store(&filter).await?;
        tracing::info!(
            %user_id,
            filter_id = %filter.id(),
            name = filter.name(),
            make_default,
            "saved lead filter"
        );
        if make_default {
            return self.set_default(user_id, filter.id()).await;
        }
        Ok(filter)
    }

    /// Lists the user's filters, newest first.
    ///
    /// The read is retried according to the configured policy and the whole
    /// call, retries included, is bounded by the fetch timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SavedFilterServiceError::TimedOut`] when the timeout
    /// elapses and [`SavedFilterServiceError::Repository`] with the last
    /// failure when every attempt failed.
    pub async fn list(&self, user_id: UserId) -> SavedFilterServiceResult<Vec<SavedLeadFilter>> {
        let fetch = self
            .config
            .retry
            .run("saved filter fetch", |_| self.repository.list_for_user(user_id));
        tokio::time::timeout(self.config.fetch_timeout(), fetch)
            .await
            .map_err(|_| {
                tracing::warn!(
                    %user_id,
                    timeout_ms = self.config.fetch_timeout_ms,
                    "saved filter fetch timed out"
                );
                SavedFilterServiceError::TimedOut {
                    timeout_ms: self.config.fetch_timeout_ms,
                }
            })?
            .map_err(SavedFilterServiceError::from)
    }

    /// Makes `id` the user's only default filter.
    ///
    /// # Errors
    ///
    /// Returns [`SavedFilterServiceError::Repository`] when the user has no
    /// such filter or the write fails.
    pub async fn set_default(
        &self,
        user_id: UserId,
        id: SavedFilterId,
    ) -> SavedFilterServiceResult<SavedLeadFilter> {
        let updated = self
            .repository
            .set_default(user_id, id, self.clock.utc())
            .await?;
        tracing::info!(%user_id, filter_id = %id, "default lead filter changed");
        Ok(updated)
    }

    /// Returns the user's default filter, if one is set.
    ///
    /// # Errors
    ///
    /// As [`Self::list`].
    pub async fn default_for(
        &self,
        user_id: UserId,
    ) -> SavedFilterServiceResult<Option<SavedLeadFilter>> {
        let filters = self.list(user_id).await?;
        Ok(filters.into_iter().find(SavedLeadFilter::is_default))
    }

    /// Deletes one of the user's filters.
    ///
    /// # Errors
    ///
    /// Returns [`SavedFilterServiceError::Repository`] when the user has no
    /// such filter or the delete fails.
    pub async fn delete(&self, user_id: UserId, id: SavedFilterId) -> SavedFilterServiceResult<()> {
        self.repository.delete(user_id, id).await?;
        tracing::info!(%user_id, filter_id = %id, "saved lead filter deleted");
        Ok(())
    }
}
