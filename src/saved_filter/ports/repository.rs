//! Repository port for saved filters.

use crate::identity::UserId;
use crate::saved_filter::domain::{SavedFilterId, SavedLeadFilter};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for saved filter repository operations.
pub type SavedFilterRepositoryResult<T> = Result<T, SavedFilterRepositoryError>;

/// Saved filter persistence contract.
///
/// Every lookup is scoped to the owning user; a filter owned by someone
/// else behaves as if it did not exist.
#[async_trait]
pub trait SavedFilterRepository: Send + Sync {
    /// Stores a new filter.
    ///
    /// # Errors
    ///
    /// Returns [`SavedFilterRepositoryError::DuplicateFilter`] when the
    /// identifier already exists.
    async fn store(&self, filter: &SavedLeadFilter) -> SavedFilterRepositoryResult<()>;

    /// Finds one of the user's filters.
    async fn find(
        &self,
        user_id: UserId,
        id: SavedFilterId,
    ) -> SavedFilterRepositoryResult<Option<SavedLeadFilter>>;

    /// Lists the user's filters, newest first.
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> SavedFilterRepositoryResult<Vec<SavedLeadFilter>>;

    /// Makes `id` the user's only default filter.
    ///
    /// Clearing the previous default and setting the new one happen as one
    /// atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`SavedFilterRepositoryError::NotFound`] when the user has no
    /// such filter; the previous default is then left in place.
    async fn set_default(
        &self,
        user_id: UserId,
        id: SavedFilterId,
        at: DateTime<Utc>,
    ) -> SavedFilterRepositoryResult<SavedLeadFilter>;

    /// Deletes one of the user's filters.
    ///
    /// # Errors
    ///
    /// Returns [`SavedFilterRepositoryError::NotFound`] when the user has no
    /// such filter.
    async fn delete(&self, user_id: UserId, id: SavedFilterId) -> SavedFilterRepositoryResult<()>;
}

/// Errors returned by saved filter repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SavedFilterRepositoryError {
    /// A filter with the same identifier already exists.
    #[error("duplicate saved filter identifier: {0}")]
    DuplicateFilter(SavedFilterId),

    /// The filter was not found for this user.
    #[error("saved filter not found: {0}")]
    NotFound(SavedFilterId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SavedFilterRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
