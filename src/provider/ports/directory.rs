//! Provider directory port.

use crate::provider::domain::{Provider, ProviderId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for provider directory operations.
pub type ProviderDirectoryResult<T> = Result<T, ProviderDirectoryError>;

/// Read and fairness-update access to providers.
#[async_trait]
pub trait ProviderDirectory: Send + Sync {
    /// Stores a new provider.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderDirectoryError::DuplicateProvider`] when the
    /// identifier already exists.
    async fn register(&self, provider: &Provider) -> ProviderDirectoryResult<()>;

    /// Persists status, label and timestamp changes to a provider.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderDirectoryError::NotFound`] when the provider does
    /// not exist.
    async fn update(&self, provider: &Provider) -> ProviderDirectoryResult<()>;

    /// Finds a provider by identifier.
    async fn find_by_id(&self, id: ProviderId) -> ProviderDirectoryResult<Option<Provider>>;

    /// Returns every active provider ordered by [`Provider::fairness_cmp`].
    async fn list_active(&self) -> ProviderDirectoryResult<Vec<Provider>>;

    /// Advances a provider's fairness timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderDirectoryError::NotFound`] when the provider does
    /// not exist.
    async fn record_assignment(
        &self,
        id: ProviderId,
        at: DateTime<Utc>,
    ) -> ProviderDirectoryResult<()>;
}

/// Errors returned by provider directory implementations.
#[derive(Debug, Clone, Error)]
pub enum ProviderDirectoryError {
    /// A provider with the same identifier already exists.
    #[error("duplicate provider identifier: {0}")]
    DuplicateProvider(ProviderId),

    /// The provider was not found.
    #[error("provider not found: {0}")]
    NotFound(ProviderId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProviderDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
