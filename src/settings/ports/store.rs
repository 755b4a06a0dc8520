//! Versioned settings store port.

use crate::settings::domain::{LeadSettings, SettingsRevision, SettingsScope, SettingsVersion};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for settings store operations.
pub type SettingsStoreResult<T> = Result<T, SettingsStoreError>;

/// Per-scope settings history with a single current pointer.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Returns the current revision for `scope`, if any was written.
    async fn current(&self, scope: SettingsScope) -> SettingsStoreResult<Option<SettingsRevision>>;

    /// Returns every revision for `scope`, oldest first.
    async fn history(&self, scope: SettingsScope) -> SettingsStoreResult<Vec<SettingsRevision>>;

    /// Appends a revision if `expected` is still the current version.
    ///
    /// Pass [`SettingsVersion::NONE`] for the first revision of a scope.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsStoreError::VersionConflict`] when another writer
    /// appended first.
    async fn append(
        &self,
        scope: SettingsScope,
        expected: SettingsVersion,
        settings: LeadSettings,
        recorded_at: DateTime<Utc>,
    ) -> SettingsStoreResult<SettingsRevision>;
}

/// Errors returned by settings store implementations.
#[derive(Debug, Clone, Error)]
pub enum SettingsStoreError {
    /// The scope moved on since the caller read it.
    #[error("settings for {scope} are at {actual}, expected {expected}")]
    VersionConflict {
        /// Scope being written.
        scope: SettingsScope,
        /// Version the caller based its change on.
        expected: SettingsVersion,
        /// Version currently stored.
        actual: SettingsVersion,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SettingsStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
