//! Repository port for the append-only lead history.

use crate::lead::domain::{LeadHistoryEntry, LeadId};
use crate::provider::domain::ProviderId;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Result type for lead history operations.
pub type LeadHistoryResult<T> = Result<T, LeadHistoryError>;

/// Lead history persistence contract.
#[async_trait]
pub trait LeadHistoryRepository: Send + Sync {
    /// Appends an entry. Entries are never updated or removed.
    async fn append(&self, entry: &LeadHistoryEntry) -> LeadHistoryResult<()>;

    /// Returns every entry for a lead, oldest first.
    async fn list_for_lead(&self, lead_id: LeadId) -> LeadHistoryResult<Vec<LeadHistoryEntry>>;

    /// Returns at most `limit` entries, newest first.
    async fn recent(&self, limit: usize) -> LeadHistoryResult<Vec<LeadHistoryEntry>>;

    /// Returns the subset of `providers` that appear in any entry.
    async fn assigned_providers(
        &self,
        providers: &[ProviderId],
    ) -> LeadHistoryResult<HashSet<ProviderId>>;
}

/// Errors returned by lead history implementations.
#[derive(Debug, Clone, Error)]
pub enum LeadHistoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl LeadHistoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
