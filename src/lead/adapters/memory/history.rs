//! In-memory lead history.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::lead::{
    domain::{LeadHistoryEntry, LeadId},
    ports::{LeadHistoryError, LeadHistoryRepository, LeadHistoryResult},
};
use crate::provider::domain::ProviderId;

/// Thread-safe append-only history held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLeadHistory {
    entries: Arc<RwLock<Vec<LeadHistoryEntry>>>,
}

impl InMemoryLeadHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: &impl ToString) -> LeadHistoryError {
    LeadHistoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl LeadHistoryRepository for InMemoryLeadHistory {
    async fn append(&self, entry: &LeadHistoryEntry) -> LeadHistoryResult<()> {
        let mut entries = self.entries.write().map_err(|err| poisoned(&err))?;
        entries.push(entry.clone());
        Ok(())
    }

    async fn list_for_lead(&self, lead_id: LeadId) -> LeadHistoryResult<Vec<LeadHistoryEntry>> {
        let entries = self.entries.read().map_err(|err| poisoned(&err))?;
        Ok(entries
            .iter()
            .filter(|entry| entry.lead_id == lead_id)
            .cloned()
            .collect())
    }

    async fn recent(&self, limit: usize) -> LeadHistoryResult<Vec<LeadHistoryEntry>> {
        let entries = self.entries.read().map_err(|err| poisoned(&err))?;
        let mut newest_first: Vec<LeadHistoryEntry> = entries.iter().rev().cloned().collect();
        newest_first.sort_by_key(|entry| std::cmp::Reverse(entry.created_at));
        newest_first.truncate(limit);
        Ok(newest_first)
    }

    async fn assigned_providers(
        &self,
        providers: &[ProviderId],
    ) -> LeadHistoryResult<HashSet<ProviderId>> {
        let entries = self.entries.read().map_err(|err| poisoned(&err))?;
        Ok(entries
            .iter()
            .map(|entry| entry.assigned_to)
            .filter(|provider| providers.contains(provider))
            .collect())
    }
}
