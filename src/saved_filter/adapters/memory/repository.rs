//! In-memory saved filter repository for tests and local runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::UserId;
use crate::saved_filter::{
    domain::{SavedFilterId, SavedLeadFilter},
    ports::{SavedFilterRepository, SavedFilterRepositoryError, SavedFilterRepositoryResult},
};

/// Thread-safe in-memory saved filter repository.
///
/// The default flag is moved under a single write lock.
#[derive(Debug, Clone, Default)]
pub struct InMemorySavedFilterRepository {
    state: Arc<RwLock<HashMap<SavedFilterId, SavedLeadFilter>>>,
}

impl InMemorySavedFilterRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: &impl ToString) -> SavedFilterRepositoryError {
    SavedFilterRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SavedFilterRepository for InMemorySavedFilterRepository {
    async fn store(&self, filter: &SavedLeadFilter) -> SavedFilterRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        if state.contains_key(&filter.id()) {
            return Err(SavedFilterRepositoryError::DuplicateFilter(filter.id()));
        }
        state.insert(filter.id(), filter.clone());
        Ok(())
    }

    async fn find(
        &self,
        user_id: UserId,
        id: SavedFilterId,
    ) -> SavedFilterRepositoryResult<Option<SavedLeadFilter>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state
            .get(&id)
            .filter(|filter| filter.user_id() == user_id)
            .cloned())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> SavedFilterRepositoryResult<Vec<SavedLeadFilter>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        let mut owned: Vec<SavedLeadFilter> = state
            .values()
            .filter(|filter| filter.user_id() == user_id)
            .cloned()
            .collect();
        owned.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| left.name().cmp(right.name()))
        });
        Ok(owned)
    }

    async fn set_default(
        &self,
        user_id: UserId,
        id: SavedFilterId,
        at: DateTime<Utc>,
    ) -> SavedFilterRepositoryResult<SavedLeadFilter> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let owns_target = state
            .get(&id)
            .is_some_and(|filter| filter.user_id() == user_id);
        if !owns_target {
            return Err(SavedFilterRepositoryError::NotFound(id));
        }
        for filter in state.values_mut() {
            if filter.user_id() == user_id && filter.is_default() && filter.id() != id {
                filter.set_default(false, at);
            }
        }
        let target = state
            .get_mut(&id)
            .ok_or(SavedFilterRepositoryError::NotFound(id))?;
        target.set_default(true, at);
        Ok(target.clone())
    }

    async fn delete(&self, user_id: UserId, id: SavedFilterId) -> SavedFilterRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let owns_target = state
            .get(&id)
            .is_some_and(|filter| filter.user_id() == user_id);
        if !owns_target {
            return Err(SavedFilterRepositoryError::NotFound(id));
        }
        state.remove(&id);
        Ok(())
    }
}
