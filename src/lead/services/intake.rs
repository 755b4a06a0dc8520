//! Service layer for visitor and user lead submissions.

use crate::identity::Session;
use crate::lead::{
    domain::{Lead, LeadDomainError, LeadDraft, LeadHistoryEntry, LeadId},
    ports::{LeadHistoryError, LeadHistoryRepository, LeadRepository, LeadRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for lead intake.
#[derive(Debug, Error)]
pub enum LeadIntakeError {
    /// The submission failed validation.
    #[error(transparent)]
    Domain(#[from] LeadDomainError),
    /// The lead store rejected the write.
    #[error(transparent)]
    Repository(#[from] LeadRepositoryError),
    /// The history store failed.
    #[error(transparent)]
    History(#[from] LeadHistoryError),
}

/// Result type for lead intake operations.
pub type LeadIntakeResult<T> = Result<T, LeadIntakeError>;

/// Accepts new leads and exposes their audit trail.
#[derive(Clone)]
pub struct LeadIntakeService<R, H, C>
where
    R: LeadRepository,
    H: LeadHistoryRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    history: Arc<H>,
    clock: Arc<C>,
}

impl<R, H, C> LeadIntakeService<R, H, C>
where
    R: LeadRepository,
    H: LeadHistoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new intake service.
    #[must_use]
    pub const fn new(repository: Arc<R>, history: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            repository,
            history,
            clock,
        }
    }

    /// Validates and stores a new lead.
    ///
    /// The lead starts with status `new` and no owner. `session` is `None`
    /// for anonymous visitors.
    ///
    /// # Errors
    ///
    /// Returns [`LeadIntakeError::Domain`] when the draft is invalid and
    /// [`LeadIntakeError::Repository`] when the store rejects the write.
    pub async fn submit(
        &self,
        draft: LeadDraft,
        session: Option<&Session>,
    ) -> LeadIntakeResult<Lead> {
        let submitted_by = session.map(Session::user_id);
        let lead = Lead::submit(draft, submitted_by, &*self.clock)?;
        self.repository.store(&lead).await?;
        tracing::info!(
            lead_id = %lead.id(),
            category = lead.category(),
            anonymous = submitted_by.is_none(),
            "lead submitted"
        );
        Ok(lead)
    }

    /// Returns a lead by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LeadIntakeError::Repository`] when the lookup fails.
    pub async fn find(&self, id: LeadId) -> LeadIntakeResult<Option<Lead>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns the assignment history of a lead, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`LeadIntakeError::History`] when the history store fails.
    pub async fn history(&self, id: LeadId) -> LeadIntakeResult<Vec<LeadHistoryEntry>> {
        Ok(self.history.list_for_lead(id).await?)
    }
}
