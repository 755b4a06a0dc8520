//! Repository port for lead persistence, candidate lookup and listing.

use crate::identity::UserId;
use crate::lead::domain::{Lead, LeadId, LeadStatus};
use crate::lead::query::AssignedFilter;
use crate::provider::domain::ProviderId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for lead repository operations.
pub type LeadRepositoryResult<T> = Result<T, LeadRepositoryError>;

/// Selects unassigned leads for a distribution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFilter {
    /// Restrict to leads with status `new`.
    pub only_new: bool,
    /// Restrict to one lead type.
    pub lead_type: Option<String>,
}

/// Assignment write applied to a single lead row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadAssignment {
    /// Lead to update.
    pub lead_id: LeadId,
    /// Provider taking ownership.
    pub provider_id: ProviderId,
    /// Status written with the owner.
    pub status: LeadStatus,
    /// Update timestamp.
    pub at: DateTime<Utc>,
}

/// Row-ownership constraint forced by the caller's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerConstraint {
    /// Only leads owned by this provider.
    Company(ProviderId),
    /// Only leads submitted by this user.
    SubmittedBy(UserId),
}

/// Store-level filter for listing leads.
///
/// Empty lists mean "no constraint". `search` is an already sanitised
/// term matched case-insensitively against title and description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadListFilter {
    /// Role-derived ownership constraint.
    pub owner: Option<OwnerConstraint>,
    /// Allowed raw status values.
    pub statuses: Vec<String>,
    /// Allowed categories.
    pub categories: Vec<String>,
    /// Allowed lead types.
    pub lead_types: Vec<String>,
    /// Allowed postal codes (read from metadata).
    pub zip_codes: Vec<String>,
    /// Sanitised free-text search term.
    pub search: Option<String>,
    /// Inclusive lower bound on `created_at`.
    pub created_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`.
    pub created_to: Option<DateTime<Utc>>,
    /// Assignment state filter.
    pub assigned: AssignedFilter,
}

/// Lead persistence contract.
#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// Stores a new lead.
    ///
    /// # Errors
    ///
    /// Returns [`LeadRepositoryError::DuplicateLead`] when the identifier
    /// already exists.
    async fn store(&self, lead: &Lead) -> LeadRepositoryResult<()>;

    /// Finds a lead by identifier.
    async fn find_by_id(&self, id: LeadId) -> LeadRepositoryResult<Option<Lead>>;

    /// Returns unassigned leads matching `filter`, oldest first.
    async fn find_candidates(&self, filter: &CandidateFilter) -> LeadRepositoryResult<Vec<Lead>>;

    /// Sets the owner and status of a lead that has no owner yet.
    ///
    /// The write is conditional on `company_id` still being empty, so two
    /// concurrent runs cannot both commit the same lead.
    ///
    /// # Errors
    ///
    /// Returns [`LeadRepositoryError::NotFound`] when the lead does not
    /// exist or [`LeadRepositoryError::AlreadyAssigned`] when another writer
    /// assigned it first.
    async fn assign(&self, assignment: LeadAssignment) -> LeadRepositoryResult<Lead>;

    /// Lists leads matching `filter`, newest first.
    async fn list(&self, filter: &LeadListFilter) -> LeadRepositoryResult<Vec<Lead>>;
}

/// Errors returned by lead repository implementations.
#[derive(Debug, Clone, Error)]
pub enum LeadRepositoryError {
    /// A lead with the same identifier already exists.
    #[error("duplicate lead identifier: {0}")]
    DuplicateLead(LeadId),

    /// The lead was not found.
    #[error("lead not found: {0}")]
    NotFound(LeadId),

    /// The lead already has an owner.
    #[error("lead {0} is already assigned")]
    AlreadyAssigned(LeadId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl LeadRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
