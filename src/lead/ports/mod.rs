//! Port contracts for lead persistence.

pub mod history;
pub mod repository;

pub use history::{LeadHistoryError, LeadHistoryRepository, LeadHistoryResult};
pub use repository::{
    CandidateFilter, LeadAssignment, LeadListFilter, LeadRepository, LeadRepositoryError,
    LeadRepositoryResult, OwnerConstraint,
};
