//! Port contracts for saved filter persistence.

pub mod repository;

pub use repository::{
    SavedFilterRepository, SavedFilterRepositoryError, SavedFilterRepositoryResult,
};
