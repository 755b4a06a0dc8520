//! Domain model for saved lead filters.

mod error;
mod filter;

pub use error::SavedFilterDomainError;
pub use filter::{
    MAX_FILTER_NAME_CHARS, PersistedSavedFilterData, SaveFilterRequest, SavedFilterId,
    SavedLeadFilter,
};
