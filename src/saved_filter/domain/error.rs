//! Validation errors for saved filters.

use thiserror::Error;

/// Errors returned while constructing a saved filter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SavedFilterDomainError {
    /// The name is empty after trimming.
    #[error("filter name must not be empty")]
    EmptyName,

    /// The trimmed name is longer than allowed.
    #[error("filter name has {actual} characters, the limit is {max}")]
    NameTooLong {
        /// Maximum characters allowed.
        max: usize,
        /// Characters supplied.
        actual: usize,
    },

    /// The filter payload is not a JSON object.
    #[error("filter data must be a JSON object")]
    DataNotObject,
}
