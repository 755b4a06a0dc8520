//! Error types for lead domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing lead values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LeadDomainError {
    /// The title is empty after trimming.
    #[error("lead title must not be empty")]
    EmptyTitle,

    /// The category is empty after trimming.
    #[error("lead category must not be empty")]
    EmptyCategory,

    /// The customer e-mail address is malformed.
    #[error("invalid customer e-mail '{0}'")]
    InvalidEmail(String),

    /// The metadata payload is not a JSON object.
    #[error("lead metadata must be a JSON object")]
    MetadataNotObject,
}

/// Error returned while parsing a lead status string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown lead status: {0}")]
pub struct ParseLeadStatusError(pub String);

/// Error returned while parsing an assignment method string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown assignment method: {0}")]
pub struct ParseAssignmentMethodError(pub String);
