//! Error types for provider domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing provider values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderDomainError {
    /// The provider name is empty after trimming.
    #[error("provider name must not be empty")]
    EmptyName,
}

/// Error returned while parsing provider status from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown provider status: {0}")]
pub struct ParseProviderStatusError(pub String);
