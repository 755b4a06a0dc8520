//! Errors raised while selecting providers.

use crate::lead::ports::LeadHistoryError;
use crate::provider::ports::ProviderDirectoryError;
use thiserror::Error;

/// Error returned while parsing a strategy name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown distribution strategy: {0}")]
pub struct ParseStrategyError(pub String);

/// Failures surfaced by the fallible selection entry points.
#[derive(Debug, Clone, Error)]
pub enum DistributionError {
    /// The strategy name is not recognised.
    #[error(transparent)]
    UnknownStrategy(#[from] ParseStrategyError),

    /// Category matching was requested without a category.
    #[error("category match requires a non-empty category")]
    MissingCategory,

    /// The provider directory could not be read.
    #[error(transparent)]
    Directory(#[from] ProviderDirectoryError),

    /// The lead history could not be read.
    #[error(transparent)]
    History(#[from] LeadHistoryError),
}
