//! Validation errors for lead query options.

use thiserror::Error;

/// Errors raised while validating lead query options.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryValidationError {
    /// The raw options could not be decoded.
    #[error("malformed query options: {0}")]
    Malformed(String),

    /// Too many postal codes were supplied.
    #[error("{actual} postal codes supplied, limit is {max}")]
    TooManyZipCodes {
        /// Maximum accepted entries.
        max: usize,
        /// Entries supplied.
        actual: usize,
    },

    /// A postal code is not a 3 to 6 digit string.
    #[error("invalid postal code '{0}'")]
    InvalidZipCode(String),

    /// The search term is empty after trimming.
    #[error("search term must not be empty")]
    EmptySearchTerm,

    /// The search term is longer than allowed.
    #[error("search term has {actual} characters, limit is {max}")]
    SearchTermTooLong {
        /// Maximum accepted characters.
        max: usize,
        /// Characters supplied.
        actual: usize,
    },

    /// The search term contains a character outside the allow-list.
    #[error("search term contains disallowed character '{0}'")]
    InvalidSearchCharacter(char),

    /// A date range bound is not a full RFC 3339 date-time.
    #[error("date range field '{field}' is not a full ISO-8601 date-time: '{value}'")]
    InvalidDateTime {
        /// Name of the offending field.
        field: &'static str,
        /// Supplied value.
        value: String,
    },

    /// The assignment filter is not `all`, `assigned` or `unassigned`.
    #[error("invalid assignment filter '{0}'")]
    InvalidAssignedFilter(String),

    /// Several fields failed validation.
    #[error("multiple validation errors: {}", format_errors(.0))]
    Multiple(Vec<Self>),
}

fn format_errors(errors: &[QueryValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl QueryValidationError {
    /// Combines errors, unwrapping a single error.
    ///
    /// Returns `None` when `errors` is empty.
    #[must_use]
    pub fn combine(mut errors: Vec<Self>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Multiple(errors)),
        }
    }

    /// Returns the individual errors, flattening `Multiple`.
    #[must_use]
    pub fn errors(&self) -> Vec<&Self> {
        match self {
            Self::Multiple(inner) => inner.iter().collect(),
            other => vec![other],
        }
    }
}
