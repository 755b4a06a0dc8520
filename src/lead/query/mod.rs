//! Schema validation for the lead listing read path.
//!
//! Raw options arrive from the UI as loosely typed JSON. They are validated
//! in full before any query is built: malformed input is rejected, never
//! escaped or trimmed into shape. The validated form is then narrowed by the
//! caller's role in [`crate::lead::services::LeadQueryService`].

mod error;
mod options;
mod validation;

pub use error::QueryValidationError;
pub use options::{AssignedFilter, DateRangeOptions, LeadQueryOptions};
pub use validation::{
    QueryLimits, SEARCH_PUNCTUATION, ValidatedLeadQuery, sanitize_search_term, validate,
};
