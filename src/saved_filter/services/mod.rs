//! Saved filter orchestration.

mod saved_filters;

pub use saved_filters::{SavedFilterService, SavedFilterServiceError, SavedFilterServiceResult};
