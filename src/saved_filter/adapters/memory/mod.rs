//! In-memory adapter for saved filters.

mod repository;

pub use repository::InMemorySavedFilterRepository;
