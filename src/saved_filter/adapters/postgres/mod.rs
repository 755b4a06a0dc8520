//! `PostgreSQL` adapter for saved filters.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresSavedFilterRepository, SavedFilterPgPool};
