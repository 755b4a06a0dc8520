//! `PostgreSQL` adapter for the provider directory.

mod directory;
mod models;
mod schema;

pub use directory::{PostgresProviderDirectory, ProviderPgPool};
