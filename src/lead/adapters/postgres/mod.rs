//! `PostgreSQL` adapters for leads and lead history.

mod history;
mod models;
mod repository;
mod schema;

pub use history::PostgresLeadHistory;
pub use repository::{LeadPgPool, PostgresLeadRepository};
