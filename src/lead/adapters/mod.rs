//! Persistence adapters for leads and lead history.
//!
//! - [`memory`]: thread-safe in-memory storage for tests and local runs
//! - [`postgres`]: Diesel-backed `PostgreSQL` storage

pub mod memory;
pub mod postgres;
