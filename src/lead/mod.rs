//! Leads: inbound service requests and their audit trail.
//!
//! This module owns the lead aggregate, the append-only assignment history,
//! visitor intake, and the schema-validated, role-scoped read path used to
//! list leads. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Query validation in [`query`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod query;
pub mod services;

#[cfg(test)]
mod tests;
