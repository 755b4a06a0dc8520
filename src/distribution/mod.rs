//! Lead distribution: deciding which provider receives each pending lead.
//!
//! A run reads the distribution settings, loads unassigned leads, drops the
//! ones the settings filter out and hands the rest, one at a time, to the
//! assignment service. The assignment service asks a strategy for a
//! provider, commits the lead with a conditional write and then records the
//! fairness update and the audit entry.
//!
//! - Domain types and the filter predicate in [`domain`]
//! - Selection strategies in [`strategies`]
//! - Assignment and batch services in [`services`]

pub mod domain;
pub mod services;
pub mod strategies;

#[cfg(test)]
mod tests;
