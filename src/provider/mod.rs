//! Lead-receiving providers (companies).
//!
//! Company onboarding lives elsewhere. The distribution core reads the
//! provider directory to pick a recipient and advances each provider's
//! fairness timestamp after a lead is committed to it.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
