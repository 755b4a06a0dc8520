//! Lead distribution settings.
//!
//! Settings are scoped globally or per provider company and kept as a
//! versioned history. Writers pass the version they read; a stale version
//! is rejected instead of silently overwriting a concurrent change.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
