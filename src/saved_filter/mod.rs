//! Saved lead filters.
//!
//! Users keep named presets of lead query options and may mark one of them
//! as their default. The default flag moves through a single atomic port
//! operation, so a user never ends up with two defaults.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
