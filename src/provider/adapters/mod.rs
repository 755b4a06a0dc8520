//! Adapter implementations for the provider directory port.

pub mod memory;
pub mod postgres;
