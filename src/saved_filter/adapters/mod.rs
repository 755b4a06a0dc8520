//! Saved filter repository adapters.

pub mod memory;
pub mod postgres;
