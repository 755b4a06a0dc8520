//! Port contracts for the provider directory.

pub mod directory;

pub use directory::{ProviderDirectory, ProviderDirectoryError, ProviderDirectoryResult};
