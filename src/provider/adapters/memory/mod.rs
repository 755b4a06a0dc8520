//! In-memory provider directory.

mod directory;

pub use directory::InMemoryProviderDirectory;
