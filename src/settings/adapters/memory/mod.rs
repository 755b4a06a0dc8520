//! In-memory settings store.

mod store;

pub use store::InMemorySettingsStore;
