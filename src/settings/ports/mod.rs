//! Port contracts for settings persistence.

mod store;

pub use store::{SettingsStore, SettingsStoreError, SettingsStoreResult};
