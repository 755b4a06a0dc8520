//! `PostgreSQL` settings store.

mod models;
mod schema;
mod store;

pub use store::{PostgresSettingsStore, SettingsPgPool};
