//! Application services for distribution settings.

mod settings;

pub use settings::{SettingsService, SettingsServiceError, SettingsServiceResult};
