//! Domain model for lead distribution settings.
//!
//! Settings are immutable snapshots. Every change produces a new
//! [`SettingsRevision`] with the next [`SettingsVersion`] for its
//! [`SettingsScope`]; the highest version is the current one.

mod error;
mod filters;
mod pause;
mod revision;
mod settings;

pub use error::SettingsDomainError;
pub use filters::{Budget, DistributionFilters};
pub use pause::{LegacyPauseFlags, PauseState};
pub use revision::{SettingsRevision, SettingsScope, SettingsVersion};
pub use settings::{LeadSettings, SettingsUpdate};
