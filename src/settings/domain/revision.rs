//! Scopes, versions and revisions of the settings history.

use super::LeadSettings;
use crate::provider::domain::ProviderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which configuration a settings snapshot governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "company_id")]
pub enum SettingsScope {
    /// Marketplace-wide settings.
    Global,
    /// Settings for one provider company.
    Company(ProviderId),
}

impl SettingsScope {
    /// Returns the scoped company, if any.
    #[must_use]
    pub const fn company_id(self) -> Option<ProviderId> {
        match self {
            Self::Global => None,
            Self::Company(id) => Some(id),
        }
    }

    /// Builds the scope for an optional company.
    #[must_use]
    pub const fn for_company(company_id: Option<ProviderId>) -> Self {
        match company_id {
            Some(id) => Self::Company(id),
            None => Self::Global,
        }
    }
}

impl fmt::Display for SettingsScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Company(id) => write!(f, "company:{id}"),
        }
    }
}

/// Monotonic version within a scope. Version 0 means "no revision yet".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SettingsVersion(u64);

impl SettingsVersion {
    /// The version expected before the first revision is written.
    pub const NONE: Self = Self(0);

    /// Wraps a raw version number.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw version number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Returns the version that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for SettingsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// One immutable entry of a scope's settings history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRevision {
    /// Governed scope.
    pub scope: SettingsScope,
    /// Position in the scope's history.
    pub version: SettingsVersion,
    /// The snapshot.
    pub settings: LeadSettings,
    /// When the snapshot was written.
    pub recorded_at: DateTime<Utc>,
}
