//! The settings snapshot and partial updates to it.

use super::{Budget, DistributionFilters, LegacyPauseFlags, PauseState};
use crate::distribution::domain::DistributionStrategy;
use serde::{Deserialize, Serialize};

/// Distribution configuration for one scope at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredSettings")]
pub struct LeadSettings {
    /// Strategy to use when a run does not name one.
    pub strategy: Option<DistributionStrategy>,
    /// Lead allow-lists.
    pub filters: Option<DistributionFilters>,
    /// Daily spending cap.
    pub daily_budget: Option<Budget>,
    /// Monthly spending cap.
    pub monthly_budget: Option<Budget>,
    /// Pause state.
    pub pause: PauseState,
}

impl LeadSettings {
    /// Returns the filters, treating empty filters as absent.
    #[must_use]
    pub fn active_filters(&self) -> Option<&DistributionFilters> {
        self.filters.as_ref().filter(|filters| !filters.is_empty())
    }

    /// Returns a copy with `update` applied. Fields left `None` in the
    /// update keep their current value.
    #[must_use]
    pub fn with_update(&self, update: SettingsUpdate) -> Self {
        let SettingsUpdate {
            strategy,
            filters,
            daily_budget,
            monthly_budget,
        } = update;
        Self {
            strategy: strategy.or(self.strategy),
            filters: filters.or_else(|| self.filters.clone()),
            daily_budget: daily_budget.or(self.daily_budget),
            monthly_budget: monthly_budget.or(self.monthly_budget),
            pause: self.pause,
        }
    }

    /// Returns a copy with the given pause state.
    #[must_use]
    pub fn with_pause(&self, pause: PauseState) -> Self {
        Self {
            pause,
            ..self.clone()
        }
    }
}

/// Partial change to a settings snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    /// New default strategy.
    pub strategy: Option<DistributionStrategy>,
    /// New allow-lists.
    pub filters: Option<DistributionFilters>,
    /// New daily cap.
    pub daily_budget: Option<Budget>,
    /// New monthly cap.
    pub monthly_budget: Option<Budget>,
}

/// Wire shape accepted when reading snapshots, including legacy rows that
/// carry pause booleans instead of `pause`.
#[derive(Default, Deserialize)]
#[serde(default)]
struct StoredSettings {
    strategy: Option<DistributionStrategy>,
    filters: Option<DistributionFilters>,
    daily_budget: Option<Budget>,
    monthly_budget: Option<Budget>,
    pause: Option<PauseState>,
    #[serde(flatten)]
    legacy: LegacyPauseFlags,
}

impl From<StoredSettings> for LeadSettings {
    fn from(stored: StoredSettings) -> Self {
        let pause = stored.pause.unwrap_or_else(|| stored.legacy.collapse());
        Self {
            strategy: stored.strategy,
            filters: stored.filters,
            daily_budget: stored.daily_budget,
            monthly_budget: stored.monthly_budget,
            pause,
        }
    }
}
