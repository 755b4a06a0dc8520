//! Named distribution strategies.

use super::ParseStrategyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A lead distribution algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistributionStrategy {
    /// Fairness rotation over active providers.
    #[serde(rename = "round_robin", alias = "roundRobin")]
    RoundRobin,
    /// Best match between the lead category and provider labels.
    #[serde(rename = "category_match", alias = "categoryMatch")]
    CategoryMatch,
}

impl DistributionStrategy {
    /// Returns the canonical storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RoundRobin => "round_robin",
            Self::CategoryMatch => "category_match",
        }
    }

    /// Returns `true` when the strategy needs a lead category.
    #[must_use]
    pub const fn requires_category(self) -> bool {
        matches!(self, Self::CategoryMatch)
    }
}

impl fmt::Display for DistributionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistributionStrategy {
    type Err = ParseStrategyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "roundRobin" | "round_robin" => Ok(Self::RoundRobin),
            "categoryMatch" | "category_match" => Ok(Self::CategoryMatch),
            _ => Err(ParseStrategyError(value.to_owned())),
        }
    }
}
