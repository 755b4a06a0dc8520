//! Raw, unvalidated lead query options.

use super::QueryValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Options as sent by the UI, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadQueryOptions {
    /// Status values to include.
    pub status: Vec<String>,
    /// Categories to include.
    pub category: Vec<String>,
    /// Lead types to include.
    pub lead_type: Vec<String>,
    /// Postal codes to include.
    pub zip_codes: Vec<String>,
    /// Free-text search over title and description.
    pub search_term: Option<String>,
    /// Creation time window.
    pub date_range: Option<DateRangeOptions>,
    /// `all`, `assigned` or `unassigned`.
    pub assigned: Option<String>,
}

impl LeadQueryOptions {
    /// Decodes options from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`QueryValidationError::Malformed`] when the value does not
    /// match the option schema, for example a non-string array entry.
    pub fn from_json(value: serde_json::Value) -> Result<Self, QueryValidationError> {
        serde_json::from_value(value)
            .map_err(|err| QueryValidationError::Malformed(err.to_string()))
    }
}

/// Raw creation time window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRangeOptions {
    /// Inclusive lower bound.
    pub from: Option<String>,
    /// Inclusive upper bound.
    pub to: Option<String>,
}

/// Assignment state filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignedFilter {
    /// No constraint.
    #[default]
    All,
    /// Only leads with an owner.
    Assigned,
    /// Only leads without an owner.
    Unassigned,
}

impl AssignedFilter {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Assigned => "assigned",
            Self::Unassigned => "unassigned",
        }
    }

    /// Returns `true` when a lead with the given assignment state passes.
    #[must_use]
    pub const fn admits(self, is_assigned: bool) -> bool {
        match self {
            Self::All => true,
            Self::Assigned => is_assigned,
            Self::Unassigned => !is_assigned,
        }
    }
}

impl fmt::Display for AssignedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AssignedFilter {
    type Error = QueryValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "all" => Ok(Self::All),
            "assigned" => Ok(Self::Assigned),
            "unassigned" => Ok(Self::Unassigned),
            _ => Err(QueryValidationError::InvalidAssignedFilter(value.to_owned())),
        }
    }
}
