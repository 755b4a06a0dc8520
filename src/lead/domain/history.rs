//! Append-only assignment audit entries.

use super::{HistoryEntryId, LeadId, ParseAssignmentMethodError};
use crate::provider::domain::ProviderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a lead came to be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentMethod {
    /// Chosen by a distribution strategy.
    Auto,
    /// Chosen by an administrator.
    Manual,
}

impl AssignmentMethod {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for AssignmentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AssignmentMethod {
    type Error = ParseAssignmentMethodError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "manual" => Ok(Self::Manual),
            _ => Err(ParseAssignmentMethodError(value.to_owned())),
        }
    }
}

/// Context recorded alongside an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Strategy (or actor) that produced the assignment.
    pub strategy: String,
    /// Human-readable explanation of the choice.
    pub reasoning: String,
    /// When the assignment was committed.
    pub timestamp: DateTime<Utc>,
}

/// One row of the lead assignment audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadHistoryEntry {
    /// Entry identifier.
    pub id: HistoryEntryId,
    /// The lead that was assigned.
    pub lead_id: LeadId,
    /// The provider the lead was assigned to.
    pub assigned_to: ProviderId,
    /// How the assignment was made.
    pub method: AssignmentMethod,
    /// Raw status before the assignment.
    pub previous_status: String,
    /// Raw status after the assignment.
    pub new_status: String,
    /// Strategy and reasoning.
    pub metadata: AssignmentRecord,
    /// When the entry was written.
    pub created_at: DateTime<Utc>,
}

impl LeadHistoryEntry {
    /// Creates an entry for an assignment committed at `record.timestamp`.
    #[must_use]
    pub fn assignment(
        lead_id: LeadId,
        assigned_to: ProviderId,
        method: AssignmentMethod,
        statuses: (String, String),
        record: AssignmentRecord,
    ) -> Self {
        let (previous_status, new_status) = statuses;
        let created_at = record.timestamp;
        Self {
            id: HistoryEntryId::new(),
            lead_id,
            assigned_to,
            method,
            previous_status,
            new_status,
            metadata: record,
            created_at,
        }
    }
}
