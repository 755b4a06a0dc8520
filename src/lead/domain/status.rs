//! Lead status and the pipeline stage derived from it.

use super::ParseLeadStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recognised lead status values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// Submitted and not yet handled.
    New,
    /// Committed to a provider by distribution.
    Assigned,
    /// Held for manual review before distribution.
    UnderReview,
    /// The provider is working on the lead.
    InProgress,
    /// The provider has contacted the customer.
    Contacted,
    /// The provider has qualified the request.
    Qualified,
    /// An offer is being negotiated.
    Negotiating,
    /// The lead turned into a job.
    Converted,
    /// The lead was lost.
    Lost,
    /// Work on the lead is paused.
    Paused,
    /// The lead is closed and kept for reference.
    Archived,
}

impl LeadStatus {
    /// Every recognised status, in pipeline order.
    pub const ALL: [Self; 11] = [
        Self::New,
        Self::Assigned,
        Self::UnderReview,
        Self::InProgress,
        Self::Contacted,
        Self::Qualified,
        Self::Negotiating,
        Self::Converted,
        Self::Lost,
        Self::Paused,
        Self::Archived,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Assigned => "assigned",
            Self::UnderReview => "under_review",
            Self::InProgress => "in_progress",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::Negotiating => "negotiating",
            Self::Converted => "converted",
            Self::Lost => "lost",
            Self::Paused => "paused",
            Self::Archived => "archived",
        }
    }

    /// Returns the kanban stage this status is displayed under.
    #[must_use]
    pub const fn pipeline_stage(self) -> PipelineStage {
        match self {
            Self::New | Self::UnderReview => PipelineStage::Incoming,
            Self::Assigned
            | Self::InProgress
            | Self::Contacted
            | Self::Qualified
            | Self::Negotiating
            | Self::Paused => PipelineStage::Working,
            Self::Converted => PipelineStage::Won,
            Self::Lost => PipelineStage::Lost,
            Self::Archived => PipelineStage::Closed,
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for LeadStatus {
    type Error = ParseLeadStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseLeadStatusError(value.to_owned()))
    }
}

/// Kanban grouping of lead statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Not yet picked up by a provider.
    Incoming,
    /// Owned by a provider and in progress.
    Working,
    /// Converted into a job.
    Won,
    /// Lost to the provider.
    Lost,
    /// Archived.
    Closed,
}
