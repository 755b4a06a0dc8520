//! The outcome of a provider selection.

use crate::provider::domain::ProviderId;
use serde::{Deserialize, Serialize};

/// A chosen provider together with the reason it was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The chosen provider.
    pub provider_id: ProviderId,
    /// Human-readable explanation recorded in the audit trail.
    pub reasoning: String,
}

impl Selection {
    /// Creates a selection.
    #[must_use]
    pub fn new(provider_id: ProviderId, reasoning: impl Into<String>) -> Self {
        Self {
            provider_id,
            reasoning: reasoning.into(),
        }
    }
}

/// How category matching compares a lead category with providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryMatchMode {
    /// Score exact and substring matches over tags and categories.
    #[default]
    Scored,
    /// First provider whose categories contain the category exactly.
    Legacy,
}
