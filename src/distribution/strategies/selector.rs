//! Selector port shared by every strategy.

use crate::distribution::domain::{DistributionError, DistributionStrategy, Selection};
use crate::lead::ports::LeadHistoryRepository;
use async_trait::async_trait;

/// Result type for provider selection.
pub type SelectionResult = Result<Option<Selection>, DistributionError>;

/// Picks a provider for a lead.
#[async_trait]
pub trait ProviderSelector: Send + Sync {
    /// The strategy this selector implements.
    fn strategy(&self) -> DistributionStrategy;

    /// Selects a provider, or `None` when nobody can take the lead.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError`] when the inputs are unusable or a
    /// store read fails.
    async fn select(&self, category: Option<&str>) -> SelectionResult;
}

/// Returns the assignee of the oldest entry among the `window` most recent
/// history rows.
pub(super) async fn oldest_recent_assignee<H>(history: &H, window: usize) -> SelectionResult
where
    H: LeadHistoryRepository + ?Sized,
{
    let recent = history.recent(window).await?;
    Ok(recent.last().map(|entry| {
        Selection::new(
            entry.assigned_to,
            "no active providers; reused the oldest recent assignee",
        )
    }))
}

/// Returns the assignee of the most recent history row.
pub(super) async fn latest_assignee<H>(history: &H) -> SelectionResult
where
    H: LeadHistoryRepository + ?Sized,
{
    let recent = history.recent(1).await?;
    Ok(recent.first().map(|entry| {
        Selection::new(
            entry.assigned_to,
            "no provider matched the category; reused the latest assignee",
        )
    }))
}
