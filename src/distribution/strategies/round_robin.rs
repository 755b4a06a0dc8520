//! Fairness rotation over active providers.

use super::selector::{ProviderSelector, SelectionResult, oldest_recent_assignee};
use crate::distribution::domain::{DistributionStrategy, Selection};
use crate::lead::ports::LeadHistoryRepository;
use crate::provider::{domain::Provider, ports::ProviderDirectory};
use async_trait::async_trait;
use std::sync::Arc;

/// Round-robin selector.
///
/// Providers come from the directory oldest-served first. When any of them
/// has assignment history, one that has never received a lead (no history
/// row and no fairness timestamp) jumps the queue. An empty
/// or unreachable directory falls back to the oldest assignee among the
/// most recent history rows.
#[derive(Clone)]
pub struct RoundRobinSelector<D, H>
where
    D: ProviderDirectory,
    H: LeadHistoryRepository,
{
    directory: Arc<D>,
    history: Arc<H>,
    history_window: usize,
}

impl<D, H> RoundRobinSelector<D, H>
where
    D: ProviderDirectory,
    H: LeadHistoryRepository,
{
    /// Creates a selector that inspects at most `history_window` history
    /// rows when falling back.
    #[must_use]
    pub const fn new(directory: Arc<D>, history: Arc<H>, history_window: usize) -> Self {
        Self {
            directory,
            history,
            history_window,
        }
    }

    async fn pick(&self, providers: &[Provider]) -> SelectionResult {
        let ids: Vec<_> = providers.iter().map(Provider::id).collect();
        let served = self.history.assigned_providers(&ids).await?;
        let never_served = providers.iter().find(|provider| {
            !served.is_empty()
                && !served.contains(&provider.id())
                && provider.last_lead_assigned_at().is_none()
        });
        if let Some(fresh) = never_served {
            return Ok(Some(Selection::new(
                fresh.id(),
                format!("{} has never received a lead", fresh.name()),
            )));
        }
        Ok(providers.first().map(|head| {
            Selection::new(
                head.id(),
                format!("{} has waited longest for a lead", head.name()),
            )
        }))
    }
}

#[async_trait]
impl<D, H> ProviderSelector for RoundRobinSelector<D, H>
where
    D: ProviderDirectory,
    H: LeadHistoryRepository,
{
    fn strategy(&self) -> DistributionStrategy {
        DistributionStrategy::RoundRobin
    }

    async fn select(&self, _category: Option<&str>) -> SelectionResult {
        match self.directory.list_active().await {
            Ok(providers) if !providers.is_empty() => self.pick(&providers).await,
            Ok(_) => {
                tracing::warn!("no active providers; falling back to assignment history");
                oldest_recent_assignee(&*self.history, self.history_window).await
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "provider directory unavailable; falling back to assignment history"
                );
                oldest_recent_assignee(&*self.history, self.history_window).await
            }
        }
    }
}
