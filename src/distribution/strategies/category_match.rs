//! Category matching over provider labels.

use super::selector::{ProviderSelector, SelectionResult, latest_assignee};
use crate::distribution::domain::{
    CategoryMatchMode, DistributionError, DistributionStrategy, Selection,
};
use crate::lead::ports::LeadHistoryRepository;
use crate::provider::{domain::Provider, ports::ProviderDirectory};
use async_trait::async_trait;
use std::sync::Arc;

const EXACT_MATCH_SCORE: u32 = 10;
const PARTIAL_MATCH_SCORE: u32 = 1;

/// Category-match selector.
///
/// In [`CategoryMatchMode::Scored`] every active provider is scored over
/// its tags and categories; the best score wins and ties go to the provider
/// listed first. Without any positive score the latest assignee from
/// history is reused. [`CategoryMatchMode::Legacy`] takes the first active
/// provider whose categories contain the category verbatim.
#[derive(Clone)]
pub struct CategoryMatchSelector<D, H>
where
    D: ProviderDirectory,
    H: LeadHistoryRepository,
{
    directory: Arc<D>,
    history: Arc<H>,
    mode: CategoryMatchMode,
}

impl<D, H> CategoryMatchSelector<D, H>
where
    D: ProviderDirectory,
    H: LeadHistoryRepository,
{
    /// Creates a selector using `mode`.
    #[must_use]
    pub const fn new(directory: Arc<D>, history: Arc<H>, mode: CategoryMatchMode) -> Self {
        Self {
            directory,
            history,
            mode,
        }
    }

    async fn select_scored(&self, category: &str) -> SelectionResult {
        let providers = self.directory.list_active().await?;
        let needle = category.to_lowercase();
        let mut best: Option<(&Provider, u32)> = None;
        for provider in &providers {
            let provider_score = score(provider, &needle);
            if provider_score > best.map_or(0, |(_, top)| top) {
                best = Some((provider, provider_score));
            }
        }
        match best {
            Some((provider, top)) => Ok(Some(Selection::new(
                provider.id(),
                format!(
                    "{} matched category '{category}' with score {top}",
                    provider.name()
                ),
            ))),
            None => {
                tracing::warn!(category, "no provider matched category; using latest assignee");
                latest_assignee(&*self.history).await
            }
        }
    }

    async fn select_legacy(&self, category: &str) -> SelectionResult {
        let providers = self.directory.list_active().await?;
        Ok(providers
            .iter()
            .find(|provider| provider.categories().iter().any(|entry| entry == category))
            .map(|provider| {
                Selection::new(
                    provider.id(),
                    format!("{} lists category '{category}'", provider.name()),
                )
            }))
    }
}

/// Scores a provider's labels against a lower-cased category.
fn score(provider: &Provider, needle: &str) -> u32 {
    provider
        .labels()
        .map(|label| {
            let candidate = label.to_lowercase();
            if candidate == needle {
                EXACT_MATCH_SCORE
            } else if !candidate.is_empty()
                && (candidate.contains(needle) || needle.contains(candidate.as_str()))
            {
                PARTIAL_MATCH_SCORE
            } else {
                0
            }
        })
        .fold(0, u32::saturating_add)
}

#[async_trait]
impl<D, H> ProviderSelector for CategoryMatchSelector<D, H>
where
    D: ProviderDirectory,
    H: LeadHistoryRepository,
{
    fn strategy(&self) -> DistributionStrategy {
        DistributionStrategy::CategoryMatch
    }

    async fn select(&self, category: Option<&str>) -> SelectionResult {
        let requested = category
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(DistributionError::MissingCategory)?;
        match self.mode {
            CategoryMatchMode::Scored => self.select_scored(requested).await,
            CategoryMatchMode::Legacy => self.select_legacy(requested).await,
        }
    }
}
