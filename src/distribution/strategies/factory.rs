//! Strategy dispatch.

use super::{CategoryMatchSelector, ProviderSelector, RoundRobinSelector, SelectionResult};
use crate::distribution::domain::{CategoryMatchMode, DistributionError, DistributionStrategy};
use crate::lead::ports::LeadHistoryRepository;
use crate::provider::{domain::ProviderId, ports::ProviderDirectory};
use std::sync::Arc;

/// Routes a strategy to its selector.
///
/// [`StrategyFactory::try_dispatch`] reports failures; the other entry
/// points log them and return `None`.
#[derive(Clone)]
pub struct StrategyFactory {
    round_robin: Arc<dyn ProviderSelector>,
    category_match: Arc<dyn ProviderSelector>,
}

impl StrategyFactory {
    /// Builds the standard selectors over a directory and history.
    #[must_use]
    pub fn new<D, H>(
        directory: Arc<D>,
        history: Arc<H>,
        history_window: usize,
        mode: CategoryMatchMode,
    ) -> Self
    where
        D: ProviderDirectory + 'static,
        H: LeadHistoryRepository + 'static,
    {
        Self {
            round_robin: Arc::new(RoundRobinSelector::new(
                Arc::clone(&directory),
                Arc::clone(&history),
                history_window,
            )),
            category_match: Arc::new(CategoryMatchSelector::new(directory, history, mode)),
        }
    }

    /// Builds a factory from explicit selectors.
    #[must_use]
    pub fn with_selectors(
        round_robin: Arc<dyn ProviderSelector>,
        category_match: Arc<dyn ProviderSelector>,
    ) -> Self {
        Self {
            round_robin,
            category_match,
        }
    }

    fn selector(&self, strategy: DistributionStrategy) -> &dyn ProviderSelector {
        match strategy {
            DistributionStrategy::RoundRobin => &*self.round_robin,
            DistributionStrategy::CategoryMatch => &*self.category_match,
        }
    }

    /// Runs `strategy`. Round-robin ignores `category`.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::MissingCategory`] for category matching
    /// without a category, or a store error from the selector.
    pub async fn try_dispatch(
        &self,
        strategy: DistributionStrategy,
        category: Option<&str>,
    ) -> SelectionResult {
        self.selector(strategy).select(category).await
    }

    /// Runs `strategy`, logging any failure.
    pub async fn dispatch(
        &self,
        strategy: DistributionStrategy,
        category: Option<&str>,
    ) -> Option<ProviderId> {
        match self.try_dispatch(strategy, category).await {
            Ok(selection) => selection.map(|chosen| chosen.provider_id),
            Err(DistributionError::MissingCategory) => {
                tracing::warn!(%strategy, "category match requested without a category");
                None
            }
            Err(err) => {
                tracing::error!(%strategy, error = %err, "provider selection failed");
                None
            }
        }
    }

    /// Parses `name` and runs the strategy.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::UnknownStrategy`] for unrecognised
    /// names, otherwise as [`Self::try_dispatch`].
    pub async fn try_dispatch_named(&self, name: &str, category: Option<&str>) -> SelectionResult {
        let strategy = name.parse::<DistributionStrategy>()?;
        self.try_dispatch(strategy, category).await
    }

    /// Parses `name` and runs the strategy, logging any failure.
    pub async fn dispatch_named(&self, name: &str, category: Option<&str>) -> Option<ProviderId> {
        match self.try_dispatch_named(name, category).await {
            Ok(selection) => selection.map(|chosen| chosen.provider_id),
            Err(err) => {
                tracing::error!(strategy = name, error = %err, "named dispatch failed");
                None
            }
        }
    }
}
