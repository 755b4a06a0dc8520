//! Commits a selected provider to a lead.

use crate::distribution::{
    domain::{DistributionStrategy, Selection},
    strategies::StrategyFactory,
};
use crate::identity::Session;
use crate::lead::{
    domain::{AssignmentMethod, AssignmentRecord, Lead, LeadHistoryEntry, LeadId, LeadStatus},
    ports::{LeadAssignment, LeadHistoryRepository, LeadRepository, LeadRepositoryError},
};
use crate::provider::{domain::ProviderId, ports::ProviderDirectory};
use crate::retry::RetryPolicy;
use mockable::Clock;
use std::sync::Arc;

/// Strategy label recorded for manual assignments.
const MANUAL_STRATEGY_LABEL: &str = "manual";

/// What is being committed and why.
struct Commit<'a> {
    lead_id: LeadId,
    previous_status: &'a str,
    selection: Selection,
    method: AssignmentMethod,
    strategy_label: &'a str,
}

/// Assigns leads to providers.
///
/// Selection is retried according to the configured [`RetryPolicy`]; the
/// lead write, the fairness update and the audit append are each attempted
/// once. Only a failed lead write turns the result into `false`.
#[derive(Clone)]
pub struct LeadAssignmentService<L, D, H, C>
where
    L: LeadRepository,
    D: ProviderDirectory,
    H: LeadHistoryRepository,
    C: Clock + Send + Sync,
{
    leads: Arc<L>,
    directory: Arc<D>,
    history: Arc<H>,
    factory: StrategyFactory,
    retry: RetryPolicy,
    clock: Arc<C>,
}

impl<L, D, H, C> LeadAssignmentService<L, D, H, C>
where
    L: LeadRepository,
    D: ProviderDirectory,
    H: LeadHistoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new assignment service.
    #[must_use]
    pub const fn new(
        leads: Arc<L>,
        directory: Arc<D>,
        history: Arc<H>,
        factory: StrategyFactory,
        retry: RetryPolicy,
        clock: Arc<C>,
    ) -> Self {
        Self {
            leads,
            directory,
            history,
            factory,
            retry,
            clock,
        }
    }

    /// Selects a provider for `lead` with `strategy` and commits it.
    ///
    /// Returns `false` when no provider is found, selection keeps failing,
    /// or the lead write fails (including when another run assigned the
    /// lead first). The lead is untouched in every `false` case.
    pub async fn assign(&self, lead: &Lead, strategy: DistributionStrategy) -> bool {
        let category = lead.category().trim();
        if strategy.requires_category() && category.is_empty() {
            tracing::warn!(lead_id = %lead.id(), %strategy, "lead has no category to match");
            return false;
        }

        let outcome = self
            .retry
            .run("provider selection", |attempt| {
                tracing::debug!(lead_id = %lead.id(), %strategy, attempt, "selecting provider");
                self.factory.try_dispatch(strategy, Some(category))
            })
            .await;

        let selection = match outcome {
            Ok(Some(selection)) => selection,
            Ok(None) => {
                tracing::warn!(lead_id = %lead.id(), %strategy, "no provider available for lead");
                return false;
            }
            Err(err) => {
                tracing::warn!(
                    lead_id = %lead.id(),
                    %strategy,
                    error = %err,
                    "provider selection failed after retries"
                );
                return false;
            }
        };

        self.commit(Commit {
            lead_id: lead.id(),
            previous_status: lead.raw_status(),
            selection,
            method: AssignmentMethod::Auto,
            strategy_label: strategy.as_str(),
        })
        .await
    }

    /// Assigns a lead to a provider chosen by an administrator.
    ///
    /// Returns `false` when `actor` is not an admin, the lead or provider
    /// does not exist, the provider is inactive, or the lead write fails.
    pub async fn assign_manually(
        &self,
        lead_id: LeadId,
        provider_id: ProviderId,
        actor: &Session,
    ) -> bool {
        if !actor.role().is_admin_tier() {
            tracing::warn!(%lead_id, role = %actor.role(), "manual assignment requires an admin");
            return false;
        }

        let lead = match self.leads.find_by_id(lead_id).await {
            Ok(Some(lead)) => lead,
            Ok(None) => {
                tracing::warn!(%lead_id, "manual assignment for unknown lead");
                return false;
            }
            Err(err) => {
                tracing::error!(%lead_id, error = %err, "failed to load lead");
                return false;
            }
        };

        let provider = match self.directory.find_by_id(provider_id).await {
            Ok(Some(provider)) if provider.is_active() => provider,
            Ok(Some(_)) => {
                tracing::warn!(%provider_id, "manual assignment to inactive provider");
                return false;
            }
            Ok(None) => {
                tracing::warn!(%provider_id, "manual assignment to unknown provider");
                return false;
            }
            Err(err) => {
                tracing::error!(%provider_id, error = %err, "failed to load provider");
                return false;
            }
        };

        let reasoning = format!(
            "assigned to {} by {} ({})",
            provider.name(),
            actor.user_id(),
            actor.role()
        );
        self.commit(Commit {
            lead_id,
            previous_status: lead.raw_status(),
            selection: Selection::new(provider_id, reasoning),
            method: AssignmentMethod::Manual,
            strategy_label: MANUAL_STRATEGY_LABEL,
        })
        .await
    }

    async fn commit(&self, commit: Commit<'_>) -> bool {
        let Commit {
            lead_id,
            previous_status,
            selection,
            method,
            strategy_label,
        } = commit;
        let provider_id = selection.provider_id;
        let at = self.clock.utc();

        let write = self
            .leads
            .assign(LeadAssignment {
                lead_id,
                provider_id,
                status: LeadStatus::Assigned,
                at,
            })
            .await;
        let updated = match write {
            Ok(updated) => updated,
            Err(LeadRepositoryError::AlreadyAssigned(_)) => {
                tracing::warn!(%lead_id, %provider_id, "lead was assigned by another run");
                return false;
            }
            Err(err) => {
                tracing::error!(%lead_id, %provider_id, error = %err, "failed to write assignment");
                return false;
            }
        };

        if let Err(err) = self.directory.record_assignment(provider_id, at).await {
            tracing::error!(%provider_id, error = %err, "failed to advance fairness timestamp");
        }

        let entry = LeadHistoryEntry::assignment(
            lead_id,
            provider_id,
            method,
            (previous_status.to_owned(), updated.raw_status().to_owned()),
            AssignmentRecord {
                strategy: strategy_label.to_owned(),
                reasoning: selection.reasoning,
                timestamp: at,
            },
        );
        if let Err(err) = self.history.append(&entry).await {
            tracing::error!(%lead_id, %provider_id, error = %err, "failed to record lead history");
        }

        tracing::info!(
            %lead_id,
            %provider_id,
            strategy = strategy_label,
            %method,
            "lead assigned"
        );
        true
    }
}
