//! Sequential distribution of every pending lead.

use super::LeadAssignmentService;
use crate::distribution::domain::{DistributionStrategy, passes_filters};
use crate::lead::ports::{CandidateFilter, LeadHistoryRepository, LeadRepository};
use crate::notification::{Notification, Notifier};
use crate::provider::{domain::ProviderId, ports::ProviderDirectory};
use crate::settings::{
    domain::{LeadSettings, SettingsScope},
    ports::{SettingsStore, SettingsStoreResult},
};
use mockable::Clock;
use std::sync::Arc;

/// Parameters of one distribution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    /// Strategy overriding the configured one.
    pub strategy: Option<DistributionStrategy>,
    /// Only consider leads with status `new`.
    pub only_new: bool,
    /// Read settings for this company instead of the global scope.
    pub company_id: Option<ProviderId>,
    /// Only consider leads of this type.
    pub lead_type: Option<String>,
}

impl Default for BatchRequest {
    fn default() -> Self {
        Self {
            strategy: None,
            only_new: true,
            company_id: None,
            lead_type: None,
        }
    }
}

/// Outcome of one distribution run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Unassigned leads found.
    pub candidates: usize,
    /// Candidates rejected by the settings filters.
    pub filtered_out: usize,
    /// Candidates assigned to a provider.
    pub assigned: usize,
    /// Candidates that passed the filters but were not assigned.
    pub failed: usize,
    /// The run was skipped because distribution is paused.
    pub paused: bool,
}

impl BatchSummary {
    const fn paused() -> Self {
        Self {
            candidates: 0,
            filtered_out: 0,
            assigned: 0,
            failed: 0,
            paused: true,
        }
    }
}

/// Settings that apply to one run.
struct RunSettings {
    effective: Option<LeadSettings>,
    paused: bool,
    strategy: Option<DistributionStrategy>,
}

/// Assigns every pending lead, one at a time.
///
/// Leads already assigned are never candidates, so a run can be repeated
/// after a partial failure.
pub struct LeadBatchProcessor<L, D, H, S, C>
where
    L: LeadRepository,
    D: ProviderDirectory,
    H: LeadHistoryRepository,
    S: SettingsStore,
    C: Clock + Send + Sync,
{
    leads: Arc<L>,
    settings: Arc<S>,
    assignment: LeadAssignmentService<L, D, H, C>,
    notifier: Arc<dyn Notifier>,
    default_strategy: DistributionStrategy,
}

impl<L, D, H, S, C> LeadBatchProcessor<L, D, H, S, C>
where
    L: LeadRepository,
    D: ProviderDirectory,
    H: LeadHistoryRepository,
    S: SettingsStore,
    C: Clock + Send + Sync,
{
    /// Creates a processor that falls back to `default_strategy` when
    /// neither the request nor the settings name one.
    #[must_use]
    pub fn new(
        leads: Arc<L>,
        settings: Arc<S>,
        assignment: LeadAssignmentService<L, D, H, C>,
        notifier: Arc<dyn Notifier>,
        default_strategy: DistributionStrategy,
    ) -> Self {
        Self {
            leads,
            settings,
            assignment,
            notifier,
            default_strategy,
        }
    }

    /// Runs the batch and returns the number of leads assigned.
    pub async fn process_leads(&self, request: BatchRequest) -> usize {
        self.run(request).await.assigned
    }

    /// Runs the batch and returns its full summary.
    ///
    /// One notification is published per run. Store failures end the run
    /// early with an empty summary.
    pub async fn run(&self, request: BatchRequest) -> BatchSummary {
        let BatchRequest {
            strategy,
            only_new,
            company_id,
            lead_type,
        } = request;

        let run_settings = match self.load_settings(company_id).await {
            Ok(loaded) => loaded,
            Err(err) => {
                tracing::error!(error = %err, "failed to read distribution settings");
                self.notifier.notify(Notification::destructive(
                    "Distribution failed",
                    "Distribution settings could not be read.",
                ));
                return BatchSummary::default();
            }
        };

        if run_settings.paused {
            tracing::warn!(company_id = ?company_id, "distribution is paused, skipping run");
            self.notifier.notify(Notification::warning(
                "Distribution paused",
                "Lead distribution is paused; no leads were assigned.",
            ));
            return BatchSummary::paused();
        }

        let chosen = strategy
            .or(run_settings.strategy)
            .unwrap_or(self.default_strategy);

        let filter = CandidateFilter { only_new, lead_type };
        let candidates = match self.leads.find_candidates(&filter).await {
            Ok(found) => found,
            Err(err) => {
                tracing::error!(error = %err, "failed to load candidate leads");
                self.notifier.notify(Notification::destructive(
                    "Distribution failed",
                    "Pending leads could not be loaded.",
                ));
                return BatchSummary::default();
            }
        };

        if candidates.is_empty() {
            tracing::info!(strategy = %chosen, "no leads to distribute");
            self.notifier.notify(Notification::info(
                "Nothing to distribute",
                "There are no unassigned leads.",
            ));
            return BatchSummary::default();
        }

        let mut summary = BatchSummary {
            candidates: candidates.len(),
            ..BatchSummary::default()
        };
        for lead in &candidates {
            if !passes_filters(lead, run_settings.effective.as_ref()) {
                tracing::debug!(lead_id = %lead.id(), "lead rejected by distribution filters");
                summary.filtered_out = summary.filtered_out.saturating_add(1);
                continue;
            }
            if self.assignment.assign(lead, chosen).await {
                summary.assigned = summary.assigned.saturating_add(1);
            } else {
                summary.failed = summary.failed.saturating_add(1);
            }
        }

        tracing::info!(
            strategy = %chosen,
            candidates = summary.candidates,
            assigned = summary.assigned,
            filtered_out = summary.filtered_out,
            failed = summary.failed,
            "distribution run finished"
        );
        self.notifier.notify(outcome_notification(&summary));
        summary
    }

    async fn load_settings(
        &self,
        company_id: Option<ProviderId>,
    ) -> SettingsStoreResult<RunSettings> {
        let global = self
            .settings
            .current(SettingsScope::Global)
            .await?
            .map(|revision| revision.settings);
        let scoped = match company_id {
            Some(company) => self
                .settings
                .current(SettingsScope::Company(company))
                .await?
                .map(|revision| revision.settings),
            None => None,
        };

        let global_paused = global
            .as_ref()
            .is_some_and(|settings| settings.pause.is_paused());
        let scoped_paused = scoped
            .as_ref()
            .is_some_and(|settings| settings.pause.is_paused());
        let strategy = scoped
            .as_ref()
            .and_then(|settings| settings.strategy)
            .or_else(|| global.as_ref().and_then(|settings| settings.strategy));

        Ok(RunSettings {
            effective: scoped.or(global),
            paused: global_paused || scoped_paused,
            strategy,
        })
    }
}

fn outcome_notification(summary: &BatchSummary) -> Notification {
    let description = format!(
        "{} of {} leads assigned.",
        summary.assigned, summary.candidates
    );
    if summary.assigned == 0 {
        Notification::destructive("Distribution finished", description)
    } else {
        Notification::success("Distribution finished", description)
    }
}
