//! Shared world state for lead distribution BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use leadhub::config::DistributionConfig;
use leadhub::distribution::services::{BatchSummary, LeadAssignmentService, LeadBatchProcessor};
use leadhub::distribution::strategies::StrategyFactory;
use leadhub::lead::{
    adapters::memory::{InMemoryLeadHistory, InMemoryLeadRepository},
    domain::{Lead, LeadDraft},
    services::LeadIntakeService,
};
use leadhub::notification::{Notifier, RecordingNotifier};
use leadhub::provider::{adapters::memory::InMemoryProviderDirectory, domain::Provider};
use leadhub::settings::{adapters::memory::InMemorySettingsStore, services::SettingsService};
use mockable::DefaultClock;
use rstest::fixture;

/// Batch processor type used by the BDD world.
pub type TestProcessor = LeadBatchProcessor<
    InMemoryLeadRepository,
    InMemoryProviderDirectory,
    InMemoryLeadHistory,
    InMemorySettingsStore,
    DefaultClock,
>;

/// Scenario world for lead distribution behaviour tests.
pub struct DistributionWorld {
    /// Distribution knobs.
    pub config: DistributionConfig,
    /// Lead store.
    pub leads: Arc<InMemoryLeadRepository>,
    /// Assignment audit trail.
    pub history: Arc<InMemoryLeadHistory>,
    /// Provider directory.
    pub directory: Arc<InMemoryProviderDirectory>,
    /// Settings store read by the processor.
    pub settings_store: Arc<InMemorySettingsStore>,
    /// Settings writes.
    pub settings: SettingsService<InMemorySettingsStore, DefaultClock>,
    /// Visitor intake.
    pub intake: LeadIntakeService<InMemoryLeadRepository, InMemoryLeadHistory, DefaultClock>,
    /// Notifications published by runs.
    pub notifier: RecordingNotifier,
    /// Registered providers by name.
    pub providers: HashMap<String, Provider>,
    /// Submitted leads by category.
    pub submitted: HashMap<String, Lead>,
    /// Summaries of every run, in order.
    pub runs: Vec<BatchSummary>,
}

impl DistributionWorld {
    /// Creates a world with empty stores.
    #[must_use]
    pub fn new() -> Self {
        let leads = Arc::new(InMemoryLeadRepository::new());
        let history = Arc::new(InMemoryLeadHistory::new());
        let settings_store = Arc::new(InMemorySettingsStore::new());
        let clock = Arc::new(DefaultClock);
        Self {
            config: DistributionConfig::default(),
            intake: LeadIntakeService::new(
                Arc::clone(&leads),
                Arc::clone(&history),
                Arc::clone(&clock),
            ),
            settings: SettingsService::new(Arc::clone(&settings_store), clock),
            leads,
            history,
            directory: Arc::new(InMemoryProviderDirectory::new()),
            settings_store,
            notifier: RecordingNotifier::new(),
            providers: HashMap::new(),
            submitted: HashMap::new(),
            runs: Vec::new(),
        }
    }

    /// Builds the strategy factory over the world's stores.
    #[must_use]
    pub fn factory(&self) -> StrategyFactory {
        StrategyFactory::new(
            Arc::clone(&self.directory),
            Arc::clone(&self.history),
            self.config.history_window,
            self.config.category_match_mode,
        )
    }

    /// Builds a batch processor over the world's stores.
    #[must_use]
    pub fn processor(&self) -> TestProcessor {
        let assignment = LeadAssignmentService::new(
            Arc::clone(&self.leads),
            Arc::clone(&self.directory),
            Arc::clone(&self.history),
            self.factory(),
            self.config.retry,
            Arc::new(DefaultClock),
        );
        let notifier: Arc<dyn Notifier> = Arc::new(self.notifier.clone());
        LeadBatchProcessor::new(
            Arc::clone(&self.leads),
            Arc::clone(&self.settings_store),
            assignment,
            notifier,
            self.config.default_strategy,
        )
    }

    /// Reloads the lead submitted in `category`.
    ///
    /// # Errors
    ///
    /// Returns an error if no such lead was submitted or the lookup fails.
    pub fn reload(&self, category: &str) -> Result<Lead, eyre::Report> {
        let submitted = self
            .submitted
            .get(category)
            .ok_or_else(|| eyre::eyre!("no lead submitted in category '{category}'"))?;
        run_async(self.intake.find(submitted.id()))
            .map_err(|err| eyre::eyre!("lead lookup failed: {err}"))?
            .ok_or_else(|| eyre::eyre!("lead in '{category}' disappeared"))
    }
}

impl Default for DistributionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DistributionWorld {
    DistributionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Builds an anonymous lead draft for `category`.
pub fn draft(category: &str) -> LeadDraft {
    LeadDraft {
        title: format!("Trenger hjelp med {category}"),
        category: category.to_owned(),
        customer_name: Some("Kari Nordmann".to_owned()),
        ..LeadDraft::default()
    }
}
