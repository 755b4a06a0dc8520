//! Shared wiring for in-memory marketplace integration tests.

use leadhub::config::LeadhubConfig;
use leadhub::distribution::services::{LeadAssignmentService, LeadBatchProcessor};
use leadhub::distribution::strategies::StrategyFactory;
use leadhub::identity::{Session, adapters::StaticSessionProvider};
use leadhub::lead::{
    adapters::memory::{InMemoryLeadHistory, InMemoryLeadRepository},
    domain::{Lead, LeadDraft},
    services::{LeadIntakeService, LeadQueryService},
};
use leadhub::notification::{Notifier, RecordingNotifier};
use leadhub::provider::{
    adapters::memory::InMemoryProviderDirectory, domain::Provider, ports::ProviderDirectory,
};
use leadhub::settings::{adapters::memory::InMemorySettingsStore, services::SettingsService};
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::Value;
use std::sync::Arc;

/// Assignment service over the in-memory adapters.
pub type TestAssignment = LeadAssignmentService<
    InMemoryLeadRepository,
    InMemoryProviderDirectory,
    InMemoryLeadHistory,
    DefaultClock,
>;

/// Batch processor over the in-memory adapters.
pub type TestProcessor = LeadBatchProcessor<
    InMemoryLeadRepository,
    InMemoryProviderDirectory,
    InMemoryLeadHistory,
    InMemorySettingsStore,
    DefaultClock,
>;

/// Query service reading as a fixed session.
pub type TestQuery = LeadQueryService<InMemoryLeadRepository, StaticSessionProvider>;

/// Every store and service of the marketplace, wired to in-memory adapters.
pub struct Marketplace {
    /// Configuration used to build services.
    pub config: LeadhubConfig,
    /// Lead store.
    pub leads: Arc<InMemoryLeadRepository>,
    /// Assignment audit trail.
    pub history: Arc<InMemoryLeadHistory>,
    /// Provider directory.
    pub directory: Arc<InMemoryProviderDirectory>,
    /// Settings writes.
    pub settings: SettingsService<InMemorySettingsStore, DefaultClock>,
    /// Settings store shared with the processor.
    pub settings_store: Arc<InMemorySettingsStore>,
    /// Visitor intake.
    pub intake: LeadIntakeService<InMemoryLeadRepository, InMemoryLeadHistory, DefaultClock>,
    /// Notifications published by batch runs.
    pub notifier: RecordingNotifier,
}

impl Marketplace {
    /// Creates an empty marketplace with default configuration.
    #[must_use]
    pub fn new() -> Self {
        let leads = Arc::new(InMemoryLeadRepository::new());
        let history = Arc::new(InMemoryLeadHistory::new());
        let settings_store = Arc::new(InMemorySettingsStore::new());
        let clock = Arc::new(DefaultClock);
        Self {
            config: LeadhubConfig::default(),
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
        }
    }

    /// Builds a single-lead assignment service.
    #[must_use]
    pub fn assignment(&self) -> TestAssignment {
        let distribution = &self.config.distribution;
        let factory = StrategyFactory::new(
            Arc::clone(&self.directory),
            Arc::clone(&self.history),
            distribution.history_window,
            distribution.category_match_mode,
        );
        LeadAssignmentService::new(
            Arc::clone(&self.leads),
            Arc::clone(&self.directory),
            Arc::clone(&self.history),
            factory,
            distribution.retry,
            Arc::new(DefaultClock),
        )
    }

    /// Builds a batch processor publishing to [`Self::notifier`].
    #[must_use]
    pub fn processor(&self) -> TestProcessor {
        let notifier: Arc<dyn Notifier> = Arc::new(self.notifier.clone());
        LeadBatchProcessor::new(
            Arc::clone(&self.leads),
            Arc::clone(&self.settings_store),
            self.assignment(),
            notifier,
            self.config.distribution.default_strategy,
        )
    }

    /// Builds a query service reading as `session`.
    #[must_use]
    pub fn query_as(&self, session: Option<Session>) -> TestQuery {
        let sessions =
            session.map_or_else(StaticSessionProvider::anonymous, StaticSessionProvider::new);
        LeadQueryService::new(
            Arc::clone(&self.leads),
            Arc::new(sessions),
            self.config.query,
        )
    }

    /// Registers an active provider serving `categories`.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is invalid or the directory rejects it.
    pub async fn register(&self, name: &str, categories: &[&str]) -> eyre::Result<Provider> {
        let provider = Provider::new(name, &DefaultClock)?
            .with_categories(categories.iter().map(|category| (*category).to_owned()));
        self.directory.register(&provider).await?;
        Ok(provider)
    }

    /// Submits an anonymous lead.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is invalid or the store rejects it.
    pub async fn submit(&self, category: &str, metadata: Value) -> eyre::Result<Lead> {
        let draft = LeadDraft {
            title: format!("Trenger {category}"),
            category: category.to_owned(),
            customer_name: Some("Ola Nordmann".to_owned()),
            customer_email: Some("ola@example.no".to_owned()),
            metadata,
            ..LeadDraft::default()
        };
        Ok(self.intake.submit(draft, None).await?)
    }

    /// Reloads a lead from the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails or the lead does not exist.
    pub async fn reload(&self, lead: &Lead) -> eyre::Result<Lead> {
        self.intake
            .find(lead.id())
            .await?
            .ok_or_else(|| eyre::eyre!("lead {} disappeared", lead.id()))
    }
}

impl Default for Marketplace {
    fn default() -> Self {
        Self::new()
    }
}

/// Provides an empty marketplace for each test.
#[fixture]
pub fn marketplace() -> Marketplace {
    Marketplace::new()
}
