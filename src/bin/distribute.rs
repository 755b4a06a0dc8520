//! Runs one distribution pass over the lead pool.
//!
//! Usage:
//!
//! ```text
//! leadhub-distribute [--config <path>] [--strategy <name>] [--company <uuid>]
//!                    [--lead-type <type>] [--all-statuses]
//! ```
//!
//! The database URL comes from `DATABASE_URL` (a `.env` file is honoured) or
//! from the `[database]` section of the configuration file. Log verbosity is
//! controlled with `RUST_LOG`.

use clap::Parser;
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use leadhub::config::{ConfigError, LeadhubConfig};
use leadhub::distribution::domain::DistributionStrategy;
use leadhub::distribution::services::{BatchRequest, LeadAssignmentService, LeadBatchProcessor};
use leadhub::distribution::strategies::StrategyFactory;
use leadhub::lead::adapters::postgres::{PostgresLeadHistory, PostgresLeadRepository};
use leadhub::notification::TracingNotifier;
use leadhub::provider::adapters::postgres::PostgresProviderDirectory;
use leadhub::provider::domain::ProviderId;
use leadhub::settings::adapters::postgres::PostgresSettingsStore;
use mockable::DefaultClock;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that stop a run before any lead is touched.
#[derive(Debug, Error)]
enum DistributeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no database URL configured; set DATABASE_URL or [database].url")]
    MissingDatabaseUrl,
    #[error("failed to open database pool: {0}")]
    Pool(#[source] diesel::r2d2::PoolError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
}

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "leadhub-distribute", about = "Assign pending leads to providers")]
struct Args {
    /// TOML configuration file.
    #[arg(long, env = "LEADHUB_CONFIG")]
    config: Option<PathBuf>,
    /// Strategy overriding the configured one (`roundRobin` or `category_match`).
    #[arg(long)]
    strategy: Option<DistributionStrategy>,
    /// Read settings for this company instead of the global scope.
    #[arg(long)]
    company: Option<Uuid>,
    /// Only distribute leads of this type.
    #[arg(long)]
    lead_type: Option<String>,
    /// Consider unassigned leads in every status, not only `new`.
    #[arg(long)]
    all_statuses: bool,
}

impl Args {
    fn batch_request(&self) -> BatchRequest {
        BatchRequest {
            strategy: self.strategy,
            only_new: !self.all_statuses,
            company_id: self.company.map(ProviderId::from_uuid),
            lead_type: self.lead_type.clone(),
        }
    }
}

fn main() -> Result<(), BoxError> {
    // A missing .env file is not an error.
    let _env_file = dotenvy::dotenv();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    run(&args).map_err(Into::into)
}

fn run(args: &Args) -> Result<(), DistributeError> {
    let config = LeadhubConfig::load(args.config.as_deref())?;
    let url = config
        .database
        .url
        .clone()
        .ok_or(DistributeError::MissingDatabaseUrl)?;
    let pool = Pool::builder()
        .max_size(config.database.pool_size)
        .build(ConnectionManager::<PgConnection>::new(url))
        .map_err(DistributeError::Pool)?;

    let leads = Arc::new(PostgresLeadRepository::new(pool.clone()));
    let history = Arc::new(PostgresLeadHistory::new(pool.clone()));
    let directory = Arc::new(PostgresProviderDirectory::new(pool.clone()));
    let settings = Arc::new(PostgresSettingsStore::new(pool));
    let clock = Arc::new(DefaultClock);

    let distribution = &config.distribution;
    let factory = StrategyFactory::new(
        Arc::clone(&directory),
        Arc::clone(&history),
        distribution.history_window,
        distribution.category_match_mode,
    );
    let assignment = LeadAssignmentService::new(
        Arc::clone(&leads),
        directory,
        history,
        factory,
        distribution.retry,
        clock,
    );
    let processor = LeadBatchProcessor::new(
        leads,
        settings,
        assignment,
        Arc::new(TracingNotifier),
        distribution.default_strategy,
    );

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(DistributeError::RuntimeInit)?;
    let summary = runtime.block_on(processor.run(args.batch_request()));
    tracing::info!(
        candidates = summary.candidates,
        filtered_out = summary.filtered_out,
        assigned = summary.assigned,
        failed = summary.failed,
        paused = summary.paused,
        "distribution run finished"
    );
    Ok(())
}
