//! Shared helpers for `PostgreSQL` integration tests.
//!
//! Uses `pg-embed-setup-unpriv` for embedded `PostgreSQL` lifecycle management.
//! Every test gets its own database cloned from a pre-migrated template.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use leadhub::lead::adapters::postgres::{PostgresLeadHistory, PostgresLeadRepository};
use leadhub::provider::adapters::postgres::PostgresProviderDirectory;
use leadhub::provider::{domain::Provider, ports::ProviderDirectory};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use tokio::runtime::Runtime;

/// Boxed error used by the helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Connection pool shared by the adapters under test.
pub type TestPool = Pool<ConnectionManager<PgConnection>>;

/// Migrations applied to the template, in order.
const MIGRATIONS: [&str; 4] = [
    include_str!("../../migrations/2026-01-05-090000_create_company_profiles/up.sql"),
    include_str!("../../migrations/2026-01-05-090100_create_leads/up.sql"),
    include_str!("../../migrations/2026-01-05-090200_create_lead_settings/up.sql"),
    include_str!("../../migrations/2026-01-05-090300_create_user_lead_filters/up.sql"),
];

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "leadhub_test_template";

/// Creates a tokio runtime for driving the async adapters.
///
/// # Errors
///
/// Returns an error if the runtime cannot be built.
pub fn test_runtime() -> Result<Runtime, BoxError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| Box::new(err) as BoxError)
}

/// Ensures the template database exists with every migration applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            for migration in MIGRATIONS {
                conn.batch_execute(migration)
                    .map_err(|e| eyre::eyre!("migration failed: {e}"))?;
            }
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Drops a test database, even if the test panics.
struct CleanupGuard {
    cluster: &'static TestCluster,
    db_name: String,
}

impl Drop for CleanupGuard {
    #[expect(
        clippy::print_stderr,
        reason = "Test cleanup warnings are informational"
    )]
    fn drop(&mut self) {
        if let Err(e) = self.cluster.drop_database(self.db_name.as_str()) {
            eprintln!("Warning: failed to drop test database {}: {e}", self.db_name);
        }
    }
}

/// A database cloned from the template.
///
/// Fields drop in declaration order, so the pool releases its connection
/// before the database is dropped.
pub struct TestDatabase {
    /// Pool connected to the cloned database.
    pub pool: TestPool,
    _cleanup: CleanupGuard,
}

impl TestDatabase {
    /// Clones the template into a fresh database named after `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be prepared, the database
    /// cannot be created or the pool cannot connect.
    pub fn create(cluster: &'static TestCluster, prefix: &str) -> Result<Self, BoxError> {
        ensure_template(cluster)?;
        let db_name = format!("{prefix}_{}", uuid::Uuid::new_v4().simple());
        cluster
            .create_database_from_template(db_name.as_str(), TEMPLATE_DB)
            .map_err(|e| Box::new(e) as BoxError)?;
        let cleanup = CleanupGuard {
            cluster,
            db_name: db_name.clone(),
        };
        let url = cluster.connection().database_url(&db_name);
        let pool = Pool::builder()
            .max_size(1)
            .build(ConnectionManager::<PgConnection>::new(url))
            .map_err(|e| Box::new(e) as BoxError)?;
        Ok(Self {
            pool,
            _cleanup: cleanup,
        })
    }

    /// Lead repository over this database.
    #[must_use]
    pub fn leads(&self) -> PostgresLeadRepository {
        PostgresLeadRepository::new(self.pool.clone())
    }

    /// Lead history over this database.
    #[must_use]
    pub fn history(&self) -> PostgresLeadHistory {
        PostgresLeadHistory::new(self.pool.clone())
    }

    /// Provider directory over this database.
    #[must_use]
    pub fn directory(&self) -> PostgresProviderDirectory {
        PostgresProviderDirectory::new(self.pool.clone())
    }

    /// Registers a provider so leads and settings can reference it.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is invalid or the insert fails.
    pub async fn register_provider(&self, name: &str) -> Result<Provider, BoxError> {
        let provider = Provider::new(name, &DefaultClock)?;
        self.directory().register(&provider).await?;
        Ok(provider)
    }
}
