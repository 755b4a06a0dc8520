//! `PostgreSQL` implementation of the provider directory.

use super::{
    models::{NewProviderRow, ProviderRow},
    schema::company_profiles,
};
use crate::provider::{
    domain::{PersistedProviderData, Provider, ProviderId, ProviderStatus},
    ports::{ProviderDirectory, ProviderDirectoryError, ProviderDirectoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by provider adapters.
pub type ProviderPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed provider directory.
#[derive(Debug, Clone)]
pub struct PostgresProviderDirectory {
    pool: ProviderPgPool,
}

impl PostgresProviderDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ProviderPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProviderDirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProviderDirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProviderDirectoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProviderDirectoryError::persistence)?
    }
}

#[async_trait]
impl ProviderDirectory for PostgresProviderDirectory {
    async fn register(&self, provider: &Provider) -> ProviderDirectoryResult<()> {
        let provider_id = provider.id();
        let new_row = to_new_row(provider);
        self.run_blocking(move |connection| {
            diesel::insert_into(company_profiles::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProviderDirectoryError::DuplicateProvider(provider_id)
                    }
                    _ => ProviderDirectoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, provider: &Provider) -> ProviderDirectoryResult<()> {
        let row = to_new_row(provider);
        self.run_blocking(move |connection| {
            let updated_count = diesel::update(
                company_profiles::table.filter(company_profiles::id.eq(row.id)),
            )
            .set((
                company_profiles::name.eq(&row.name),
                company_profiles::status.eq(&row.status),
                company_profiles::tags.eq(&row.tags),
                company_profiles::categories.eq(&row.categories),
                company_profiles::last_lead_assigned_at.eq(row.last_lead_assigned_at),
                company_profiles::updated_at.eq(row.updated_at),
            ))
            .execute(connection)
            .map_err(ProviderDirectoryError::persistence)?;

            if updated_count == 0 {
                return Err(ProviderDirectoryError::NotFound(ProviderId::from_uuid(
                    row.id,
                )));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProviderId) -> ProviderDirectoryResult<Option<Provider>> {
        self.run_blocking(move |connection| {
            let row = company_profiles::table
                .filter(company_profiles::id.eq(id.into_inner()))
                .select(ProviderRow::as_select())
                .first::<ProviderRow>(connection)
                .optional()
                .map_err(ProviderDirectoryError::persistence)?;
            row.map(row_to_provider).transpose()
        })
        .await
    }

    async fn list_active(&self) -> ProviderDirectoryResult<Vec<Provider>> {
        self.run_blocking(move |connection| {
            let rows = company_profiles::table
                .filter(company_profiles::status.eq(ProviderStatus::Active.as_str()))
                .select(ProviderRow::as_select())
                .load::<ProviderRow>(connection)
                .map_err(ProviderDirectoryError::persistence)?;
            let mut providers = rows
                .into_iter()
                .map(row_to_provider)
                .collect::<ProviderDirectoryResult<Vec<_>>>()?;
            // SQL sorts NULL last for ASC; the fairness order wants it first.
            providers.sort_by(Provider::fairness_cmp);
            Ok(providers)
        })
        .await
    }

    async fn record_assignment(
        &self,
        id: ProviderId,
        at: DateTime<Utc>,
    ) -> ProviderDirectoryResult<()> {
        self.run_blocking(move |connection| {
            let updated_count = diesel::update(
                company_profiles::table.filter(company_profiles::id.eq(id.into_inner())),
            )
            .set((
                company_profiles::last_lead_assigned_at.eq(Some(at)),
                company_profiles::updated_at.eq(at),
            ))
            .execute(connection)
            .map_err(ProviderDirectoryError::persistence)?;

            if updated_count == 0 {
                return Err(ProviderDirectoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(provider: &Provider) -> NewProviderRow {
    NewProviderRow {
        id: provider.id().into_inner(),
        name: provider.name().to_owned(),
        status: provider.status().as_str().to_owned(),
        tags: provider.tags().to_vec(),
        categories: provider.categories().to_vec(),
        last_lead_assigned_at: provider.last_lead_assigned_at(),
        created_at: provider.created_at(),
        updated_at: provider.updated_at(),
    }
}

fn row_to_provider(row: ProviderRow) -> ProviderDirectoryResult<Provider> {
    let ProviderRow {
        id,
        name,
        status,
        tags,
        categories,
        last_lead_assigned_at,
        created_at,
        updated_at,
    } = row;

    let parsed_status =
        ProviderStatus::try_from(status.as_str()).map_err(ProviderDirectoryError::persistence)?;

    Ok(Provider::from_persisted(PersistedProviderData {
        id: ProviderId::from_uuid(id),
        name,
        status: parsed_status,
        tags,
        categories,
        last_lead_assigned_at,
        created_at,
        updated_at,
    }))
}
