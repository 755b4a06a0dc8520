//! `PostgreSQL` implementation of the versioned settings store.

use super::{models::SettingsRow, schema::lead_settings};
use crate::provider::domain::ProviderId;
use crate::settings::{
    domain::{LeadSettings, SettingsRevision, SettingsScope, SettingsVersion},
    ports::{SettingsStore, SettingsStoreError, SettingsStoreResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the settings store.
pub type SettingsPgPool = Pool<ConnectionManager<PgConnection>>;

const GLOBAL_SCOPE_KEY: &str = "global";

/// `PostgreSQL`-backed settings store.
#[derive(Debug, Clone)]
pub struct PostgresSettingsStore {
    pool: SettingsPgPool,
}

enum AppendOutcome {
    Appended(SettingsRow),
    Conflict(i64),
}

impl PostgresSettingsStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: SettingsPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> SettingsStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> SettingsStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SettingsStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(SettingsStoreError::persistence)?
    }
}

#[async_trait]
impl SettingsStore for PostgresSettingsStore {
    async fn current(&self, scope: SettingsScope) -> SettingsStoreResult<Option<SettingsRevision>> {
        self.run_blocking(move |connection| {
            let row = lead_settings::table
                .filter(lead_settings::scope_key.eq(scope_key(scope)))
                .order(lead_settings::version.desc())
                .select(SettingsRow::as_select())
                .first::<SettingsRow>(connection)
                .optional()
                .map_err(SettingsStoreError::persistence)?;
            row.map(row_to_revision).transpose()
        })
        .await
    }

    async fn history(&self, scope: SettingsScope) -> SettingsStoreResult<Vec<SettingsRevision>> {
        self.run_blocking(move |connection| {
            let rows = lead_settings::table
                .filter(lead_settings::scope_key.eq(scope_key(scope)))
                .order(lead_settings::version.asc())
                .select(SettingsRow::as_select())
                .load::<SettingsRow>(connection)
                .map_err(SettingsStoreError::persistence)?;
            rows.into_iter().map(row_to_revision).collect()
        })
        .await
    }

    async fn append(
        &self,
        scope: SettingsScope,
        expected: SettingsVersion,
        settings: LeadSettings,
        recorded_at: DateTime<Utc>,
    ) -> SettingsStoreResult<SettingsRevision> {
        let expected_raw = to_db_version(expected)?;
        let next_raw = to_db_version(expected.next())?;
        let payload = serde_json::to_value(&settings).map_err(SettingsStoreError::persistence)?;
        let row = SettingsRow {
            scope_key: scope_key(scope),
            company_id: scope.company_id().map(ProviderId::into_inner),
            version: next_raw,
            settings: payload,
            recorded_at,
        };

        self.run_blocking(move |connection| {
            let outcome = connection
                .transaction::<_, DieselError, _>(|tx| {
                    let stored: Option<i64> = lead_settings::table
                        .filter(lead_settings::scope_key.eq(&row.scope_key))
                        .select(diesel::dsl::max(lead_settings::version))
                        .first(tx)?;
                    let actual = stored.unwrap_or(0);
                    if actual != expected_raw {
                        return Ok(AppendOutcome::Conflict(actual));
                    }
                    let inserted = diesel::insert_into(lead_settings::table)
                        .values(&row)
                        .returning(SettingsRow::as_returning())
                        .get_result(tx)?;
                    Ok(AppendOutcome::Appended(inserted))
                })
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        SettingsStoreError::VersionConflict {
                            scope,
                            expected,
                            actual: expected.next(),
                        }
                    }
                    _ => SettingsStoreError::persistence(err),
                })?;

            match outcome {
                AppendOutcome::Appended(inserted) => row_to_revision(inserted),
                AppendOutcome::Conflict(actual) => Err(SettingsStoreError::VersionConflict {
                    scope,
                    expected,
                    actual: from_db_version(actual)?,
                }),
            }
        })
        .await
    }
}

fn scope_key(scope: SettingsScope) -> String {
    match scope {
        SettingsScope::Global => GLOBAL_SCOPE_KEY.to_owned(),
        SettingsScope::Company(id) => id.to_string(),
    }
}

fn to_db_version(version: SettingsVersion) -> SettingsStoreResult<i64> {
    i64::try_from(version.value()).map_err(SettingsStoreError::persistence)
}

fn from_db_version(raw: i64) -> SettingsStoreResult<SettingsVersion> {
    u64::try_from(raw)
        .map(SettingsVersion::new)
        .map_err(SettingsStoreError::persistence)
}

fn row_to_revision(row: SettingsRow) -> SettingsStoreResult<SettingsRevision> {
    let scope = SettingsScope::for_company(row.company_id.map(ProviderId::from_uuid));
    let settings: LeadSettings =
        serde_json::from_value(row.settings).map_err(SettingsStoreError::persistence)?;
    Ok(SettingsRevision {
        scope,
        version: from_db_version(row.version)?,
        settings,
        recorded_at: row.recorded_at,
    })
}
