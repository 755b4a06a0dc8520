//! `PostgreSQL` implementation of the saved filter repository.

use super::{models::SavedFilterRow, schema::user_lead_filters};
use crate::identity::UserId;
use crate::saved_filter::{
    domain::{PersistedSavedFilterData, SavedFilterDomainError, SavedFilterId, SavedLeadFilter},
    ports::{SavedFilterRepository, SavedFilterRepositoryError, SavedFilterRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;

/// `PostgreSQL` connection pool type used by the saved filter repository.
pub type SavedFilterPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed saved filter repository.
///
/// A partial unique index on `user_id WHERE is_default` backs the
/// single-default rule; [`SavedFilterRepository::set_default`] runs in one
/// transaction so the index is never violated in between.
#[derive(Debug, Clone)]
pub struct PostgresSavedFilterRepository {
    pool: SavedFilterPgPool,
}

impl PostgresSavedFilterRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: SavedFilterPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> SavedFilterRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> SavedFilterRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(SavedFilterRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(SavedFilterRepositoryError::persistence)?
    }
}

#[async_trait]
impl SavedFilterRepository for PostgresSavedFilterRepository {
    async fn store(&self, filter: &SavedLeadFilter) -> SavedFilterRepositoryResult<()> {
        let filter_id = filter.id();
        let row = to_row(filter);
        self.run_blocking(move |connection| {
            diesel::insert_into(user_lead_filters::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        SavedFilterRepositoryError::DuplicateFilter(filter_id)
                    }
                    _ => SavedFilterRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find(
        &self,
        user_id: UserId,
        id: SavedFilterId,
    ) -> SavedFilterRepositoryResult<Option<SavedLeadFilter>> {
        self.run_blocking(move |connection| {
            let row = user_lead_filters::table
                .filter(user_lead_filters::id.eq(id.into_inner()))
                .filter(user_lead_filters::user_id.eq(user_id.into_inner()))
                .select(SavedFilterRow::as_select())
                .first::<SavedFilterRow>(connection)
                .optional()
                .map_err(SavedFilterRepositoryError::persistence)?;
            row.map(row_to_filter).transpose()
        })
        .await
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> SavedFilterRepositoryResult<Vec<SavedLeadFilter>> {
        self.run_blocking(move |connection| {
            let rows = user_lead_filters::table
                .filter(user_lead_filters::user_id.eq(user_id.into_inner()))
                .order((
                    user_lead_filters::created_at.desc(),
                    user_lead_filters::filter_name.asc(),
                ))
                .select(SavedFilterRow::as_select())
                .load::<SavedFilterRow>(connection)
                .map_err(SavedFilterRepositoryError::persistence)?;
            rows.into_iter().map(row_to_filter).collect()
        })
        .await
    }

    async fn set_default(
        &self,
        user_id: UserId,
        id: SavedFilterId,
        at: DateTime<Utc>,
    ) -> SavedFilterRepositoryResult<SavedLeadFilter> {
        self.run_blocking(move |connection| {
            let row = connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::update(
                        user_lead_filters::table
                            .filter(user_lead_filters::user_id.eq(user_id.into_inner()))
                            .filter(user_lead_filters::is_default.eq(true))
                            .filter(user_lead_filters::id.ne(id.into_inner())),
                    )
                    .set((
                        user_lead_filters::is_default.eq(false),
                        user_lead_filters::updated_at.eq(at),
                    ))
                    .execute(tx)?;
                    diesel::update(
                        user_lead_filters::table
                            .filter(user_lead_filters::id.eq(id.into_inner()))
                            .filter(user_lead_filters::user_id.eq(user_id.into_inner())),
                    )
                    .set((
                        user_lead_filters::is_default.eq(true),
                        user_lead_filters::updated_at.eq(at),
                    ))
                    .returning(SavedFilterRow::as_returning())
                    .get_result(tx)
                })
                .map_err(|err| match err {
                    DieselError::NotFound => SavedFilterRepositoryError::NotFound(id),
                    _ => SavedFilterRepositoryError::persistence(err),
                })?;
            row_to_filter(row)
        })
        .await
    }

    async fn delete(&self, user_id: UserId, id: SavedFilterId) -> SavedFilterRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                user_lead_filters::table
                    .filter(user_lead_filters::id.eq(id.into_inner()))
                    .filter(user_lead_filters::user_id.eq(user_id.into_inner())),
            )
            .execute(connection)
            .map_err(SavedFilterRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(SavedFilterRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_row(filter: &SavedLeadFilter) -> SavedFilterRow {
    SavedFilterRow {
        id: filter.id().into_inner(),
        user_id: filter.user_id().into_inner(),
        filter_name: filter.name().to_owned(),
        filter_data: Value::Object(filter.filter_data().clone()),
        is_default: filter.is_default(),
        created_at: filter.created_at(),
        updated_at: filter.updated_at(),
    }
}

fn row_to_filter(row: SavedFilterRow) -> SavedFilterRepositoryResult<SavedLeadFilter> {
    let SavedFilterRow {
        id,
        user_id,
        filter_name,
        filter_data,
        is_default,
        created_at,
        updated_at,
    } = row;
    let Value::Object(data) = filter_data else {
        return Err(SavedFilterRepositoryError::persistence(
            SavedFilterDomainError::DataNotObject,
        ));
    };
    Ok(SavedLeadFilter::from_persisted(PersistedSavedFilterData {
        id: SavedFilterId::from_uuid(id),
        user_id: UserId::from_uuid(user_id),
        name: filter_name,
        filter_data: data,
        is_default,
        created_at,
        updated_at,
    }))
}
