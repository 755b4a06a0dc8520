//! `PostgreSQL` implementation of the lead history.

use super::{models::LeadHistoryRow, repository::LeadPgPool, schema::lead_history};
use crate::lead::{
    domain::{AssignmentMethod, AssignmentRecord, HistoryEntryId, LeadHistoryEntry, LeadId},
    ports::{LeadHistoryError, LeadHistoryRepository, LeadHistoryResult},
};
use crate::provider::domain::ProviderId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::HashSet;

/// `PostgreSQL`-backed append-only lead history.
#[derive(Debug, Clone)]
pub struct PostgresLeadHistory {
    pool: LeadPgPool,
}

impl PostgresLeadHistory {
    /// Creates a new history store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: LeadPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> LeadHistoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> LeadHistoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(LeadHistoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(LeadHistoryError::persistence)?
    }
}

#[async_trait]
impl LeadHistoryRepository for PostgresLeadHistory {
    async fn append(&self, entry: &LeadHistoryEntry) -> LeadHistoryResult<()> {
        let row = to_row(entry)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(lead_history::table)
                .values(&row)
                .execute(connection)
                .map_err(LeadHistoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn list_for_lead(&self, lead_id: LeadId) -> LeadHistoryResult<Vec<LeadHistoryEntry>> {
        self.run_blocking(move |connection| {
            let rows = lead_history::table
                .filter(lead_history::lead_id.eq(lead_id.into_inner()))
                .order(lead_history::created_at.asc())
                .select(LeadHistoryRow::as_select())
                .load::<LeadHistoryRow>(connection)
                .map_err(LeadHistoryError::persistence)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }

    async fn recent(&self, limit: usize) -> LeadHistoryResult<Vec<LeadHistoryEntry>> {
        let row_limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.run_blocking(move |connection| {
            let rows = lead_history::table
                .order(lead_history::created_at.desc())
                .limit(row_limit)
                .select(LeadHistoryRow::as_select())
                .load::<LeadHistoryRow>(connection)
                .map_err(LeadHistoryError::persistence)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }

    async fn assigned_providers(
        &self,
        providers: &[ProviderId],
    ) -> LeadHistoryResult<HashSet<ProviderId>> {
        let wanted: Vec<uuid::Uuid> = providers.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let found = lead_history::table
                .filter(lead_history::assigned_to.eq_any(wanted))
                .select(lead_history::assigned_to)
                .distinct()
                .load::<uuid::Uuid>(connection)
                .map_err(LeadHistoryError::persistence)?;
            Ok(found.into_iter().map(ProviderId::from_uuid).collect())
        })
        .await
    }
}

fn to_row(entry: &LeadHistoryEntry) -> LeadHistoryResult<LeadHistoryRow> {
    let metadata = serde_json::to_value(&entry.metadata).map_err(LeadHistoryError::persistence)?;
    Ok(LeadHistoryRow {
        id: entry.id.into_inner(),
        lead_id: entry.lead_id.into_inner(),
        assigned_to: entry.assigned_to.into_inner(),
        method: entry.method.as_str().to_owned(),
        previous_status: entry.previous_status.clone(),
        new_status: entry.new_status.clone(),
        metadata,
        created_at: entry.created_at,
    })
}

fn row_to_entry(row: LeadHistoryRow) -> LeadHistoryResult<LeadHistoryEntry> {
    let method =
        AssignmentMethod::try_from(row.method.as_str()).map_err(LeadHistoryError::persistence)?;
    let metadata: AssignmentRecord =
        serde_json::from_value(row.metadata).map_err(LeadHistoryError::persistence)?;
    Ok(LeadHistoryEntry {
        id: HistoryEntryId::from_uuid(row.id),
        lead_id: LeadId::from_uuid(row.lead_id),
        assigned_to: ProviderId::from_uuid(row.assigned_to),
        method,
        previous_status: row.previous_status,
        new_status: row.new_status,
        metadata,
        created_at: row.created_at,
    })
}
