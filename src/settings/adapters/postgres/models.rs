//! Diesel row models for settings persistence.

use super::schema::lead_settings;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert row for settings revisions.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = lead_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SettingsRow {
    /// Scope key.
    pub scope_key: String,
    /// Scoped company.
    pub company_id: Option<uuid::Uuid>,
    /// Revision number.
    pub version: i64,
    /// Snapshot JSON.
    pub settings: serde_json::Value,
    /// Write timestamp.
    pub recorded_at: DateTime<Utc>,
}
