//! Diesel row models for saved filter persistence.

use super::schema::user_lead_filters;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert row for saved filters.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_lead_filters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SavedFilterRow {
    /// Filter identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Display name.
    pub filter_name: String,
    /// Payload JSON.
    pub filter_data: serde_json::Value,
    /// Default flag.
    pub is_default: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
