//! Diesel row models for lead persistence.

use super::schema::{lead_history, leads};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert row for leads.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = leads)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LeadRow {
    /// Lead identifier.
    pub id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Category.
    pub category: String,
    /// Lead type.
    pub lead_type: String,
    /// Raw status.
    pub status: String,
    /// Submitting user.
    pub submitted_by: Option<uuid::Uuid>,
    /// Owning provider.
    pub company_id: Option<uuid::Uuid>,
    /// Customer name.
    pub customer_name: Option<String>,
    /// Customer e-mail.
    pub customer_email: Option<String>,
    /// Customer phone.
    pub customer_phone: Option<String>,
    /// Service type.
    pub service_type: Option<String>,
    /// Metadata object.
    pub metadata: serde_json::Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query and insert row for lead history.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = lead_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LeadHistoryRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Lead identifier.
    pub lead_id: uuid::Uuid,
    /// Provider identifier.
    pub assigned_to: uuid::Uuid,
    /// Assignment method.
    pub method: String,
    /// Status before.
    pub previous_status: String,
    /// Status after.
    pub new_status: String,
    /// Serialized assignment record.
    pub metadata: serde_json::Value,
    /// Write timestamp.
    pub created_at: DateTime<Utc>,
}
