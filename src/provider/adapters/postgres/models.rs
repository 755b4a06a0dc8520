//! Diesel row models for provider persistence.

use super::schema::company_profiles;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for company profiles.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = company_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProviderRow {
    /// Provider identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Availability status.
    pub status: String,
    /// Matching tags.
    pub tags: Vec<String>,
    /// Service categories.
    pub categories: Vec<String>,
    /// Fairness timestamp.
    pub last_lead_assigned_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for company profiles.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = company_profiles)]
pub struct NewProviderRow {
    /// Provider identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Availability status.
    pub status: String,
    /// Matching tags.
    pub tags: Vec<String>,
    /// Service categories.
    pub categories: Vec<String>,
    /// Fairness timestamp.
    pub last_lead_assigned_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
