//! Builders shared by the distribution tests.

use crate::lead::domain::{Lead, LeadId, PersistedLeadData};
use crate::provider::domain::{PersistedProviderData, Provider, ProviderId, ProviderStatus};
use crate::settings::domain::{DistributionFilters, LeadSettings};
use chrono::{DateTime, Duration, Utc};
use mockable::DefaultClock;
use serde_json::{Map, Value};

pub(super) fn lead(category: &str, metadata: Value) -> Lead {
    build_lead(category, "new", metadata, Utc::now())
}

pub(super) fn lead_created(category: &str, created_at: DateTime<Utc>) -> Lead {
    build_lead(category, "new", Value::Null, created_at)
}

pub(super) fn lead_with_status(category: &str, status: &str) -> Lead {
    build_lead(category, status, Value::Null, Utc::now())
}

fn build_lead(category: &str, status: &str, metadata: Value, created_at: DateTime<Utc>) -> Lead {
    let metadata_object = match metadata {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    Lead::from_persisted(PersistedLeadData {
        id: LeadId::new(),
        title: format!("Trenger hjelp med {category}"),
        description: None,
        category: category.to_owned(),
        lead_type: "standard".to_owned(),
        status: status.to_owned(),
        submitted_by: None,
        company_id: None,
        customer_name: Some("Kari Nordmann".to_owned()),
        customer_email: Some("kari@example.no".to_owned()),
        customer_phone: None,
        service_type: None,
        metadata: metadata_object,
        created_at,
        updated_at: created_at,
    })
}

pub(super) fn provider(name: &str) -> Provider {
    Provider::new(name, &DefaultClock).expect("valid provider")
}

/// A never-served provider registered `minutes_ago`, for stable ordering.
pub(super) fn provider_created(name: &str, minutes_ago: i64) -> Provider {
    let created_at = Utc::now() - Duration::minutes(minutes_ago);
    Provider::from_persisted(PersistedProviderData {
        id: ProviderId::new(),
        name: name.to_owned(),
        status: ProviderStatus::Active,
        tags: Vec::new(),
        categories: Vec::new(),
        last_lead_assigned_at: None,
        created_at,
        updated_at: created_at,
    })
}

pub(super) fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

pub(super) fn provider_served(name: &str, days_ago: i64) -> Provider {
    provider(name).with_last_lead_assigned_at(Utc::now() - Duration::days(days_ago))
}

pub(super) fn filtered_settings(
    categories: &[&str],
    zip_codes: &[&str],
    lead_types: &[&str],
) -> LeadSettings {
    LeadSettings {
        filters: Some(
            DistributionFilters::new(labels(categories), labels(zip_codes), labels(lead_types))
                .expect("valid filters"),
        ),
        ..LeadSettings::default()
    }
}
