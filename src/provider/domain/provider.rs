//! Provider aggregate.

use super::{ProviderDomainError, ProviderId, ProviderStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A company eligible to receive leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    id: ProviderId,
    name: String,
    status: ProviderStatus,
    tags: Vec<String>,
    categories: Vec<String>,
    last_lead_assigned_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProviderData {
    /// Persisted identifier.
    pub id: ProviderId,
    /// Persisted display name.
    pub name: String,
    /// Persisted availability status.
    pub status: ProviderStatus,
    /// Persisted free-form tags.
    pub tags: Vec<String>,
    /// Persisted service categories.
    pub categories: Vec<String>,
    /// Persisted fairness timestamp.
    pub last_lead_assigned_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Provider {
    /// Creates a new active provider that has never received a lead.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderDomainError::EmptyName`] when the name is blank.
    pub fn new(name: impl Into<String>, clock: &impl Clock) -> Result<Self, ProviderDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProviderDomainError::EmptyName);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: ProviderId::new(),
            name: trimmed.to_owned(),
            status: ProviderStatus::Active,
            tags: Vec::new(),
            categories: Vec::new(),
            last_lead_assigned_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a provider from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProviderData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            status: data.status,
            tags: data.tags,
            categories: data.categories,
            last_lead_assigned_at: data.last_lead_assigned_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Sets the provider's free-form tags. Blank entries are dropped.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = normalize_labels(tags);
        self
    }

    /// Sets the provider's service categories. Blank entries are dropped.
    #[must_use]
    pub fn with_categories(mut self, categories: impl IntoIterator<Item = String>) -> Self {
        self.categories = normalize_labels(categories);
        self
    }

    /// Sets the fairness timestamp, for seeding existing providers.
    #[must_use]
    pub const fn with_last_lead_assigned_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_lead_assigned_at = Some(at);
        self
    }

    /// Returns the provider identifier.
    #[must_use]
    pub const fn id(&self) -> ProviderId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the availability status.
    #[must_use]
    pub const fn status(&self) -> ProviderStatus {
        self.status
    }

    /// Returns `true` when the provider is eligible for distribution.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ProviderStatus::Active
    }

    /// Returns the free-form tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the service categories.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Returns every matching label: tags followed by categories.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .chain(self.categories.iter())
            .map(String::as_str)
    }

    /// Returns when the provider last received a lead.
    #[must_use]
    pub const fn last_lead_assigned_at(&self) -> Option<DateTime<Utc>> {
        self.last_lead_assigned_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Records that a lead was committed to this provider at `at`.
    pub fn record_assignment(&mut self, at: DateTime<Utc>) {
        self.last_lead_assigned_at = Some(at);
        self.updated_at = at;
    }

    /// Excludes the provider from distribution.
    pub fn deactivate(&mut self, clock: &impl Clock) {
        self.status = ProviderStatus::Inactive;
        self.updated_at = clock.utc();
    }

    /// Makes the provider eligible for distribution again.
    pub fn activate(&mut self, clock: &impl Clock) {
        self.status = ProviderStatus::Active;
        self.updated_at = clock.utc();
    }

    /// Orders providers oldest-assignment first.
    ///
    /// Providers that never received a lead sort before all others. Ties
    /// fall back to creation time and then identifier so the order is
    /// total.
    #[must_use]
    pub fn fairness_cmp(&self, other: &Self) -> Ordering {
        self.last_lead_assigned_at
            .cmp(&other.last_lead_assigned_at)
            .then_with(|| self.created_at.cmp(&other.created_at))
            .then_with(|| self.id.cmp(&other.id))
    }
}

fn normalize_labels(labels: impl IntoIterator<Item = String>) -> Vec<String> {
    labels
        .into_iter()
        .map(|label| label.trim().to_owned())
        .filter(|label| !label.is_empty())
        .collect()
}
