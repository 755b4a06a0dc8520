//! Lead aggregate root.

use super::{LeadDomainError, LeadId, LeadStatus, PipelineStage, postal_code};
use crate::identity::UserId;
use crate::provider::domain::ProviderId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Maximum length of an e-mail address.
const MAX_EMAIL_LENGTH: usize = 254;

/// Lead type applied when a submission does not name one.
const DEFAULT_LEAD_TYPE: &str = "standard";

/// An inbound service request.
///
/// `status` is kept as the persisted string so that rows written by other
/// clients with unrecognised values can still be read; [`Lead::status`]
/// parses it on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    id: LeadId,
    title: String,
    description: Option<String>,
    category: String,
    lead_type: String,
    status: String,
    submitted_by: Option<UserId>,
    company_id: Option<ProviderId>,
    customer_name: Option<String>,
    customer_email: Option<String>,
    customer_phone: Option<String>,
    service_type: Option<String>,
    metadata: Map<String, Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Unvalidated lead content supplied at submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadDraft {
    /// Short description of the job.
    pub title: String,
    /// Longer free-text description.
    pub description: Option<String>,
    /// Service category, for example `plumbing`.
    pub category: String,
    /// Tier label; defaults to `standard` when blank.
    pub lead_type: Option<String>,
    /// Customer name.
    pub customer_name: Option<String>,
    /// Customer e-mail address.
    pub customer_email: Option<String>,
    /// Customer phone number.
    pub customer_phone: Option<String>,
    /// Service type chosen in the submission wizard.
    pub service_type: Option<String>,
    /// Additional wizard answers.
    pub metadata: Value,
}

/// Parameter object for reconstructing a persisted lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedLeadData {
    /// Persisted identifier.
    pub id: LeadId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted category.
    pub category: String,
    /// Persisted lead type.
    pub lead_type: String,
    /// Persisted raw status.
    pub status: String,
    /// Persisted submitter.
    pub submitted_by: Option<UserId>,
    /// Persisted owning provider.
    pub company_id: Option<ProviderId>,
    /// Persisted customer name.
    pub customer_name: Option<String>,
    /// Persisted customer e-mail.
    pub customer_email: Option<String>,
    /// Persisted customer phone.
    pub customer_phone: Option<String>,
    /// Persisted service type.
    pub service_type: Option<String>,
    /// Persisted metadata object.
    pub metadata: Map<String, Value>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Validates a draft and creates a new, unassigned lead.
    ///
    /// # Errors
    ///
    /// Returns [`LeadDomainError`] when the title or category is blank, the
    /// e-mail address is malformed, or the metadata is not a JSON object.
    pub fn submit(
        draft: LeadDraft,
        submitted_by: Option<UserId>,
        clock: &impl Clock,
    ) -> Result<Self, LeadDomainError> {
        let LeadDraft {
            title,
            description,
            category,
            lead_type,
            customer_name,
            customer_email,
            customer_phone,
            service_type,
            metadata,
        } = draft;

        let clean_title = non_blank(Some(title)).ok_or(LeadDomainError::EmptyTitle)?;
        let clean_category = non_blank(Some(category)).ok_or(LeadDomainError::EmptyCategory)?;
        let clean_email = non_blank(customer_email);
        if let Some(email) = clean_email.as_deref() {
            validate_email(email)?;
        }
        let metadata_object = match metadata {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Array(_) => {
                return Err(LeadDomainError::MetadataNotObject);
            }
        };

        let timestamp = clock.utc();
        Ok(Self {
            id: LeadId::new(),
            title: clean_title,
            description: non_blank(description),
            category: clean_category,
            lead_type: non_blank(lead_type).unwrap_or_else(|| DEFAULT_LEAD_TYPE.to_owned()),
            status: LeadStatus::New.as_str().to_owned(),
            submitted_by,
            company_id: None,
            customer_name: non_blank(customer_name),
            customer_email: clean_email,
            customer_phone: non_blank(customer_phone),
            service_type: non_blank(service_type),
            metadata: metadata_object,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a lead from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedLeadData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            category: data.category,
            lead_type: data.lead_type,
            status: data.status,
            submitted_by: data.submitted_by,
            company_id: data.company_id,
            customer_name: data.customer_name,
            customer_email: data.customer_email,
            customer_phone: data.customer_phone,
            service_type: data.service_type,
            metadata: data.metadata,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the lead identifier.
    #[must_use]
    pub const fn id(&self) -> LeadId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the service category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the lead type (tier label).
    #[must_use]
    pub fn lead_type(&self) -> &str {
        &self.lead_type
    }

    /// Returns the status exactly as persisted.
    #[must_use]
    pub fn raw_status(&self) -> &str {
        &self.status
    }

    /// Returns the parsed status, or `None` for unrecognised values.
    #[must_use]
    pub fn status(&self) -> Option<LeadStatus> {
        LeadStatus::try_from(self.status.as_str()).ok()
    }

    /// Returns the kanban stage, or `None` for unrecognised statuses.
    #[must_use]
    pub fn pipeline_stage(&self) -> Option<PipelineStage> {
        self.status().map(LeadStatus::pipeline_stage)
    }

    /// Returns the submitting user, or `None` for anonymous submissions.
    #[must_use]
    pub const fn submitted_by(&self) -> Option<UserId> {
        self.submitted_by
    }

    /// Returns the owning provider, if assigned.
    #[must_use]
    pub const fn company_id(&self) -> Option<ProviderId> {
        self.company_id
    }

    /// Returns `true` once the lead has an owning provider.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.company_id.is_some()
    }

    /// Returns the customer name.
    #[must_use]
    pub fn customer_name(&self) -> Option<&str> {
        self.customer_name.as_deref()
    }

    /// Returns the customer e-mail address.
    #[must_use]
    pub fn customer_email(&self) -> Option<&str> {
        self.customer_email.as_deref()
    }

    /// Returns the customer phone number.
    #[must_use]
    pub fn customer_phone(&self) -> Option<&str> {
        self.customer_phone.as_deref()
    }

    /// Returns the service type.
    #[must_use]
    pub fn service_type(&self) -> Option<&str> {
        self.service_type.as_deref()
    }

    /// Returns the metadata object.
    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Returns the postal code found in metadata, if any.
    #[must_use]
    pub fn postal_code(&self) -> Option<String> {
        postal_code(&self.metadata)
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

    /// Commits the lead to `provider` and moves it to `status`.
    pub fn assign_to(&mut self, provider: ProviderId, status: LeadStatus, at: DateTime<Utc>) {
        self.company_id = Some(provider);
        self.status = status.as_str().to_owned();
        self.updated_at = at;
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

fn validate_email(email: &str) -> Result<(), LeadDomainError> {
    let invalid = || LeadDomainError::InvalidEmail(email.to_owned());
    if email.len() > MAX_EMAIL_LENGTH || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    let domain_is_valid = !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty());
    if local.is_empty() || !domain_is_valid {
        return Err(invalid());
    }
    Ok(())
}
