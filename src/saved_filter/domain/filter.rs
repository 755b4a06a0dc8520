//! The saved filter aggregate.

use super::SavedFilterDomainError;
use crate::identity::UserId;
use crate::lead::query::LeadQueryOptions;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Maximum characters in a trimmed filter name.
pub const MAX_FILTER_NAME_CHARS: usize = 100;

/// Unique identifier for a saved filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedFilterId(Uuid);

impl SavedFilterId {
    /// Creates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for SavedFilterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SavedFilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A request to save the current lead filter under a name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFilterRequest {
    /// Display name.
    pub name: String,
    /// Raw query options, as sent by the lead list.
    pub filter_data: Value,
    /// Make this filter the user's default once stored.
    #[serde(default)]
    pub make_default: bool,
}

/// A named lead filter preset owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedLeadFilter {
    id: SavedFilterId,
    user_id: UserId,
    name: String,
    filter_data: Map<String, Value>,
    is_default: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSavedFilterData {
    /// Persisted identifier.
    pub id: SavedFilterId,
    /// Persisted owner.
    pub user_id: UserId,
    /// Persisted name.
    pub name: String,
    /// Persisted payload.
    pub filter_data: Map<String, Value>,
    /// Persisted default flag.
    pub is_default: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl SavedLeadFilter {
    /// Validates and creates a non-default filter.
    ///
    /// # Errors
    ///
    /// Returns [`SavedFilterDomainError`] when the trimmed name is empty or
    /// longer than [`MAX_FILTER_NAME_CHARS`], or when `filter_data` is not
    /// a JSON object.
    pub fn new(
        user_id: UserId,
        name: &str,
        filter_data: Value,
        clock: &impl Clock,
    ) -> Result<Self, SavedFilterDomainError> {
        let trimmed = name.trim();
        let length = trimmed.chars().count();
        if length == 0 {
            return Err(SavedFilterDomainError::EmptyName);
        }
        if length > MAX_FILTER_NAME_CHARS {
            return Err(SavedFilterDomainError::NameTooLong {
                max: MAX_FILTER_NAME_CHARS,
                actual: length,
            });
        }
        let Value::Object(data) = filter_data else {
            return Err(SavedFilterDomainError::DataNotObject);
        };
        let timestamp = clock.utc();
        Ok(Self {
            id: SavedFilterId::new(),
            user_id,
            name: trimmed.to_owned(),
            filter_data: data,
            is_default: false,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a filter from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSavedFilterData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            name: data.name,
            filter_data: data.filter_data,
            is_default: data.is_default,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> SavedFilterId {
        self.id
    }

    /// Returns the owner.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw payload.
    #[must_use]
    pub const fn filter_data(&self) -> &Map<String, Value> {
        &self.filter_data
    }

    /// Returns `true` for the user's default filter.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.is_default
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

    /// Interprets the payload as lead query options.
    ///
    /// # Errors
    ///
    /// Returns the deserialisation error when the payload does not have the
    /// shape of [`LeadQueryOptions`].
    pub fn query_options(&self) -> Result<LeadQueryOptions, serde_json::Error> {
        serde_json::from_value(Value::Object(self.filter_data.clone()))
    }

    /// Sets or clears the default flag.
    pub const fn set_default(&mut self, is_default: bool, at: DateTime<Utc>) {
        self.is_default = is_default;
        self.updated_at = at;
    }
}
