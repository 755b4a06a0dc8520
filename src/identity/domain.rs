//! Role and session types.

use crate::provider::domain::ProviderId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random user identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a user identifier from an existing UUID.
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

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of caller roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Anonymous visitor.
    Guest,
    /// Registered private user.
    User,
    /// Member of a company that receives leads.
    Company,
    /// Marketplace administrator.
    Admin,
    /// Administrator with full platform access.
    MasterAdmin,
    /// Editor of marketing content.
    ContentEditor,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::User => "user",
            Self::Company => "company",
            Self::Admin => "admin",
            Self::MasterAdmin => "master_admin",
            Self::ContentEditor => "content_editor",
        }
    }

    /// Returns `true` for roles that see every lead.
    #[must_use]
    pub const fn is_admin_tier(self) -> bool {
        match self {
            Self::Admin | Self::MasterAdmin => true,
            Self::Guest | Self::User | Self::Company | Self::ContentEditor => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "guest" => Ok(Self::Guest),
            "user" => Ok(Self::User),
            "company" => Ok(Self::Company),
            "admin" => Ok(Self::Admin),
            "master_admin" => Ok(Self::MasterAdmin),
            "content_editor" => Ok(Self::ContentEditor),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Error returned while parsing a role string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// The authenticated caller of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user_id: UserId,
    role: Role,
    company_id: Option<ProviderId>,
}

impl Session {
    /// Creates a session for a user with the given role.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            company_id: None,
        }
    }

    /// Creates a session for a company-role user acting for `company_id`.
    #[must_use]
    pub const fn for_company(user_id: UserId, company_id: ProviderId) -> Self {
        Self {
            user_id,
            role: Role::Company,
            company_id: Some(company_id),
        }
    }

    /// Attaches a company to the session.
    #[must_use]
    pub const fn with_company(mut self, company_id: ProviderId) -> Self {
        self.company_id = Some(company_id);
        self
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the caller role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the company the caller acts for, if any.
    #[must_use]
    pub const fn company_id(&self) -> Option<ProviderId> {
        self.company_id
    }
}
