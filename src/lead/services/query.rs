//! Role-scoped, validated lead listing.

use crate::identity::{Role, Session, SessionProvider};
use crate::lead::{
    domain::{Lead, LeadId},
    ports::{LeadRepository, OwnerConstraint},
    query::{LeadQueryOptions, QueryLimits, QueryValidationError, validate},
};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by [`LeadQueryService::fetch_leads`].
///
/// Only validation failures reach the caller; store and session failures
/// are logged and produce an empty list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LeadQueryError {
    /// The options were rejected before any store call.
    #[error("invalid lead query: {0}")]
    Validation(#[from] QueryValidationError),
}

/// Outcome of mapping a session onto a row constraint.
enum Scope {
    /// The caller may see nothing.
    Deny,
    /// The caller may see rows matching the optional constraint.
    Allow(Option<OwnerConstraint>),
}

/// Validated, role-scoped read path for leads.
#[derive(Clone)]
pub struct LeadQueryService<R, S>
where
    R: LeadRepository,
    S: SessionProvider,
{
    repository: Arc<R>,
    sessions: Arc<S>,
    limits: QueryLimits,
}

impl<R, S> LeadQueryService<R, S>
where
    R: LeadRepository,
    S: SessionProvider,
{
    /// Creates a new query service.
    #[must_use]
    pub const fn new(repository: Arc<R>, sessions: Arc<S>, limits: QueryLimits) -> Self {
        Self {
            repository,
            sessions,
            limits,
        }
    }

    /// Validates `options`, scopes them to the caller and lists leads.
    ///
    /// Results are newest first with duplicate identifiers removed.
    ///
    /// # Errors
    ///
    /// Returns [`LeadQueryError::Validation`] when any option fails
    /// validation. No store call is made in that case.
    pub async fn fetch_leads(
        &self,
        options: LeadQueryOptions,
    ) -> Result<Vec<Lead>, LeadQueryError> {
        let validated = validate(options, &self.limits)?;

        let session = match self.sessions.current_session().await {
            Ok(session) => session,
            Err(err) => {
                tracing::error!(error = %err, "failed to resolve session for lead query");
                return Ok(Vec::new());
            }
        };

        let owner = match scope_for(session.as_ref()) {
            Scope::Deny => {
                tracing::debug!("lead query denied for caller without a readable scope");
                return Ok(Vec::new());
            }
            Scope::Allow(owner) => owner,
        };

        let filter = validated.into_list_filter(owner);
        match self.repository.list(&filter).await {
            Ok(leads) => Ok(dedup_by_id(leads)),
            Err(err) => {
                tracing::error!(error = %err, "lead query failed");
                Ok(Vec::new())
            }
        }
    }

    /// Decodes camelCase JSON options and runs [`Self::fetch_leads`].
    ///
    /// # Errors
    ///
    /// Returns [`LeadQueryError::Validation`] when the JSON does not match
    /// the option schema or fails validation.
    pub async fn fetch_leads_json(
        &self,
        raw: serde_json::Value,
    ) -> Result<Vec<Lead>, LeadQueryError> {
        let options = LeadQueryOptions::from_json(raw)?;
        self.fetch_leads(options).await
    }
}

fn scope_for(session: Option<&Session>) -> Scope {
    let Some(current) = session else {
        return Scope::Deny;
    };
    match current.role() {
        Role::Company => current
            .company_id()
            .map_or(Scope::Deny, |company| {
                Scope::Allow(Some(OwnerConstraint::Company(company)))
            }),
        Role::User | Role::ContentEditor => {
            Scope::Allow(Some(OwnerConstraint::SubmittedBy(current.user_id())))
        }
        Role::Admin | Role::MasterAdmin => Scope::Allow(None),
        Role::Guest => Scope::Deny,
    }
}

fn dedup_by_id(leads: Vec<Lead>) -> Vec<Lead> {
    let mut seen: HashSet<LeadId> = HashSet::with_capacity(leads.len());
    leads
        .into_iter()
        .filter(|lead| seen.insert(lead.id()))
        .collect()
}
