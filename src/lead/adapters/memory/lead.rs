//! In-memory lead repository for tests and local runs.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::lead::{
    domain::{Lead, LeadId, LeadStatus},
    ports::{
        CandidateFilter, LeadAssignment, LeadListFilter, LeadRepository, LeadRepositoryError,
        LeadRepositoryResult, OwnerConstraint,
    },
};

/// Thread-safe in-memory lead repository.
///
/// Leads are kept in insertion order so that candidates sharing a creation
/// timestamp come back in a stable order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLeadRepository {
    state: Arc<RwLock<Vec<Lead>>>,
}

impl InMemoryLeadRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: &impl ToString) -> LeadRepositoryError {
    LeadRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl LeadRepository for InMemoryLeadRepository {
    async fn store(&self, lead: &Lead) -> LeadRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        if state.iter().any(|existing| existing.id() == lead.id()) {
            return Err(LeadRepositoryError::DuplicateLead(lead.id()));
        }
        state.push(lead.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: LeadId) -> LeadRepositoryResult<Option<Lead>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.iter().find(|lead| lead.id() == id).cloned())
    }

    async fn find_candidates(&self, filter: &CandidateFilter) -> LeadRepositoryResult<Vec<Lead>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        let mut candidates: Vec<Lead> = state
            .iter()
            .filter(|lead| !lead.is_assigned())
            .filter(|lead| !filter.only_new || lead.raw_status() == LeadStatus::New.as_str())
            .filter(|lead| {
                filter
                    .lead_type
                    .as_deref()
                    .is_none_or(|wanted| lead.lead_type() == wanted)
            })
            .cloned()
            .collect();
        candidates.sort_by_key(Lead::created_at);
        Ok(candidates)
    }

    async fn assign(&self, assignment: LeadAssignment) -> LeadRepositoryResult<Lead> {
        let LeadAssignment {
            lead_id,
            provider_id,
            status,
            at,
        } = assignment;
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let lead = state
            .iter_mut()
            .find(|lead| lead.id() == lead_id)
            .ok_or(LeadRepositoryError::NotFound(lead_id))?;
        if lead.is_assigned() {
            return Err(LeadRepositoryError::AlreadyAssigned(lead_id));
        }
        lead.assign_to(provider_id, status, at);
        Ok(lead.clone())
    }

    async fn list(&self, filter: &LeadListFilter) -> LeadRepositoryResult<Vec<Lead>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        let mut leads: Vec<Lead> = state
            .iter()
            .filter(|lead| list_filter_admits(filter, lead))
            .cloned()
            .collect();
        leads.sort_by_key(|lead| std::cmp::Reverse(lead.created_at()));
        Ok(leads)
    }
}

fn list_filter_admits(filter: &LeadListFilter, lead: &Lead) -> bool {
    let owner_matches = match filter.owner {
        None => true,
        Some(OwnerConstraint::Company(provider)) => lead.company_id() == Some(provider),
        Some(OwnerConstraint::SubmittedBy(user)) => lead.submitted_by() == Some(user),
    };
    owner_matches
        && any_or_empty(&filter.statuses, lead.raw_status())
        && any_or_empty(&filter.categories, lead.category())
        && any_or_empty(&filter.lead_types, lead.lead_type())
        && (filter.zip_codes.is_empty()
            || lead
                .postal_code()
                .is_some_and(|code| filter.zip_codes.contains(&code)))
        && filter
            .created_from
            .is_none_or(|from| lead.created_at() >= from)
        && filter.created_to.is_none_or(|to| lead.created_at() <= to)
        && filter.assigned.admits(lead.is_assigned())
        && filter
            .search
            .as_deref()
            .is_none_or(|term| search_matches(lead, term))
}

fn any_or_empty(allowed: &[String], value: &str) -> bool {
    allowed.is_empty() || allowed.iter().any(|candidate| candidate == value)
}

fn search_matches(lead: &Lead, term: &str) -> bool {
    let needle = term.to_lowercase();
    lead.title().to_lowercase().contains(&needle)
        || lead
            .description()
            .is_some_and(|text| text.to_lowercase().contains(&needle))
}
