//! `PostgreSQL` implementation of the lead repository.

use super::{models::LeadRow, schema::leads};
use crate::identity::UserId;
use crate::lead::{
    domain::{Lead, LeadDomainError, LeadId, LeadStatus, PersistedLeadData},
    ports::{
        CandidateFilter, LeadAssignment, LeadListFilter, LeadRepository, LeadRepositoryError,
        LeadRepositoryResult, OwnerConstraint,
    },
    query::AssignedFilter,
};
use crate::provider::domain::ProviderId;
use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;

/// `PostgreSQL` connection pool type used by lead adapters.
pub type LeadPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed lead repository.
#[derive(Debug, Clone)]
pub struct PostgresLeadRepository {
    pool: LeadPgPool,
}

impl PostgresLeadRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: LeadPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> LeadRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> LeadRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(LeadRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(LeadRepositoryError::persistence)?
    }
}

#[async_trait]
impl LeadRepository for PostgresLeadRepository {
    async fn store(&self, lead: &Lead) -> LeadRepositoryResult<()> {
        let lead_id = lead.id();
        let row = to_row(lead);
        self.run_blocking(move |connection| {
            diesel::insert_into(leads::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        LeadRepositoryError::DuplicateLead(lead_id)
                    }
                    _ => LeadRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: LeadId) -> LeadRepositoryResult<Option<Lead>> {
        self.run_blocking(move |connection| {
            let row = leads::table
                .filter(leads::id.eq(id.into_inner()))
                .select(LeadRow::as_select())
                .first::<LeadRow>(connection)
                .optional()
                .map_err(LeadRepositoryError::persistence)?;
            row.map(row_to_lead).transpose()
        })
        .await
    }

    async fn find_candidates(&self, filter: &CandidateFilter) -> LeadRepositoryResult<Vec<Lead>> {
        let candidate_filter = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = leads::table
                .filter(leads::company_id.is_null())
                .select(LeadRow::as_select())
                .into_boxed::<Pg>();
            if candidate_filter.only_new {
                query = query.filter(leads::status.eq(LeadStatus::New.as_str()));
            }
            if let Some(lead_type) = candidate_filter.lead_type {
                query = query.filter(leads::lead_type.eq(lead_type));
            }
            let rows = query
                .order(leads::created_at.asc())
                .load::<LeadRow>(connection)
                .map_err(LeadRepositoryError::persistence)?;
            rows.into_iter().map(row_to_lead).collect()
        })
        .await
    }

    async fn assign(&self, assignment: LeadAssignment) -> LeadRepositoryResult<Lead> {
        let LeadAssignment {
            lead_id,
            provider_id,
            status,
            at,
        } = assignment;
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                leads::table
                    .filter(leads::id.eq(lead_id.into_inner()))
                    .filter(leads::company_id.is_null()),
            )
            .set((
                leads::company_id.eq(Some(provider_id.into_inner())),
                leads::status.eq(status.as_str()),
                leads::updated_at.eq(at),
            ))
            .returning(LeadRow::as_returning())
            .get_result::<LeadRow>(connection)
            .optional()
            .map_err(LeadRepositoryError::persistence)?;

            if let Some(row) = updated {
                return row_to_lead(row);
            }

            let exists = diesel::select(diesel::dsl::exists(
                leads::table.filter(leads::id.eq(lead_id.into_inner())),
            ))
            .get_result::<bool>(connection)
            .map_err(LeadRepositoryError::persistence)?;
            if exists {
                Err(LeadRepositoryError::AlreadyAssigned(lead_id))
            } else {
                Err(LeadRepositoryError::NotFound(lead_id))
            }
        })
        .await
    }

    async fn list(&self, filter: &LeadListFilter) -> LeadRepositoryResult<Vec<Lead>> {
        let list_filter = filter.clone();
        self.run_blocking(move |connection| {
            let zip_codes = list_filter.zip_codes.clone();
            let rows = build_list_query(list_filter)
                .order(leads::created_at.desc())
                .load::<LeadRow>(connection)
                .map_err(LeadRepositoryError::persistence)?;
            let found = rows
                .into_iter()
                .map(row_to_lead)
                .collect::<LeadRepositoryResult<Vec<_>>>()?;
            // Postal codes sit under several metadata keys; match them with
            // the same lookup the domain uses.
            Ok(found
                .into_iter()
                .filter(|lead| {
                    zip_codes.is_empty()
                        || lead
                            .postal_code()
                            .is_some_and(|code| zip_codes.contains(&code))
                })
                .collect())
        })
        .await
    }
}

fn build_list_query(filter: LeadListFilter) -> leads::BoxedQuery<'static, Pg> {
    let LeadListFilter {
        owner,
        statuses,
        categories,
        lead_types,
        search,
        created_from,
        created_to,
        assigned,
        ..
    } = filter;

    let mut query = leads::table.into_boxed::<Pg>();

    match owner {
        Some(OwnerConstraint::Company(provider)) => {
            query = query.filter(leads::company_id.eq(provider.into_inner()));
        }
        Some(OwnerConstraint::SubmittedBy(user)) => {
            query = query.filter(leads::submitted_by.eq(user.into_inner()));
        }
        None => {}
    }
    if !statuses.is_empty() {
        query = query.filter(leads::status.eq_any(statuses));
    }
    if !categories.is_empty() {
        query = query.filter(leads::category.eq_any(categories));
    }
    if !lead_types.is_empty() {
        query = query.filter(leads::lead_type.eq_any(lead_types));
    }
    if let Some(from) = created_from {
        query = query.filter(leads::created_at.ge(from));
    }
    if let Some(to) = created_to {
        query = query.filter(leads::created_at.le(to));
    }
    match assigned {
        AssignedFilter::All => {}
        AssignedFilter::Assigned => query = query.filter(leads::company_id.is_not_null()),
        AssignedFilter::Unassigned => query = query.filter(leads::company_id.is_null()),
    }
    if let Some(term) = search {
        let pattern = format!("%{}%", escape_like(&term));
        query = query.filter(
            leads::title
                .ilike(pattern.clone())
                .or(leads::description.ilike(pattern)),
        );
    }
    query
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn to_row(lead: &Lead) -> LeadRow {
    LeadRow {
        id: lead.id().into_inner(),
        title: lead.title().to_owned(),
        description: lead.description().map(str::to_owned),
        category: lead.category().to_owned(),
        lead_type: lead.lead_type().to_owned(),
        status: lead.raw_status().to_owned(),
        submitted_by: lead.submitted_by().map(UserId::into_inner),
        company_id: lead.company_id().map(ProviderId::into_inner),
        customer_name: lead.customer_name().map(str::to_owned),
        customer_email: lead.customer_email().map(str::to_owned),
        customer_phone: lead.customer_phone().map(str::to_owned),
        service_type: lead.service_type().map(str::to_owned),
        metadata: Value::Object(lead.metadata().clone()),
        created_at: lead.created_at(),
        updated_at: lead.updated_at(),
    }
}

fn row_to_lead(row: LeadRow) -> LeadRepositoryResult<Lead> {
    let LeadRow {
        id,
        title,
        description,
        category,
        lead_type,
        status,
        submitted_by,
        company_id,
        customer_name,
        customer_email,
        customer_phone,
        service_type,
        metadata,
        created_at,
        updated_at,
    } = row;

    let metadata_object = match metadata {
        Value::Object(map) => map,
        Value::Null => serde_json::Map::new(),
        Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Array(_) => {
            return Err(LeadRepositoryError::persistence(
                LeadDomainError::MetadataNotObject,
            ));
        }
    };

    Ok(Lead::from_persisted(PersistedLeadData {
        id: LeadId::from_uuid(id),
        title,
        description,
        category,
        lead_type,
        status,
        submitted_by: submitted_by.map(UserId::from_uuid),
        company_id: company_id.map(ProviderId::from_uuid),
        customer_name,
        customer_email,
        customer_phone,
        service_type,
        metadata: metadata_object,
        created_at,
        updated_at,
    }))
}
