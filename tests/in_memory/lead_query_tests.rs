//! In-memory integration tests for the role-scoped lead listing.

use super::helpers::{Marketplace, marketplace};
use chrono::{Duration, Utc};
use leadhub::identity::{Role, Session, UserId};
use leadhub::lead::{
    domain::{Lead, LeadId, PersistedLeadData},
    ports::LeadRepository,
    query::{LeadQueryOptions, QueryValidationError},
    services::LeadQueryError,
};
use leadhub::provider::domain::ProviderId;
use rstest::rstest;
use serde_json::{Map, json};

struct Seed<'a> {
    status: &'a str,
    owner: Option<ProviderId>,
    submitter: Option<UserId>,
    minutes_ago: i64,
}

async fn seed(marketplace: &Marketplace, spec: Seed<'_>) -> eyre::Result<Lead> {
    let created_at = Utc::now() - Duration::minutes(spec.minutes_ago);
    let lead = Lead::from_persisted(PersistedLeadData {
        id: LeadId::new(),
        title: format!("Oppdrag {}", spec.status),
        description: Some("Bad og kjøkken".to_owned()),
        category: "plumbing".to_owned(),
        lead_type: "standard".to_owned(),
        status: spec.status.to_owned(),
        submitted_by: spec.submitter,
        company_id: spec.owner,
        customer_name: None,
        customer_email: None,
        customer_phone: None,
        service_type: None,
        metadata: Map::new(),
        created_at,
        updated_at: created_at,
    });
    marketplace.leads.store(&lead).await?;
    Ok(lead)
}

const fn owned_by(status: &str, owner: ProviderId, minutes_ago: i64) -> Seed<'_> {
    Seed {
        status,
        owner: Some(owner),
        submitter: None,
        minutes_ago,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn company_listing_is_scoped_to_the_callers_company(
    marketplace: Marketplace,
) -> eyre::Result<()> {
    let own = ProviderId::new();
    let rival = ProviderId::new();
    let fresh = seed(&marketplace, owned_by("new", own, 1)).await?;
    let qualified = seed(&marketplace, owned_by("qualified", own, 5)).await?;
    seed(&marketplace, owned_by("closed", own, 10)).await?;
    seed(&marketplace, owned_by("new", rival, 2)).await?;
    seed(&marketplace, owned_by("qualified", rival, 3)).await?;

    let caller = Session::for_company(UserId::new(), own);
    let listed = marketplace
        .query_as(Some(caller))
        .fetch_leads_json(json!({
            "status": ["new", "qualified"],
            "companyId": rival.to_string(),
        }))
        .await?;

    let ids: Vec<LeadId> = listed.iter().map(Lead::id).collect();
    eyre::ensure!(
        ids == vec![fresh.id(), qualified.id()],
        "expected the caller's open leads newest first, got {ids:?}"
    );
    eyre::ensure!(
        listed.iter().all(|lead| lead.company_id() == Some(own)),
        "a rival lead leaked into the listing"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn private_user_sees_only_own_submissions(marketplace: Marketplace) -> eyre::Result<()> {
    let user = UserId::new();
    let mine = seed(
        &marketplace,
        Seed {
            status: "new",
            owner: None,
            submitter: Some(user),
            minutes_ago: 1,
        },
    )
    .await?;
    seed(
        &marketplace,
        Seed {
            status: "new",
            owner: None,
            submitter: Some(UserId::new()),
            minutes_ago: 2,
        },
    )
    .await?;

    let listed = marketplace
        .query_as(Some(Session::new(user, Role::User)))
        .fetch_leads(LeadQueryOptions::default())
        .await?;

    let ids: Vec<LeadId> = listed.iter().map(Lead::id).collect();
    eyre::ensure!(ids == vec![mine.id()], "unexpected listing {ids:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_sees_everything_and_guests_nothing(marketplace: Marketplace) -> eyre::Result<()> {
    seed(&marketplace, owned_by("new", ProviderId::new(), 1)).await?;
    seed(&marketplace, owned_by("won", ProviderId::new(), 2)).await?;

    let admin = marketplace
        .query_as(Some(Session::new(UserId::new(), Role::MasterAdmin)))
        .fetch_leads(LeadQueryOptions::default())
        .await?;
    let guest = marketplace
        .query_as(Some(Session::new(UserId::new(), Role::Guest)))
        .fetch_leads(LeadQueryOptions::default())
        .await?;
    let anonymous = marketplace
        .query_as(None)
        .fetch_leads(LeadQueryOptions::default())
        .await?;

    eyre::ensure!(admin.len() == 2, "admin should see both leads");
    eyre::ensure!(guest.is_empty(), "guest saw leads");
    eyre::ensure!(anonymous.is_empty(), "anonymous caller saw leads");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unsafe_search_is_rejected_before_reading(marketplace: Marketplace) -> eyre::Result<()> {
    let admin = Session::new(UserId::new(), Role::Admin);
    let result = marketplace
        .query_as(Some(admin))
        .fetch_leads_json(json!({"searchTerm": "<script>alert(1)</script>"}))
        .await;

    eyre::ensure!(
        result
            == Err(LeadQueryError::Validation(
                QueryValidationError::InvalidSearchCharacter('<')
            )),
        "expected a validation error, got {result:?}"
    );
    Ok(())
}
