//! Conditional assignment, listing and history against `PostgreSQL`.

use crate::postgres::helpers::{TestDatabase, test_runtime};
use chrono::Utc;
use leadhub::lead::{
    domain::{
        AssignmentMethod, AssignmentRecord, Lead, LeadDraft, LeadHistoryEntry, LeadId, LeadStatus,
    },
    ports::{
        LeadAssignment, LeadHistoryRepository, LeadListFilter, LeadRepository, LeadRepositoryError,
    },
};
use leadhub::provider::domain::ProviderId;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use serde_json::{Value, json};

fn draft(title: &str, metadata: Value) -> LeadDraft {
    LeadDraft {
        title: title.to_owned(),
        category: "plumbing".to_owned(),
        customer_name: Some("Kari Nordmann".to_owned()),
        metadata,
        ..LeadDraft::default()
    }
}

fn submitted(title: &str, metadata: Value) -> Lead {
    Lead::submit(draft(title, metadata), None, &DefaultClock).expect("valid draft")
}

fn assignment(lead_id: LeadId, provider_id: ProviderId) -> LeadAssignment {
    LeadAssignment {
        lead_id,
        provider_id,
        status: LeadStatus::Assigned,
        at: Utc::now(),
    }
}

#[rstest]
fn second_assignment_of_a_lead_is_rejected(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "test_lead_assign").expect("database");
    let repo = db.leads();
    let rt = test_runtime().expect("runtime");

    let (winner, loser) = rt.block_on(async {
        (
            db.register_provider("Rørlegger Hansen").await.expect("provider"),
            db.register_provider("Rørlegger Vik").await.expect("provider"),
        )
    });
    let lead = submitted("Lekkasje under vask", json!({}));
    rt.block_on(repo.store(&lead)).expect("store");

    let first = rt
        .block_on(repo.assign(assignment(lead.id(), winner.id())))
        .expect("first assignment succeeds");
    assert_eq!(first.company_id(), Some(winner.id()));
    assert_eq!(first.raw_status(), "assigned");

    let second = rt.block_on(repo.assign(assignment(lead.id(), loser.id())));
    assert!(matches!(second, Err(LeadRepositoryError::AlreadyAssigned(id)) if id == lead.id()));

    let stored = rt
        .block_on(repo.find_by_id(lead.id()))
        .expect("lookup")
        .expect("lead exists");
    assert_eq!(stored.company_id(), Some(winner.id()));
}

#[rstest]
fn assigning_an_unknown_lead_reports_not_found(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "test_lead_missing").expect("database");
    let repo = db.leads();
    let rt = test_runtime().expect("runtime");
    let provider = rt
        .block_on(db.register_provider("Taktekker Lie"))
        .expect("provider");

    let missing = LeadId::new();
    let result = rt.block_on(repo.assign(assignment(missing, provider.id())));

    assert!(matches!(result, Err(LeadRepositoryError::NotFound(id)) if id == missing));
}

#[rstest]
fn assignment_writes_the_requested_status(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "test_lead_status").expect("database");
    let repo = db.leads();
    let rt = test_runtime().expect("runtime");
    let provider = rt
        .block_on(db.register_provider("Snekker Berg"))
        .expect("provider");
    let lead = submitted("Ny terrasse", json!({}));
    rt.block_on(repo.store(&lead)).expect("store");

    let qualified = LeadAssignment {
        status: LeadStatus::Qualified,
        ..assignment(lead.id(), provider.id())
    };
    rt.block_on(repo.assign(qualified)).expect("assign");

    let stored = rt
        .block_on(repo.find_by_id(lead.id()))
        .expect("lookup")
        .expect("lead exists");
    assert_eq!(stored.status(), Some(LeadStatus::Qualified));
}

#[rstest]
fn listing_matches_postal_codes_under_every_key(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "test_lead_zip").expect("database");
    let repo = db.leads();
    let rt = test_runtime().expect("runtime");

    let bergen = submitted("Bergen", json!({"postcode": "5003"}));
    let oslo_text = submitted("Oslo tekst", json!({"zip_code": "0150"}));
    let oslo_number = submitted("Oslo tall", json!({"zipCode": 150}));
    let unknown = submitted("Ukjent", json!({"city": "Tromsø"}));
    for lead in [&bergen, &oslo_text, &oslo_number, &unknown] {
        rt.block_on(repo.store(lead)).expect("store");
    }

    let filter = LeadListFilter {
        zip_codes: vec!["0150".to_owned()],
        ..LeadListFilter::default()
    };
    let listed = rt.block_on(repo.list(&filter)).expect("list");

    let mut ids: Vec<LeadId> = listed.iter().map(Lead::id).collect();
    ids.sort_unstable_by_key(|id| id.into_inner());
    let mut expected = vec![oslo_text.id(), oslo_number.id()];
    expected.sort_unstable_by_key(|id| id.into_inner());
    assert_eq!(ids, expected);
}

#[rstest]
fn history_reports_which_providers_were_served(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "test_lead_history").expect("database");
    let repo = db.leads();
    let history = db.history();
    let rt = test_runtime().expect("runtime");
    let (served, idle) = rt.block_on(async {
        (
            db.register_provider("Elektro Vik").await.expect("provider"),
            db.register_provider("Maler Dahl").await.expect("provider"),
        )
    });
    let lead = submitted("Nytt sikringsskap", json!({}));
    rt.block_on(repo.store(&lead)).expect("store");

    let entry = LeadHistoryEntry::assignment(
        lead.id(),
        served.id(),
        AssignmentMethod::Auto,
        ("new".to_owned(), "assigned".to_owned()),
        AssignmentRecord {
            strategy: "round_robin".to_owned(),
            reasoning: "Elektro Vik has waited longest for a lead".to_owned(),
            timestamp: Utc::now(),
        },
    );
    rt.block_on(history.append(&entry)).expect("append");

    let assigned = rt
        .block_on(history.assigned_providers(&[served.id(), idle.id()]))
        .expect("assigned providers");
    assert!(assigned.contains(&served.id()));
    assert!(!assigned.contains(&idle.id()));

    let entries = rt
        .block_on(history.list_for_lead(lead.id()))
        .expect("list history");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].metadata.strategy, "round_robin");
}
