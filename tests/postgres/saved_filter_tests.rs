//! The single-default rule for saved filters against `PostgreSQL`.

use crate::postgres::helpers::{TestDatabase, test_runtime};
use chrono::Utc;
use leadhub::identity::UserId;
use leadhub::saved_filter::adapters::postgres::PostgresSavedFilterRepository;
use leadhub::saved_filter::{
    domain::{SavedFilterId, SavedLeadFilter},
    ports::{SavedFilterRepository, SavedFilterRepositoryError},
};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use serde_json::json;

fn saved(user: UserId, name: &str) -> SavedLeadFilter {
    SavedLeadFilter::new(user, name, json!({"status": ["new"]}), &DefaultClock)
        .expect("valid filter")
}

#[rstest]
fn set_default_leaves_exactly_one_default(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "test_filter_default").expect("database");
    let repo = PostgresSavedFilterRepository::new(db.pool.clone());
    let rt = test_runtime().expect("runtime");
    let user = UserId::new();
    let neighbour = UserId::new();
    let fresh = saved(user, "Nye leads");
    let bergen = saved(user, "Bergen");
    let theirs = saved(neighbour, "Mine");
    for filter in [&fresh, &bergen, &theirs] {
        rt.block_on(repo.store(filter)).expect("store");
    }
    rt.block_on(repo.set_default(neighbour, theirs.id(), Utc::now()))
        .expect("neighbour default");

    rt.block_on(repo.set_default(user, fresh.id(), Utc::now()))
        .expect("first default");
    let promoted = rt
        .block_on(repo.set_default(user, bergen.id(), Utc::now()))
        .expect("second default");
    assert!(promoted.is_default());

    let defaults: Vec<SavedFilterId> = rt
        .block_on(repo.list_for_user(user))
        .expect("list")
        .iter()
        .filter(|filter| filter.is_default())
        .map(SavedLeadFilter::id)
        .collect();
    assert_eq!(defaults, vec![bergen.id()]);

    let untouched = rt
        .block_on(repo.find(neighbour, theirs.id()))
        .expect("lookup")
        .expect("filter exists");
    assert!(untouched.is_default());
}

#[rstest]
fn set_default_on_another_users_filter_is_not_found(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "test_filter_owner").expect("database");
    let repo = PostgresSavedFilterRepository::new(db.pool.clone());
    let rt = test_runtime().expect("runtime");
    let owner = UserId::new();
    let stranger = UserId::new();
    let mine = saved(owner, "Oslo");
    let other = saved(owner, "Trondheim");
    rt.block_on(repo.store(&mine)).expect("store");
    rt.block_on(repo.store(&other)).expect("store");
    rt.block_on(repo.set_default(owner, mine.id(), Utc::now()))
        .expect("owner default");

    let result = rt.block_on(repo.set_default(stranger, other.id(), Utc::now()));

    assert!(matches!(result, Err(SavedFilterRepositoryError::NotFound(id)) if id == other.id()));
    let kept = rt
        .block_on(repo.find(owner, mine.id()))
        .expect("lookup")
        .expect("filter exists");
    assert!(kept.is_default());
}
