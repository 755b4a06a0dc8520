//! Versioned settings appends against `PostgreSQL`.

use crate::postgres::helpers::{TestDatabase, test_runtime};
use chrono::Utc;
use leadhub::distribution::domain::DistributionStrategy;
use leadhub::settings::adapters::postgres::PostgresSettingsStore;
use leadhub::settings::{
    domain::{DistributionFilters, LeadSettings, PauseState, SettingsScope, SettingsVersion},
    ports::{SettingsStore, SettingsStoreError},
};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;

fn round_robin() -> LeadSettings {
    LeadSettings {
        strategy: Some(DistributionStrategy::RoundRobin),
        ..LeadSettings::default()
    }
}

#[rstest]
fn appends_advance_the_version(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "test_settings_append").expect("database");
    let store = PostgresSettingsStore::new(db.pool.clone());
    let rt = test_runtime().expect("runtime");

    let first = rt
        .block_on(store.append(
            SettingsScope::Global,
            SettingsVersion::NONE,
            round_robin(),
            Utc::now(),
        ))
        .expect("first append");
    assert_eq!(first.version, SettingsVersion::new(1));

    let filters =
        DistributionFilters::new(vec!["plumbing".to_owned()], Vec::new(), Vec::new())
            .expect("valid filters");
    let paused = LeadSettings {
        filters: Some(filters),
        pause: PauseState::PausedGlobally,
        ..round_robin()
    };
    let second = rt
        .block_on(store.append(
            SettingsScope::Global,
            first.version,
            paused.clone(),
            Utc::now(),
        ))
        .expect("second append");
    assert_eq!(second.version, SettingsVersion::new(2));

    let current = rt
        .block_on(store.current(SettingsScope::Global))
        .expect("current")
        .expect("revision exists");
    assert_eq!(current.version, SettingsVersion::new(2));
    assert_eq!(current.settings, paused);

    let history = rt
        .block_on(store.history(SettingsScope::Global))
        .expect("history");
    assert_eq!(history.len(), 2);
}

#[rstest]
fn stale_version_is_a_conflict(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "test_settings_stale").expect("database");
    let store = PostgresSettingsStore::new(db.pool.clone());
    let rt = test_runtime().expect("runtime");

    rt.block_on(store.append(
        SettingsScope::Global,
        SettingsVersion::NONE,
        round_robin(),
        Utc::now(),
    ))
    .expect("first writer");

    let stale = rt.block_on(store.append(
        SettingsScope::Global,
        SettingsVersion::NONE,
        LeadSettings::default(),
        Utc::now(),
    ));

    assert!(matches!(
        stale,
        Err(SettingsStoreError::VersionConflict {
            scope: SettingsScope::Global,
            expected,
            actual,
        }) if expected == SettingsVersion::NONE && actual == SettingsVersion::new(1)
    ));
    let current = rt
        .block_on(store.current(SettingsScope::Global))
        .expect("current")
        .expect("revision exists");
    assert_eq!(current.settings, round_robin());
}

#[rstest]
fn company_scope_is_versioned_separately(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "test_settings_scope").expect("database");
    let store = PostgresSettingsStore::new(db.pool.clone());
    let rt = test_runtime().expect("runtime");
    let company = rt
        .block_on(db.register_provider("Vestland Tak"))
        .expect("provider");
    let scope = SettingsScope::Company(company.id());

    rt.block_on(store.append(
        SettingsScope::Global,
        SettingsVersion::NONE,
        LeadSettings::default(),
        Utc::now(),
    ))
    .expect("global append");
    let scoped = rt
        .block_on(store.append(scope, SettingsVersion::NONE, round_robin(), Utc::now()))
        .expect("company append");

    assert_eq!(scoped.scope, scope);
    assert_eq!(scoped.version, SettingsVersion::new(1));
    let current = rt
        .block_on(store.current(scope))
        .expect("current")
        .expect("revision exists");
    assert_eq!(current.settings.strategy, Some(DistributionStrategy::RoundRobin));
}
