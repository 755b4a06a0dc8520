//! In-memory integration tests for submission, distribution and read-back.

use super::helpers::{Marketplace, marketplace};
use leadhub::distribution::domain::DistributionStrategy;
use leadhub::distribution::services::BatchRequest;
use leadhub::identity::{Role, Session, UserId};
use leadhub::lead::domain::AssignmentMethod;
use leadhub::notification::Severity;
use leadhub::provider::{domain::ProviderId, ports::ProviderDirectory};
use leadhub::settings::domain::{DistributionFilters, PauseState, SettingsScope, SettingsUpdate};
use rstest::rstest;
use serde_json::json;
use std::collections::HashMap;

async fn use_strategy(
    marketplace: &Marketplace,
    strategy: DistributionStrategy,
    filters: Option<DistributionFilters>,
) -> eyre::Result<()> {
    let update = SettingsUpdate {
        strategy: Some(strategy),
        filters,
        ..SettingsUpdate::default()
    };
    marketplace
        .settings
        .update(SettingsScope::Global, update)
        .await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submitted_lead_reaches_its_provider(marketplace: Marketplace) -> eyre::Result<()> {
    let plumber = marketplace.register("Rørleggeren AS", &["plumbing"]).await?;
    marketplace.register("Elektrikeren AS", &["electrical"]).await?;
    use_strategy(&marketplace, DistributionStrategy::CategoryMatch, None).await?;
    let lead = marketplace.submit("plumbing", json!({"postcode": "5003"})).await?;

    let summary = marketplace.processor().run(BatchRequest::default()).await;
    eyre::ensure!(summary.assigned == 1, "expected one assignment, got {summary:?}");

    let stored = marketplace.reload(&lead).await?;
    eyre::ensure!(stored.company_id() == Some(plumber.id()), "lead went elsewhere");
    eyre::ensure!(stored.raw_status() == "assigned", "status not advanced");

    let history = marketplace.intake.history(lead.id()).await?;
    let entry = history
        .first()
        .ok_or_else(|| eyre::eyre!("assignment was not audited"))?;
    eyre::ensure!(entry.assigned_to == plumber.id(), "history names another provider");
    eyre::ensure!(entry.method == AssignmentMethod::Auto, "expected auto assignment");
    eyre::ensure!(entry.metadata.strategy == "category_match", "strategy not recorded");

    let owner = Session::for_company(UserId::new(), plumber.id());
    let visible = marketplace
        .query_as(Some(owner))
        .fetch_leads_json(json!({"assigned": "assigned"}))
        .await?;
    eyre::ensure!(visible.len() == 1, "provider should see its lead");

    let refreshed = marketplace
        .directory
        .find_by_id(plumber.id())
        .await?
        .ok_or_else(|| eyre::eyre!("provider disappeared"))?;
    eyre::ensure!(
        refreshed.last_lead_assigned_at().is_some(),
        "fairness timestamp not recorded"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn round_robin_rotates_between_providers(marketplace: Marketplace) -> eyre::Result<()> {
    marketplace.register("Nord Bygg", &[]).await?;
    marketplace.register("Sør Bygg", &[]).await?;
    use_strategy(&marketplace, DistributionStrategy::RoundRobin, None).await?;
    let mut leads = Vec::new();
    for _ in 0..3 {
        leads.push(marketplace.submit("carpentry", json!({})).await?);
    }

    let assigned = marketplace.processor().process_leads(BatchRequest::default()).await;
    eyre::ensure!(assigned == 3, "expected every lead assigned, got {assigned}");

    let mut per_provider: HashMap<ProviderId, usize> = HashMap::new();
    for lead in &leads {
        let owner = marketplace
            .reload(lead)
            .await?
            .company_id()
            .ok_or_else(|| eyre::eyre!("lead {} left unassigned", lead.id()))?;
        *per_provider.entry(owner).or_default() += 1;
    }
    let mut counts: Vec<usize> = per_provider.into_values().collect();
    counts.sort_unstable();
    eyre::ensure!(counts == vec![1, 2], "uneven rotation: {counts:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn postal_code_filter_holds_back_distant_leads(
    marketplace: Marketplace,
) -> eyre::Result<()> {
    marketplace.register("Bergen Rør", &["plumbing"]).await?;
    let filters = DistributionFilters::new(Vec::new(), vec!["5003".to_owned()], Vec::new())?;
    use_strategy(&marketplace, DistributionStrategy::CategoryMatch, Some(filters)).await?;
    let local = marketplace.submit("plumbing", json!({"zipCode": "5003"})).await?;
    let distant = marketplace.submit("plumbing", json!({"zipCode": "0150"})).await?;

    let summary = marketplace.processor().run(BatchRequest::default()).await;

    eyre::ensure!(summary.filtered_out == 1, "expected one filtered lead: {summary:?}");
    eyre::ensure!(marketplace.reload(&local).await?.is_assigned(), "local lead not assigned");
    eyre::ensure!(
        !marketplace.reload(&distant).await?.is_assigned(),
        "distant lead was assigned"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn paused_marketplace_resumes_cleanly(marketplace: Marketplace) -> eyre::Result<()> {
    marketplace.register("Vestland Tak", &["roofing"]).await?;
    let lead = marketplace.submit("roofing", json!({})).await?;
    marketplace
        .settings
        .pause(SettingsScope::Global, PauseState::PausedGlobally)
        .await?;

    let paused = marketplace.processor().run(BatchRequest::default()).await;
    eyre::ensure!(paused.paused, "run should report the pause");
    eyre::ensure!(!marketplace.reload(&lead).await?.is_assigned(), "paused run assigned");
    let warning = marketplace
        .notifier
        .last()
        .ok_or_else(|| eyre::eyre!("pause was not announced"))?;
    eyre::ensure!(warning.severity == Severity::Warning, "pause should warn");

    marketplace.settings.resume(SettingsScope::Global).await?;
    let resumed = marketplace.processor().run(BatchRequest::default()).await;
    eyre::ensure!(resumed.assigned == 1, "resumed run should assign: {resumed:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_can_place_a_lead_by_hand(marketplace: Marketplace) -> eyre::Result<()> {
    marketplace.register("Oslo Maling", &["painting"]).await?;
    let chosen = marketplace.register("Trondheim Maling", &["painting"]).await?;
    let lead = marketplace.submit("painting", json!({})).await?;
    let admin = Session::new(UserId::new(), Role::Admin);

    let placed = marketplace
        .assignment()
        .assign_manually(lead.id(), chosen.id(), &admin)
        .await;

    eyre::ensure!(placed, "manual assignment refused");
    let stored = marketplace.reload(&lead).await?;
    eyre::ensure!(stored.company_id() == Some(chosen.id()), "lead went elsewhere");
    let history = marketplace.intake.history(lead.id()).await?;
    let entry = history
        .first()
        .ok_or_else(|| eyre::eyre!("manual assignment was not audited"))?;
    eyre::ensure!(entry.method == AssignmentMethod::Manual, "recorded as automatic");
    eyre::ensure!(entry.metadata.strategy == "manual", "manual label missing");

    let rerun = marketplace.processor().run(BatchRequest::default()).await;
    eyre::ensure!(rerun.candidates == 0, "placed lead offered again: {rerun:?}");
    Ok(())
}
