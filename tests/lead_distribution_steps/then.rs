//! Then steps for lead distribution BDD scenarios.

use super::world::{DistributionWorld, run_async};
use leadhub::distribution::services::BatchSummary;
use rstest_bdd_macros::then;

fn last_run(world: &DistributionWorld) -> Result<BatchSummary, eyre::Report> {
    world
        .runs
        .last()
        .copied()
        .ok_or_else(|| eyre::eyre!("no distribution run in scenario world"))
}

#[then("the run assigns {count:usize} leads")]
fn run_assigns(world: &DistributionWorld, count: usize) -> Result<(), eyre::Report> {
    let summary = last_run(world)?;
    eyre::ensure!(
        summary.assigned == count,
        "expected {count} assignments, run reported {summary:?}"
    );
    Ok(())
}

#[then("the last run found {count:usize} candidates")]
fn last_run_found(world: &DistributionWorld, count: usize) -> Result<(), eyre::Report> {
    let summary = last_run(world)?;
    eyre::ensure!(
        summary.candidates == count,
        "expected {count} candidates, run reported {summary:?}"
    );
    Ok(())
}

#[then(r#"the "{category}" lead belongs to "{name}""#)]
fn lead_belongs_to(
    world: &DistributionWorld,
    category: String,
    name: String,
) -> Result<(), eyre::Report> {
    let provider = world
        .providers
        .get(&name)
        .ok_or_else(|| eyre::eyre!("no provider named '{name}' in scenario world"))?;
    let lead = world.reload(&category)?;
    eyre::ensure!(
        lead.company_id() == Some(provider.id()),
        "lead in '{category}' is owned by {:?}, expected {name}",
        lead.company_id()
    );
    eyre::ensure!(lead.raw_status() == "assigned", "lead status not advanced");
    Ok(())
}

#[then(r#"the "{category}" lead is unassigned"#)]
fn lead_is_unassigned(world: &DistributionWorld, category: String) -> Result<(), eyre::Report> {
    let lead = world.reload(&category)?;
    eyre::ensure!(!lead.is_assigned(), "lead in '{category}' was assigned");
    eyre::ensure!(lead.raw_status() == "new", "lead status changed to {}", lead.raw_status());
    Ok(())
}

#[then(r#"no provider is selected for "{strategy}""#)]
fn no_provider_selected(world: &DistributionWorld, strategy: String) -> Result<(), eyre::Report> {
    let selected = run_async(world.factory().dispatch_named(&strategy, None));
    eyre::ensure!(selected.is_none(), "expected no provider, got {selected:?}");
    Ok(())
}

#[then(r#"the run is reported as "{severity}""#)]
fn run_reported_as(world: &DistributionWorld, severity: String) -> Result<(), eyre::Report> {
    let notification = world
        .notifier
        .last()
        .ok_or_else(|| eyre::eyre!("the run published no notification"))?;
    eyre::ensure!(
        notification.severity.as_str() == severity,
        "expected a {severity} notification, got {notification:?}"
    );
    Ok(())
}
