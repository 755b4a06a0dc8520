//! Given steps for lead distribution BDD scenarios.

use super::world::{DistributionWorld, draft, run_async};
use eyre::WrapErr;
use leadhub::distribution::domain::DistributionStrategy;
use leadhub::provider::{domain::Provider, ports::ProviderDirectory};
use leadhub::settings::domain::{DistributionFilters, PauseState, SettingsScope, SettingsUpdate};
use mockable::DefaultClock;
use rstest_bdd_macros::given;

#[given(r#"a provider "{name}" serving "{category}""#)]
fn a_provider_serving(
    world: &mut DistributionWorld,
    name: String,
    category: String,
) -> Result<(), eyre::Report> {
    let provider = Provider::new(name.as_str(), &DefaultClock)
        .wrap_err("build provider")?
        .with_categories([category]);
    run_async(world.directory.register(&provider)).wrap_err("register provider")?;
    world.providers.insert(name, provider);
    Ok(())
}

#[given(r#"the settings choose "{strategy}""#)]
fn settings_choose(world: &mut DistributionWorld, strategy: String) -> Result<(), eyre::Report> {
    let parsed: DistributionStrategy = strategy.parse().wrap_err("parse strategy name")?;
    let update = SettingsUpdate {
        strategy: Some(parsed),
        ..SettingsUpdate::default()
    };
    run_async(world.settings.update(SettingsScope::Global, update))
        .wrap_err("store strategy setting")?;
    Ok(())
}

#[given(r#"the settings only allow categories "{categories}""#)]
fn settings_allow_categories(
    world: &mut DistributionWorld,
    categories: String,
) -> Result<(), eyre::Report> {
    let allowed = categories.split(',').map(|entry| entry.trim().to_owned());
    let filters = DistributionFilters::new(allowed, Vec::new(), Vec::new())
        .wrap_err("build category filter")?;
    let update = SettingsUpdate {
        filters: Some(filters),
        ..SettingsUpdate::default()
    };
    run_async(world.settings.update(SettingsScope::Global, update))
        .wrap_err("store category filter")?;
    Ok(())
}

#[given(r#"a new lead in category "{category}""#)]
fn a_new_lead(world: &mut DistributionWorld, category: String) -> Result<(), eyre::Report> {
    let lead = run_async(world.intake.submit(draft(&category), None)).wrap_err("submit lead")?;
    world.submitted.insert(category, lead);
    Ok(())
}

#[given("distribution is paused globally")]
fn distribution_paused(world: &mut DistributionWorld) -> Result<(), eyre::Report> {
    run_async(
        world
            .settings
            .pause(SettingsScope::Global, PauseState::PausedGlobally),
    )
    .wrap_err("pause distribution")?;
    Ok(())
}
