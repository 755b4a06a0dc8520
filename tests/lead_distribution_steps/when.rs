//! When steps for lead distribution BDD scenarios.

use super::world::{DistributionWorld, run_async};
use leadhub::distribution::services::BatchRequest;
use rstest_bdd_macros::when;

#[when("the distribution batch runs")]
fn batch_runs(world: &mut DistributionWorld) {
    let summary = run_async(world.processor().run(BatchRequest::default()));
    world.runs.push(summary);
}
