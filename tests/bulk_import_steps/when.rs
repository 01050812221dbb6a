//! When steps for bulk import BDD scenarios.

use super::world::{BulkImportWorld, run_async};
use driver_jobs::job::services::BulkSubmitPolicy;
use rstest_bdd_macros::when;

fn import(world: &mut BulkImportWorld, policy: BulkSubmitPolicy) {
    let text = world.lines.join("\n");
    let outcome = run_async(world.service.import_bulk(&world.caller, &text, policy));
    world.last_outcome = Some(outcome);
}

#[when("the lines are imported keeping valid lines")]
fn import_valid_only(world: &mut BulkImportWorld) {
    import(world, BulkSubmitPolicy::ValidOnly);
}

#[when("the lines are imported rejecting on errors")]
fn import_rejecting_on_errors(world: &mut BulkImportWorld) {
    import(world, BulkSubmitPolicy::RejectOnErrors);
}
