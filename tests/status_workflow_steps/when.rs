//! When steps for job status workflow BDD scenarios.

use super::world::{StatusWorkflowWorld, run_async};
use driver_jobs::job::domain::{Actor, Driver};
use rstest_bdd_macros::when;

fn change_status(
    world: &mut StatusWorkflowWorld,
    status: &str,
    actor: Actor,
) -> Result<(), eyre::Report> {
    let job = world.job()?.clone();
    let result = run_async(world.service.set_status(&world.caller, &job, status, actor));
    if let Ok(ref updated) = result {
        world.current_job = Some(updated.clone());
    }
    world.last_status_result = Some(result);
    Ok(())
}

#[when(r#""{driver_label}" sets the job status to "{status}""#)]
fn driver_sets_status(
    world: &mut StatusWorkflowWorld,
    driver_label: String,
    status: String,
) -> Result<(), eyre::Report> {
    let driver = Driver::try_from(driver_label.as_str())?;
    change_status(world, &status, Actor::Driver(driver))
}

#[when(r#"staff set the job status to "{status}""#)]
fn staff_set_status(world: &mut StatusWorkflowWorld, status: String) -> Result<(), eyre::Report> {
    change_status(world, &status, Actor::Staff)
}
