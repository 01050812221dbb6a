//! Given steps for job status workflow BDD scenarios.

use super::world::{StatusWorkflowWorld, run_async};
use driver_jobs::job::{
    domain::{Actor, Driver},
    validation::RawJobInput,
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a pending "{job_type}" job for "{driver}" on "{date}""#)]
fn pending_job(
    world: &mut StatusWorkflowWorld,
    job_type: String,
    driver: String,
    date: String,
) -> Result<(), eyre::Report> {
    let input = RawJobInput {
        driver,
        date,
        job_type,
        ..RawJobInput::default()
    };
    let created = run_async(world.service.create_job(&world.caller, &input))
        .wrap_err("schedule job for status scenario")?;
    world.current_job = Some(created);
    Ok(())
}

#[given(r#""{driver_label}" has set the job status to "{status}""#)]
fn driver_has_set_status(
    world: &mut StatusWorkflowWorld,
    driver_label: String,
    status: String,
) -> Result<(), eyre::Report> {
    let driver = Driver::try_from(driver_label.as_str())?;
    let job = world.job()?.clone();
    let updated = run_async(world.service.set_status(
        &world.caller,
        &job,
        &status,
        Actor::Driver(driver),
    ))
    .wrap_err("set status in scenario setup")?;
    world.current_job = Some(updated);
    Ok(())
}
