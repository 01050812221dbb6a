//! Then steps for job status workflow BDD scenarios.

use super::world::{StatusWorkflowWorld, run_async};
use driver_jobs::job::{domain::JobStatus, services::JobServiceError};
use rstest_bdd_macros::then;

fn expected_status(label: &str) -> Result<JobStatus, eyre::Report> {
    JobStatus::try_from(label)
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))
}

#[then(r#"the job status is "{status}""#)]
fn job_status_is(world: &StatusWorkflowWorld, status: String) -> Result<(), eyre::Report> {
    let expected = expected_status(&status)?;
    let job = world.job()?;

    if job.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            job.status()
        ));
    }
    Ok(())
}

#[then(r#"the stored job status is "{status}""#)]
fn stored_job_status_is(world: &StatusWorkflowWorld, status: String) -> Result<(), eyre::Report> {
    let expected = expected_status(&status)?;
    let id = world.job()?.id();
    let stored = run_async(world.service.find_job(&world.caller, id))?
        .ok_or_else(|| eyre::eyre!("job {id} is missing from the store"))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected stored status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then("the status change fails with an invalid status error")]
fn status_change_fails(world: &StatusWorkflowWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_status_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing status change result"))?;

    if !matches!(result, Err(JobServiceError::InvalidStatus(_))) {
        return Err(eyre::eyre!("expected InvalidStatus error, got {result:?}"));
    }
    Ok(())
}
