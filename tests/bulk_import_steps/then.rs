//! Then steps for bulk import BDD scenarios.

use super::world::{BulkImportWorld, run_async};
use chrono::NaiveDate;
use driver_jobs::job::{
    bulk::LineErrorReason,
    domain::{Driver, JobStatus},
    validation::JobField,
};
use rstest_bdd_macros::then;

#[then("{count:u64} jobs are created")]
fn jobs_are_created(world: &BulkImportWorld, count: u64) -> Result<(), eyre::Report> {
    let created = world.outcome()?.created().len();
    eyre::ensure!(
        u64::try_from(created)? == count,
        "expected {count} created jobs, found {created}"
    );
    Ok(())
}

#[then("line {line:u64} is rejected for its driver")]
fn line_rejected_for_driver(world: &BulkImportWorld, line: u64) -> Result<(), eyre::Report> {
    let line_number = usize::try_from(line)?;
    let error = world
        .outcome()?
        .line_errors()
        .iter()
        .find(|error| error.line_number == line_number)
        .ok_or_else(|| eyre::eyre!("line {line_number} was not rejected"))?;

    match &error.reason {
        LineErrorReason::Invalid(errors) if errors.has_field(JobField::Driver) => Ok(()),
        other => Err(eyre::eyre!("expected a driver error, got {other}")),
    }
}

#[then(r#"the job count for "{driver_label}" on "{day}" is {count:u64}"#)]
fn job_count_for_driver_day(
    world: &BulkImportWorld,
    driver_label: String,
    day: String,
    count: u64,
) -> Result<(), eyre::Report> {
    let driver = Driver::try_from(driver_label.as_str())?;
    let date = NaiveDate::parse_from_str(&day, "%Y-%m-%d")?;
    let jobs = run_async(world.service.driver_day(&world.caller, driver, date))?;

    eyre::ensure!(
        u64::try_from(jobs.len())? == count,
        "expected {count} jobs for {driver} on {date}, found {}",
        jobs.len()
    );
    Ok(())
}

#[then(r#"every created job is "{status}""#)]
fn every_created_job_has_status(
    world: &BulkImportWorld,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = JobStatus::try_from(status.as_str())?;
    let outcome = world.outcome()?;

    eyre::ensure!(
        outcome.created().iter().all(|job| job.status() == expected),
        "not every created job is {expected}"
    );
    Ok(())
}
