//! Shared test helpers for in-memory job scheduling integration tests.

use chrono::NaiveDate;
use driver_jobs::job::{
    adapters::memory::InMemoryJobRepository,
    domain::{CallerIdentity, Job},
    services::JobSchedulingService,
    validation::RawJobInput,
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Service type exercised by the integration tests.
pub type TestService = JobSchedulingService<InMemoryJobRepository, DefaultClock>;

/// Provides a service over a fresh in-memory repository.
#[fixture]
pub fn service() -> TestService {
    JobSchedulingService::new(
        Arc::new(InMemoryJobRepository::new()),
        Arc::new(DefaultClock),
    )
}

/// Provides the caller identity used for every repository call.
#[fixture]
pub fn caller() -> CallerIdentity {
    CallerIdentity::new("dispatch-office")
}

/// Builds a calendar date.
///
/// # Errors
///
/// Returns an error when the components do not form a valid date.
pub fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, eyre::Report> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| eyre::eyre!("invalid date {year}-{month}-{day}"))
}

/// Builds raw input with the required fields set and the rest blank.
pub fn raw_job(driver: &str, date: &str, job_type: &str) -> RawJobInput {
    RawJobInput {
        driver: driver.to_owned(),
        date: date.to_owned(),
        job_type: job_type.to_owned(),
        ..RawJobInput::default()
    }
}

/// Returns the job types of `jobs` in order.
pub fn job_types(jobs: &[Job]) -> Vec<String> {
    jobs.iter()
        .map(|job| job.job_type().as_str().to_owned())
        .collect()
}
