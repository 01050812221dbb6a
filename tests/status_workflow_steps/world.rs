//! Shared world state for job status workflow BDD scenarios.

use std::sync::Arc;

use driver_jobs::job::{
    adapters::memory::InMemoryJobRepository,
    domain::{CallerIdentity, Job},
    services::{JobSchedulingService, JobServiceError},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestJobService = JobSchedulingService<InMemoryJobRepository, DefaultClock>;

/// Scenario world for status workflow behaviour tests.
pub struct StatusWorkflowWorld {
    pub service: TestJobService,
    pub caller: CallerIdentity,
    pub current_job: Option<Job>,
    pub last_status_result: Option<Result<Job, JobServiceError>>,
}

impl StatusWorkflowWorld {
    /// Creates a world with no job scheduled yet.
    #[must_use]
    pub fn new() -> Self {
        let service = JobSchedulingService::new(
            Arc::new(InMemoryJobRepository::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            caller: CallerIdentity::new("status-workflow"),
            current_job: None,
            last_status_result: None,
        }
    }

    /// Returns the job the scenario is working on.
    ///
    /// # Errors
    ///
    /// Returns an error when no job has been scheduled yet.
    pub fn job(&self) -> Result<&Job, eyre::Report> {
        self.current_job
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing scheduled job in scenario world"))
    }
}

impl Default for StatusWorkflowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> StatusWorkflowWorld {
    StatusWorkflowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
