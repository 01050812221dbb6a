//! Shared world state for bulk import BDD scenarios.

use std::sync::Arc;

use driver_jobs::job::{
    adapters::memory::InMemoryJobRepository,
    domain::CallerIdentity,
    services::{BulkImportOutcome, JobSchedulingService, JobServiceError},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestJobService = JobSchedulingService<InMemoryJobRepository, DefaultClock>;

/// Scenario world for bulk import behaviour tests.
pub struct BulkImportWorld {
    pub service: TestJobService,
    pub caller: CallerIdentity,
    pub lines: Vec<String>,
    pub last_outcome: Option<Result<BulkImportOutcome, JobServiceError>>,
}

impl BulkImportWorld {
    /// Creates a world with no import lines.
    #[must_use]
    pub fn new() -> Self {
        let service = JobSchedulingService::new(
            Arc::new(InMemoryJobRepository::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            caller: CallerIdentity::new("bulk-import"),
            lines: Vec::new(),
            last_outcome: None,
        }
    }

    /// Returns the outcome of the last import.
    ///
    /// # Errors
    ///
    /// Returns an error when no import has run or the import failed.
    pub fn outcome(&self) -> Result<&BulkImportOutcome, eyre::Report> {
        match self.last_outcome.as_ref() {
            Some(Ok(outcome)) => Ok(outcome),
            Some(Err(err)) => Err(eyre::eyre!("import failed: {err}")),
            None => Err(eyre::eyre!("missing import outcome in scenario world")),
        }
    }
}

impl Default for BulkImportWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BulkImportWorld {
    BulkImportWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
