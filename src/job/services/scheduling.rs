//! Service layer for scheduling jobs, tracking their status and building the
//! driver and admin views.

use crate::job::{
    bulk::{LineError, parse_bulk_text},
    calendar::{MonthGrid, ThreeDayWindow, YearMonth, month_grid, three_day_window, today_local},
    domain::{Actor, CallerIdentity, Driver, InvalidStatus, Job, JobId, JobPatch},
    ports::{JobRepository, JobRepositoryError},
    query::{filter_by_date_window, filter_by_driver, filter_by_driver_and_date},
    validation::{RawJobInput, ValidationErrors, validate_job_input},
};
use chrono::NaiveDate;
use mockable::Clock;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for job scheduling operations.
#[derive(Debug, Error)]
pub enum JobServiceError {
    /// One or more input fields failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// The requested status is not part of the workflow.
    #[error(transparent)]
    InvalidStatus(#[from] InvalidStatus),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] JobRepositoryError),
    /// The store rejected a bulk batch; nothing from it was stored.
    #[error("bulk import of {} lines rejected by the store: {source}", .submitted_lines.len())]
    BulkRejected {
        /// Store error for the batch.
        source: JobRepositoryError,
        /// Lines that failed to parse, in input order.
        line_errors: Vec<LineError>,
        /// Line numbers that were sent in the rejected batch.
        submitted_lines: Vec<usize>,
    },
}

/// Result type for job scheduling service operations.
pub type JobServiceResult<T> = Result<T, JobServiceError>;

/// How a bulk import treats lines that failed to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BulkSubmitPolicy {
    /// Submit every valid line and report the rest.
    #[default]
    ValidOnly,
    /// Submit nothing unless every line is valid.
    RejectOnErrors,
}

/// Result of a bulk import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkImportOutcome {
    created: Vec<Job>,
    line_errors: Vec<LineError>,
    submitted_lines: Vec<usize>,
}

impl BulkImportOutcome {
    /// Returns the stored jobs in input order.
    #[must_use]
    pub fn created(&self) -> &[Job] {
        &self.created
    }

    /// Returns the rejected lines in input order.
    #[must_use]
    pub fn line_errors(&self) -> &[LineError] {
        &self.line_errors
    }

    /// Returns the line numbers that were sent to the repository.
    #[must_use]
    pub fn submitted_lines(&self) -> &[usize] {
        &self.submitted_lines
    }

    /// Returns `true` when every line was stored.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.line_errors.is_empty()
    }
}

/// Jobs for the yesterday/today/tomorrow admin view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminBoard {
    window: ThreeDayWindow,
    jobs: Vec<Job>,
}

impl AdminBoard {
    /// Returns the dates shown.
    #[must_use]
    pub const fn window(&self) -> ThreeDayWindow {
        self.window
    }

    /// Returns every job in the window, ordered by date then driver number.
    #[must_use]
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Returns the jobs on one day of the window, ordered by driver number.
    pub fn for_day(&self, date: NaiveDate) -> impl Iterator<Item = &Job> {
        self.jobs.iter().filter(move |job| job.date() == date)
    }
}

/// Month calendar and selected-day jobs for one driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverMonthView {
    driver: Driver,
    grid: MonthGrid,
    selected: NaiveDate,
    selected_jobs: Vec<Job>,
}

impl DriverMonthView {
    /// Returns the driver shown.
    #[must_use]
    pub const fn driver(&self) -> Driver {
        self.driver
    }

    /// Returns the month grid.
    #[must_use]
    pub const fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    /// Returns the selected day.
    #[must_use]
    pub const fn selected(&self) -> NaiveDate {
        self.selected
    }

    /// Returns the driver's jobs on the selected day.
    #[must_use]
    pub fn selected_jobs(&self) -> &[Job] {
        &self.selected_jobs
    }
}

/// Job scheduling orchestration service.
#[derive(Clone)]
pub struct JobSchedulingService<R, C>
where
    R: JobRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> JobSchedulingService<R, C>
where
    R: JobRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new job scheduling service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the caller's local calendar day.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        today_local(&*self.clock)
    }

    /// Validates and stores a single job.
    ///
    /// # Errors
    ///
    /// Returns [`JobServiceError::Validation`] with every failing field when
    /// the input is invalid, or [`JobServiceError::Repository`] when the
    /// store rejects the write.
    pub async fn create_job(
        &self,
        caller: &CallerIdentity,
        raw: &RawJobInput,
    ) -> JobServiceResult<Job> {
        let job = validate_job_input(raw).inspect_err(|errors| {
            warn!(%caller, %errors, "job input rejected");
        })?;
        let created = self.repository.create(caller, &job).await?;
        info!(%caller, job_id = %created.id(), driver = %created.driver(), "job created");
        Ok(created)
    }

    /// Replaces every editable field of a stored job.
    ///
    /// # Errors
    ///
    /// Returns [`JobServiceError::Validation`] when the input is invalid, or
    /// [`JobServiceError::Repository`] when the job does not exist or the
    /// store rejects the write.
    pub async fn update_job(
        &self,
        caller: &CallerIdentity,
        id: JobId,
        raw: &RawJobInput,
    ) -> JobServiceResult<Job> {
        let details = validate_job_input(raw).inspect_err(|errors| {
            warn!(%caller, job_id = %id, %errors, "job edit rejected");
        })?;
        let patch = JobPatch::replace(details, &*self.clock);
        let updated = self.repository.update(caller, id, &patch).await?;
        info!(%caller, job_id = %id, "job updated");
        Ok(updated)
    }

    /// Moves a job to a new status and returns the stored job.
    ///
    /// `job` is only read; on any failure neither it nor the stored job
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns [`JobServiceError::InvalidStatus`] when `new_status` is not a
    /// workflow status, or [`JobServiceError::Repository`] when the store
    /// rejects the write.
    pub async fn set_status(
        &self,
        caller: &CallerIdentity,
        job: &Job,
        new_status: &str,
        actor: Actor,
    ) -> JobServiceResult<Job> {
        let changed = job
            .with_status(new_status, actor, &*self.clock)
            .inspect_err(|err| {
                warn!(%caller, job_id = %job.id(), %actor, %err, "status change rejected");
            })?;
        let patch = JobPatch::status(changed.status(), &*self.clock);
        let stored = self.repository.update(caller, job.id(), &patch).await?;
        info!(
            %caller,
            job_id = %stored.id(),
            status = %stored.status(),
            %actor,
            "job status changed"
        );
        Ok(stored)
    }

    /// Permanently removes a job.
    ///
    /// # Errors
    ///
    /// Returns [`JobServiceError::Repository`] when the job does not exist or
    /// the store rejects the delete.
    pub async fn delete_job(&self, caller: &CallerIdentity, id: JobId) -> JobServiceResult<()> {
        self.repository.delete(caller, id).await?;
        info!(%caller, job_id = %id, "job deleted");
        Ok(())
    }

    /// Finds a job by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`JobServiceError::Repository`] when the lookup fails.
    pub async fn find_job(
        &self,
        caller: &CallerIdentity,
        id: JobId,
    ) -> JobServiceResult<Option<Job>> {
        Ok(self.repository.find_by_id(caller, id).await?)
    }

    /// Parses bulk import text and stores its valid lines according to
    /// `policy`.
    ///
    /// Line errors never abort the parse. The valid lines are stored in one
    /// batch, so either all of them are stored or none are.
    ///
    /// # Errors
    ///
    /// Returns [`JobServiceError::BulkRejected`] when the store rejects the
    /// batch. It carries the store error together with the line errors and
    /// the submitted line numbers.
    pub async fn import_bulk(
        &self,
        caller: &CallerIdentity,
        text: &str,
        policy: BulkSubmitPolicy,
    ) -> JobServiceResult<BulkImportOutcome> {
        let report = parse_bulk_text(text);
        debug!(%caller, %report, "bulk text parsed");
        let (records, line_errors) = report.into_parts();

        for line_error in &line_errors {
            warn!(%caller, %line_error, "bulk line rejected");
        }

        let submit = match policy {
            BulkSubmitPolicy::ValidOnly => !records.is_empty(),
            BulkSubmitPolicy::RejectOnErrors => !records.is_empty() && line_errors.is_empty(),
        };
        if !submit {
            return Ok(BulkImportOutcome {
                created: Vec::new(),
                line_errors,
                submitted_lines: Vec::new(),
            });
        }

        let submitted_lines: Vec<usize> = records.iter().map(|record| record.line_number).collect();
        let jobs: Vec<_> = records.into_iter().map(|record| record.job).collect();
        let created = match self.repository.create_many(caller, &jobs).await {
            Ok(created) => created,
            Err(source) => {
                warn!(%caller, %source, "bulk batch rejected by the store");
                return Err(JobServiceError::BulkRejected {
                    source,
                    line_errors,
                    submitted_lines,
                });
            }
        };
        info!(%caller, count = created.len(), "bulk jobs created");

        Ok(BulkImportOutcome {
            created,
            line_errors,
            submitted_lines,
        })
    }

    /// Returns every job of a driver, ordered by date ascending.
    ///
    /// # Errors
    ///
    /// Returns [`JobServiceError::Repository`] when the query fails.
    pub async fn driver_jobs(
        &self,
        caller: &CallerIdentity,
        driver: Driver,
    ) -> JobServiceResult<Vec<Job>> {
        let jobs = self.repository.query_by_driver(caller, driver).await?;
        debug!(%caller, %driver, count = jobs.len(), "driver jobs loaded");
        Ok(filter_by_driver(&jobs, driver))
    }

    /// Returns the jobs of a driver on one day.
    ///
    /// # Errors
    ///
    /// Returns [`JobServiceError::Repository`] when the query fails.
    pub async fn driver_day(
        &self,
        caller: &CallerIdentity,
        driver: Driver,
        date: NaiveDate,
    ) -> JobServiceResult<Vec<Job>> {
        let jobs = self
            .repository
            .query_by_driver_and_date(caller, driver, date)
            .await?;
        Ok(filter_by_driver_and_date(&jobs, driver, date))
    }

    /// Builds the three-day admin board around `reference`, or around the
    /// caller's local today when no reference is given.
    ///
    /// # Errors
    ///
    /// Returns [`JobServiceError::Repository`] when the query fails.
    pub async fn admin_board(
        &self,
        caller: &CallerIdentity,
        reference: Option<NaiveDate>,
    ) -> JobServiceResult<AdminBoard> {
        let window = three_day_window(reference.unwrap_or_else(|| self.today()));
        let dates = window.dates();
        let fetched = self.repository.query_by_dates(caller, &dates).await?;
        let date_set: HashSet<NaiveDate> = dates.into_iter().collect();
        let jobs = filter_by_date_window(&fetched, &date_set);
        debug!(%caller, today = %window.today, count = jobs.len(), "admin board loaded");
        Ok(AdminBoard { window, jobs })
    }

    /// Builds a driver's month calendar with the jobs of the selected day.
    ///
    /// The selected day defaults to the caller's local today.
    ///
    /// # Errors
    ///
    /// Returns [`JobServiceError::Repository`] when the query fails.
    pub async fn driver_month(
        &self,
        caller: &CallerIdentity,
        driver: Driver,
        year_month: YearMonth,
        selected: Option<NaiveDate>,
    ) -> JobServiceResult<DriverMonthView> {
        let today = self.today();
        let selected_day = selected.unwrap_or(today);
        let grid = month_grid(year_month, today, selected_day);
        let selected_jobs = self.driver_day(caller, driver, selected_day).await?;
        Ok(DriverMonthView {
            driver,
            grid,
            selected: selected_day,
            selected_jobs,
        })
    }
}
