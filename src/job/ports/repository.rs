//! Repository port for job persistence and lookup.

use crate::job::domain::{CallerIdentity, Driver, Job, JobId, JobPatch, NewJob};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Result type for job repository operations.
pub type JobRepositoryResult<T> = Result<T, JobRepositoryError>;

/// Job persistence contract.
///
/// Every operation receives the caller's identity so that stores can apply
/// their own authorization. Implementations return the stored record from
/// writes so callers can merge it into local state without re-querying.
/// Stores never default fields: a [`NewJob`] always carries its status.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Stores a new job and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`JobRepositoryError::Persistence`] when the store rejects
    /// the write.
    async fn create(&self, caller: &CallerIdentity, job: &NewJob) -> JobRepositoryResult<Job>;

    /// Stores a batch of new jobs, all or nothing, returning the stored
    /// records in input order.
    ///
    /// # Errors
    ///
    /// Returns [`JobRepositoryError::Persistence`] when the store rejects
    /// any record; no record is stored in that case.
    async fn create_many(
        &self,
        caller: &CallerIdentity,
        jobs: &[NewJob],
    ) -> JobRepositoryResult<Vec<Job>>;

    /// Applies a patch to an existing job and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`JobRepositoryError::NotFound`] when the job does not exist.
    async fn update(
        &self,
        caller: &CallerIdentity,
        id: JobId,
        patch: &JobPatch,
    ) -> JobRepositoryResult<Job>;

    /// Permanently removes a job.
    ///
    /// # Errors
    ///
    /// Returns [`JobRepositoryError::NotFound`] when the job does not exist.
    async fn delete(&self, caller: &CallerIdentity, id: JobId) -> JobRepositoryResult<()>;

    /// Finds a job by identifier.
    ///
    /// Returns `None` when the job does not exist.
    async fn find_by_id(&self, caller: &CallerIdentity, id: JobId)
    -> JobRepositoryResult<Option<Job>>;

    /// Returns every job of a driver, ordered by date ascending.
    async fn query_by_driver(
        &self,
        caller: &CallerIdentity,
        driver: Driver,
    ) -> JobRepositoryResult<Vec<Job>>;

    /// Returns the jobs of a driver on one date, in store order.
    async fn query_by_driver_and_date(
        &self,
        caller: &CallerIdentity,
        driver: Driver,
        date: NaiveDate,
    ) -> JobRepositoryResult<Vec<Job>>;

    /// Returns the jobs dated on any of `dates`.
    async fn query_by_dates(
        &self,
        caller: &CallerIdentity,
        dates: &[NaiveDate],
    ) -> JobRepositoryResult<Vec<Job>>;
}

/// Errors returned by job repository implementations.
#[derive(Debug, Clone, Error)]
pub enum JobRepositoryError {
    /// The job was not found.
    #[error("job not found: {0}")]
    NotFound(JobId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl JobRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
