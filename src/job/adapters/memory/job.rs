//! In-memory repository for job scheduling tests and tooling.

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::{Clock, DefaultClock};
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::job::{
    domain::{CallerIdentity, Driver, Job, JobId, JobPatch, NewJob},
    ports::{JobRepository, JobRepositoryError, JobRepositoryResult},
};

/// Thread-safe in-memory job repository.
///
/// Jobs are kept in insertion order, which is the "store order" the query
/// methods report.
pub struct InMemoryJobRepository<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<Vec<Job>>>,
    clock: Arc<C>,
}

impl InMemoryJobRepository {
    /// Creates an empty in-memory repository stamping records with the
    /// system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryJobRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for InMemoryJobRepository<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> fmt::Debug for InMemoryJobRepository<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stored = self.state.read().map_or(0, |jobs| jobs.len());
        f.debug_struct("InMemoryJobRepository")
            .field("stored", &stored)
            .finish_non_exhaustive()
    }
}

impl<C> InMemoryJobRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty in-memory repository stamping records with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::default(),
            clock,
        }
    }

    fn read(&self) -> JobRepositoryResult<RwLockReadGuard<'_, Vec<Job>>> {
        self.state.read().map_err(|err| {
            JobRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> JobRepositoryResult<RwLockWriteGuard<'_, Vec<Job>>> {
        self.state.write().map_err(|err| {
            JobRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn select(&self, predicate: impl Fn(&Job) -> bool) -> JobRepositoryResult<Vec<Job>> {
        let jobs = self.read()?;
        Ok(jobs.iter().filter(|job| predicate(job)).cloned().collect())
    }
}

#[async_trait]
impl<C> JobRepository for InMemoryJobRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn create(&self, _caller: &CallerIdentity, job: &NewJob) -> JobRepositoryResult<Job> {
        let stored = Job::create(job.clone(), &*self.clock);
        self.write()?.push(stored.clone());
        Ok(stored)
    }

    async fn create_many(
        &self,
        _caller: &CallerIdentity,
        jobs: &[NewJob],
    ) -> JobRepositoryResult<Vec<Job>> {
        let stored: Vec<Job> = jobs
            .iter()
            .map(|job| Job::create(job.clone(), &*self.clock))
            .collect();
        self.write()?.extend(stored.iter().cloned());
        Ok(stored)
    }

    async fn update(
        &self,
        _caller: &CallerIdentity,
        id: JobId,
        patch: &JobPatch,
    ) -> JobRepositoryResult<Job> {
        let mut jobs = self.write()?;
        let slot = jobs
            .iter_mut()
            .find(|job| job.id() == id)
            .ok_or(JobRepositoryError::NotFound(id))?;
        *slot = slot.patched(patch);
        Ok(slot.clone())
    }

    async fn delete(&self, _caller: &CallerIdentity, id: JobId) -> JobRepositoryResult<()> {
        let mut jobs = self.write()?;
        let position = jobs
            .iter()
            .position(|job| job.id() == id)
            .ok_or(JobRepositoryError::NotFound(id))?;
        jobs.remove(position);
        Ok(())
    }

    async fn find_by_id(
        &self,
        _caller: &CallerIdentity,
        id: JobId,
    ) -> JobRepositoryResult<Option<Job>> {
        let jobs = self.read()?;
        Ok(jobs.iter().find(|job| job.id() == id).cloned())
    }

    async fn query_by_driver(
        &self,
        _caller: &CallerIdentity,
        driver: Driver,
    ) -> JobRepositoryResult<Vec<Job>> {
        let mut matching = self.select(|job| job.driver() == driver)?;
        matching.sort_by_key(Job::date);
        Ok(matching)
    }

    async fn query_by_driver_and_date(
        &self,
        _caller: &CallerIdentity,
        driver: Driver,
        date: NaiveDate,
    ) -> JobRepositoryResult<Vec<Job>> {
        self.select(|job| job.driver() == driver && job.date() == date)
    }

    async fn query_by_dates(
        &self,
        _caller: &CallerIdentity,
        dates: &[NaiveDate],
    ) -> JobRepositoryResult<Vec<Job>> {
        self.select(|job| dates.contains(&job.date()))
    }
}
