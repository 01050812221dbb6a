//! `PostgreSQL` repository implementation for job storage.

use super::{
    models::{JobChangeset, JobRow, NewJobRow},
    schema::driver_jobs,
};
use crate::job::{
    domain::{
        CallerIdentity, Driver, Job, JobId, JobPatch, JobStatus, JobType, NewJob,
        PersistedJobData, Price,
    },
    ports::{JobRepository, JobRepositoryError, JobRepositoryResult},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::connection::SimpleConnection;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::Error as DieselError;
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use tracing::debug;

/// `PostgreSQL` connection pool type used by job adapters.
pub type JobPgPool = Pool<ConnectionManager<PgConnection>>;

/// SQL creating the job table and its indexes. Safe to run repeatedly.
const CREATE_SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_driver_jobs/up.sql");

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be opened.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<JobPgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_size).build(manager)
}

/// Creates the job table if it does not exist yet.
///
/// # Errors
///
/// Returns [`JobRepositoryError::Persistence`] when the schema cannot be
/// applied.
pub async fn apply_schema(pool: &JobPgPool) -> JobRepositoryResult<()> {
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(JobRepositoryError::persistence)?;
        connection
            .batch_execute(CREATE_SCHEMA_SQL)
            .map_err(JobRepositoryError::persistence)
    })
    .await
    .map_err(JobRepositoryError::persistence)?
}

/// `PostgreSQL`-backed job repository.
pub struct PostgresJobRepository<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    pool: JobPgPool,
    clock: Arc<C>,
}

impl PostgresJobRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub fn new(pool: JobPgPool) -> Self {
        Self::with_clock(pool, Arc::new(DefaultClock))
    }
}

impl<C> Clone for PostgresJobRepository<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> PostgresJobRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a new repository stamping new records with `clock`.
    #[must_use]
    pub const fn with_clock(pool: JobPgPool, clock: Arc<C>) -> Self {
        Self { pool, clock }
    }

    async fn run_blocking<F, T>(&self, f: F) -> JobRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> JobRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(JobRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(JobRepositoryError::persistence)?
    }
}

#[async_trait]
impl<C> JobRepository for PostgresJobRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn create(&self, caller: &CallerIdentity, job: &NewJob) -> JobRepositoryResult<Job> {
        let new_row = to_new_row(&Job::create(job.clone(), &*self.clock))?;
        debug!(%caller, job_id = %new_row.id, "inserting job");

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(driver_jobs::table)
                .values(&new_row)
                .returning(JobRow::as_returning())
                .get_result(connection)?;
            row_to_job(row)
        })
        .await
    }

    async fn create_many(
        &self,
        caller: &CallerIdentity,
        jobs: &[NewJob],
    ) -> JobRepositoryResult<Vec<Job>> {
        let new_rows = jobs
            .iter()
            .map(|job| to_new_row(&Job::create(job.clone(), &*self.clock)))
            .collect::<JobRepositoryResult<Vec<_>>>()?;
        debug!(%caller, count = new_rows.len(), "inserting job batch");

        self.run_blocking(move |connection| {
            connection.transaction::<_, JobRepositoryError, _>(|tx_conn| {
                let rows = diesel::insert_into(driver_jobs::table)
                    .values(&new_rows)
                    .returning(JobRow::as_returning())
                    .get_results(tx_conn)?;
                rows.into_iter().map(row_to_job).collect()
            })
        })
        .await
    }

    async fn update(
        &self,
        caller: &CallerIdentity,
        id: JobId,
        patch: &JobPatch,
    ) -> JobRepositoryResult<Job> {
        debug!(%caller, job_id = %id, "updating job");
        let owned_patch = patch.clone();

        self.run_blocking(move |connection| {
            connection.transaction::<_, JobRepositoryError, _>(|tx_conn| {
                let current = driver_jobs::table
                    .find(id.into_inner())
                    .select(JobRow::as_select())
                    .for_update()
                    .get_result::<JobRow>(tx_conn)
                    .optional()?
                    .ok_or(JobRepositoryError::NotFound(id))?;

                let updated = row_to_job(current)?.patched(&owned_patch);
                let row = diesel::update(driver_jobs::table.find(id.into_inner()))
                    .set(&to_changeset(&updated)?)
                    .returning(JobRow::as_returning())
                    .get_result(tx_conn)?;
                row_to_job(row)
            })
        })
        .await
    }

    async fn delete(&self, caller: &CallerIdentity, id: JobId) -> JobRepositoryResult<()> {
        debug!(%caller, job_id = %id, "deleting job");
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(driver_jobs::table.find(id.into_inner())).execute(connection)?;
            if deleted == 0 {
                return Err(JobRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        _caller: &CallerIdentity,
        id: JobId,
    ) -> JobRepositoryResult<Option<Job>> {
        self.run_blocking(move |connection| {
            let row = driver_jobs::table
                .find(id.into_inner())
                .select(JobRow::as_select())
                .first::<JobRow>(connection)
                .optional()?;
            row.map(row_to_job).transpose()
        })
        .await
    }

    async fn query_by_driver(
        &self,
        _caller: &CallerIdentity,
        driver: Driver,
    ) -> JobRepositoryResult<Vec<Job>> {
        self.run_blocking(move |connection| {
            let rows = jobs_of_driver(driver)
                .select(JobRow::as_select())
                .load::<JobRow>(connection)?;
            rows.into_iter().map(row_to_job).collect()
        })
        .await
    }

    async fn query_by_driver_and_date(
        &self,
        _caller: &CallerIdentity,
        driver: Driver,
        date: NaiveDate,
    ) -> JobRepositoryResult<Vec<Job>> {
        self.run_blocking(move |connection| {
            let rows = jobs_of_driver_on(driver, date)
                .select(JobRow::as_select())
                .load::<JobRow>(connection)?;
            rows.into_iter().map(row_to_job).collect()
        })
        .await
    }

    async fn query_by_dates(
        &self,
        _caller: &CallerIdentity,
        dates: &[NaiveDate],
    ) -> JobRepositoryResult<Vec<Job>> {
        let wanted = dates.to_vec();
        self.run_blocking(move |connection| {
            let rows = jobs_on_dates(wanted)
                .select(JobRow::as_select())
                .load::<JobRow>(connection)?;
            rows.into_iter().map(row_to_job).collect()
        })
        .await
    }
}

// Ties are broken by `seq`, which follows insertion order even when rows
// from one batch share a timestamp.

fn jobs_of_driver(driver: Driver) -> driver_jobs::BoxedQuery<'static, Pg> {
    driver_jobs::table
        .filter(driver_jobs::driver.eq(driver.label()))
        .order((driver_jobs::job_date.asc(), driver_jobs::seq.asc()))
        .into_boxed()
}

fn jobs_of_driver_on(driver: Driver, date: NaiveDate) -> driver_jobs::BoxedQuery<'static, Pg> {
    driver_jobs::table
        .filter(driver_jobs::driver.eq(driver.label()))
        .filter(driver_jobs::job_date.eq(date))
        .order(driver_jobs::seq.asc())
        .into_boxed()
}

fn jobs_on_dates(dates: Vec<NaiveDate>) -> driver_jobs::BoxedQuery<'static, Pg> {
    driver_jobs::table
        .filter(driver_jobs::job_date.eq_any(dates))
        .order((driver_jobs::job_date.asc(), driver_jobs::seq.asc()))
        .into_boxed()
}

impl From<DieselError> for JobRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

fn price_to_column(price: Option<Price>) -> JobRepositoryResult<Option<i64>> {
    price
        .map(|value| i64::try_from(value.minor_units()).map_err(JobRepositoryError::persistence))
        .transpose()
}

fn to_new_row(job: &Job) -> JobRepositoryResult<NewJobRow> {
    Ok(NewJobRow {
        id: job.id().into_inner(),
        driver: job.driver().label().to_owned(),
        job_date: job.date(),
        job_type: job.job_type().as_str().to_owned(),
        postcode: job.postcode().map(str::to_owned),
        price_pence: price_to_column(job.price())?,
        status: job.status().as_str().to_owned(),
        notes: job.notes().to_owned(),
        created_at: job.created_at(),
        updated_at: job.updated_at(),
    })
}

fn to_changeset(job: &Job) -> JobRepositoryResult<JobChangeset> {
    Ok(JobChangeset {
        driver: job.driver().label().to_owned(),
        job_date: job.date(),
        job_type: job.job_type().as_str().to_owned(),
        postcode: job.postcode().map(str::to_owned),
        price_pence: price_to_column(job.price())?,
        status: job.status().as_str().to_owned(),
        notes: job.notes().to_owned(),
        updated_at: job.updated_at(),
    })
}

fn row_to_job(row: JobRow) -> JobRepositoryResult<Job> {
    let JobRow {
        id,
        driver,
        job_date,
        job_type,
        postcode,
        price_pence,
        status,
        notes,
        created_at,
        updated_at,
        seq: _,
    } = row;

    let price = price_pence
        .map(|pence| {
            u64::try_from(pence)
                .map(Price::from_minor_units)
                .map_err(JobRepositoryError::persistence)
        })
        .transpose()?;

    let details = NewJob {
        driver: Driver::try_from(driver.as_str()).map_err(JobRepositoryError::persistence)?,
        date: job_date,
        job_type: JobType::new(job_type).map_err(JobRepositoryError::persistence)?,
        postcode,
        price,
        status: JobStatus::try_from(status.as_str()).map_err(JobRepositoryError::persistence)?,
        notes,
    };

    Ok(Job::from_persisted(PersistedJobData {
        id: JobId::from_uuid(id),
        details,
        created_at,
        updated_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn sample_row() -> JobRow {
        let timestamp = Utc
            .with_ymd_and_hms(2024, 6, 1, 8, 30, 0)
            .single()
            .expect("valid timestamp");
        JobRow {
            id: uuid::Uuid::new_v4(),
            driver: "Driver 10".to_owned(),
            job_date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
            job_type: "Clearance".to_owned(),
            postcode: Some("NW1".to_owned()),
            price_pence: Some(4550),
            status: "incomplete - issue".to_owned(),
            notes: "Gate locked".to_owned(),
            created_at: timestamp,
            updated_at: timestamp,
            seq: 7,
        }
    }

    #[rstest]
    fn row_to_job_maps_every_column() {
        let row = sample_row();
        let id = row.id;
        let job = row_to_job(row).expect("row should convert");

        assert_eq!(job.id().into_inner(), id);
        assert_eq!(job.driver(), Driver::D10);
        assert_eq!(job.job_type().as_str(), "Clearance");
        assert_eq!(job.postcode(), Some("NW1"));
        assert_eq!(job.price(), Some(Price::from_minor_units(4550)));
        assert_eq!(job.status(), JobStatus::IncompleteIssue);
        assert_eq!(job.notes(), "Gate locked");
    }

    #[rstest]
    fn new_row_round_trips_through_row_conversion() {
        let job = row_to_job(sample_row()).expect("row should convert");
        let new_row = to_new_row(&job).expect("job should convert");

        let restored = row_to_job(JobRow {
            id: new_row.id,
            driver: new_row.driver,
            job_date: new_row.job_date,
            job_type: new_row.job_type,
            postcode: new_row.postcode,
            price_pence: new_row.price_pence,
            status: new_row.status,
            notes: new_row.notes,
            created_at: new_row.created_at,
            updated_at: new_row.updated_at,
            seq: 1,
        })
        .expect("row should convert");

        assert_eq!(restored, job);
    }

    #[rstest]
    #[case::unknown_driver(JobRow { driver: "Driver 13".to_owned(), ..sample_row() })]
    #[case::unknown_status(JobRow { status: "done".to_owned(), ..sample_row() })]
    #[case::negative_price(JobRow { price_pence: Some(-1), ..sample_row() })]
    #[case::blank_type(JobRow { job_type: "  ".to_owned(), ..sample_row() })]
    fn row_to_job_rejects_corrupt_rows(#[case] row: JobRow) {
        assert!(matches!(
            row_to_job(row),
            Err(JobRepositoryError::Persistence(_))
        ));
    }

    #[rstest]
    #[case::driver(
        jobs_of_driver(Driver::D2),
        r#"ORDER BY "driver_jobs"."job_date" ASC, "driver_jobs"."seq" ASC"#
    )]
    #[case::driver_day(
        jobs_of_driver_on(Driver::D2, NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")),
        r#"ORDER BY "driver_jobs"."seq" ASC"#
    )]
    #[case::dates(
        jobs_on_dates(vec![NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")]),
        r#"ORDER BY "driver_jobs"."job_date" ASC, "driver_jobs"."seq" ASC"#
    )]
    fn queries_keep_insertion_order_within_a_day(
        #[case] query: driver_jobs::BoxedQuery<'static, Pg>,
        #[case] expected_order: &str,
    ) {
        let sql = diesel::debug_query::<Pg, _>(&query).to_string();

        assert!(sql.contains(expected_order), "unexpected ordering in {sql}");
    }

    #[rstest]
    fn changeset_clears_optional_columns() {
        let job = row_to_job(JobRow {
            postcode: None,
            price_pence: None,
            ..sample_row()
        })
        .expect("row should convert");
        let changeset = to_changeset(&job).expect("job should convert");

        assert!(changeset.postcode.is_none());
        assert!(changeset.price_pence.is_none());
        assert_eq!(changeset.status, "incomplete - issue");
    }
}
