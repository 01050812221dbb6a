//! Diesel row models for job persistence.

use super::schema::driver_jobs;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for job records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = driver_jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct JobRow {
    /// Job identifier.
    pub id: uuid::Uuid,
    /// Driver label.
    pub driver: String,
    /// Scheduled calendar day.
    pub job_date: NaiveDate,
    /// Kind of work.
    pub job_type: String,
    /// Optional site postcode.
    pub postcode: Option<String>,
    /// Optional price in pence.
    pub price_pence: Option<i64>,
    /// Completion status label.
    pub status: String,
    /// Free-form notes.
    pub notes: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Insertion sequence assigned by the database.
    pub seq: i64,
}

/// Insert model for job records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = driver_jobs)]
pub struct NewJobRow {
    /// Job identifier.
    pub id: uuid::Uuid,
    /// Driver label.
    pub driver: String,
    /// Scheduled calendar day.
    pub job_date: NaiveDate,
    /// Kind of work.
    pub job_type: String,
    /// Optional site postcode.
    pub postcode: Option<String>,
    /// Optional price in pence.
    pub price_pence: Option<i64>,
    /// Completion status label.
    pub status: String,
    /// Free-form notes.
    pub notes: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset writing every mutable column of a job.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = driver_jobs)]
#[diesel(treat_none_as_null = true)]
pub struct JobChangeset {
    /// Driver label.
    pub driver: String,
    /// Scheduled calendar day.
    pub job_date: NaiveDate,
    /// Kind of work.
    pub job_type: String,
    /// Optional site postcode.
    pub postcode: Option<String>,
    /// Optional price in pence.
    pub price_pence: Option<i64>,
    /// Completion status label.
    pub status: String,
    /// Free-form notes.
    pub notes: String,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
