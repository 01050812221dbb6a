//! Validation of raw job input.
//!
//! Each field rule is a pure function returning the typed value or a
//! [`JobValidationError`]. [`validate_job_input`] runs every rule and reports
//! all failures together so a form or an import report can show every
//! problem at once.

mod rules;

pub use rules::{
    validate_date, validate_driver, validate_job_type, validate_postcode, validate_price,
    validate_status,
};

use crate::job::domain::{InvalidStatus, JobDomainError, NewJob, ParseDriverError, ParsePriceError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// String-typed job fields as submitted by a form or an import line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawJobInput {
    /// Driver label.
    pub driver: String,
    /// Date in `YYYY-MM-DD` form.
    pub date: String,
    /// Job type.
    #[serde(rename = "type")]
    pub job_type: String,
    /// Postcode, blank when absent.
    pub postcode: String,
    /// Price, blank when absent.
    pub price: String,
    /// Status label, blank for the default.
    pub status: String,
    /// Notes, blank when absent.
    pub notes: String,
}

impl From<&NewJob> for RawJobInput {
    fn from(job: &NewJob) -> Self {
        Self {
            driver: job.driver.label().to_owned(),
            date: job.date.format(rules::DATE_FORMAT).to_string(),
            job_type: job.job_type.as_str().to_owned(),
            postcode: job.postcode.clone().unwrap_or_default(),
            price: job.price.map(|price| price.to_string()).unwrap_or_default(),
            status: job.status.as_str().to_owned(),
            notes: job.notes.clone(),
        }
    }
}

/// Job field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobField {
    /// The driver label.
    Driver,
    /// The scheduled date.
    Date,
    /// The job type.
    Type,
    /// The postcode.
    Postcode,
    /// The price.
    Price,
    /// The status label.
    Status,
}

impl JobField {
    /// Returns the field name as used in forms and import files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Driver => "driver",
            Self::Date => "date",
            Self::Type => "type",
            Self::Postcode => "postcode",
            Self::Price => "price",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for JobField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rejected job field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JobValidationError {
    /// Driver label is outside the pool.
    #[error(transparent)]
    Driver(#[from] ParseDriverError),

    /// Date is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    Date(String),

    /// Job type is empty or too long.
    #[error(transparent)]
    JobType(#[from] JobDomainError),

    /// Postcode is too long.
    #[error(transparent)]
    Postcode(JobDomainError),

    /// Price is negative or malformed.
    #[error(transparent)]
    Price(#[from] ParsePriceError),

    /// Status is outside the status set.
    #[error(transparent)]
    Status(#[from] InvalidStatus),
}

impl JobValidationError {
    /// Returns the field this error refers to.
    #[must_use]
    pub const fn field(&self) -> JobField {
        match self {
            Self::Driver(_) => JobField::Driver,
            Self::Date(_) => JobField::Date,
            Self::JobType(_) => JobField::Type,
            Self::Postcode(_) => JobField::Postcode,
            Self::Price(_) => JobField::Price,
            Self::Status(_) => JobField::Status,
        }
    }
}

/// Every field error found in one job, in check order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<JobValidationError>);

impl ValidationErrors {
    /// Returns the individual errors.
    #[must_use]
    pub fn errors(&self) -> &[JobValidationError] {
        &self.0
    }

    /// Returns the fields that failed, in check order.
    #[must_use]
    pub fn fields(&self) -> Vec<JobField> {
        self.0.iter().map(JobValidationError::field).collect()
    }

    /// Returns `true` when `field` has at least one error.
    #[must_use]
    pub fn has_field(&self, field: JobField) -> bool {
        self.0.iter().any(|error| error.field() == field)
    }

    /// Returns the number of errors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when there are no errors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the collection, returning the individual errors.
    #[must_use]
    pub fn into_inner(self) -> Vec<JobValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {error}", error.field())?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a JobValidationError;
    type IntoIter = std::slice::Iter<'a, JobValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Validates raw job input.
///
/// Checks, in order: driver, date, type, postcode, price, status. Notes are
/// trimmed; a blank postcode becomes `None`.
///
/// # Errors
///
/// Returns [`ValidationErrors`] holding one entry per rejected field.
///
/// # Examples
///
/// ```
/// use driver_jobs::job::domain::{Driver, JobStatus};
/// use driver_jobs::job::validation::{RawJobInput, validate_job_input};
///
/// let input = RawJobInput {
///     driver: "Driver 3".to_owned(),
///     date: "2024-06-01".to_owned(),
///     job_type: "Clearance".to_owned(),
///     ..RawJobInput::default()
/// };
/// let job = validate_job_input(&input).expect("valid job");
/// assert_eq!(job.driver, Driver::D3);
/// assert_eq!(job.status, JobStatus::Pending);
/// ```
pub fn validate_job_input(raw: &RawJobInput) -> Result<NewJob, ValidationErrors> {
    let mut errors = Vec::new();

    let driver = collect(&mut errors, validate_driver(&raw.driver));
    let date = collect(&mut errors, validate_date(&raw.date));
    let job_type = collect(&mut errors, validate_job_type(&raw.job_type));
    let postcode = collect(&mut errors, validate_postcode(&raw.postcode));
    let price = collect(&mut errors, validate_price(&raw.price));
    let status = collect(&mut errors, validate_status(&raw.status));

    match (driver, date, job_type, postcode, price, status) {
        (Some(driver), Some(date), Some(job_type), Some(postcode), Some(price), Some(status)) => {
            Ok(NewJob {
                driver,
                date,
                job_type,
                postcode,
                price,
                status,
                notes: raw.notes.trim().to_owned(),
            })
        }
        _ => Err(ValidationErrors(errors)),
    }
}

fn collect<T>(
    errors: &mut Vec<JobValidationError>,
    result: Result<T, JobValidationError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            errors.push(error);
            None
        }
    }
}
