//! Individual field rules.
//!
//! Every rule trims its input before checking it.

use super::JobValidationError;
use crate::job::domain::{Driver, JobDomainError, JobStatus, JobType, NewJob, Price};
use chrono::NaiveDate;

/// Date format accepted for job dates.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validates a driver label against the fixed pool.
///
/// # Errors
///
/// Returns [`JobValidationError::Driver`] for labels outside the pool.
pub fn validate_driver(value: &str) -> Result<Driver, JobValidationError> {
    Ok(Driver::try_from(value.trim())?)
}

/// Validates an ISO calendar date.
///
/// # Errors
///
/// Returns [`JobValidationError::Date`] when the value is not a valid
/// `YYYY-MM-DD` date.
pub fn validate_date(value: &str) -> Result<NaiveDate, JobValidationError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| JobValidationError::Date(trimmed.to_owned()))
}

/// Validates a job type.
///
/// # Errors
///
/// Returns [`JobValidationError::JobType`] when the value is blank or
/// longer than [`JobType::MAX_CHARS`].
pub fn validate_job_type(value: &str) -> Result<JobType, JobValidationError> {
    Ok(JobType::new(value)?)
}

/// Validates an optional postcode. A blank value means no postcode.
///
/// # Errors
///
/// Returns [`JobValidationError::Postcode`] when the value is longer than
/// [`NewJob::MAX_POSTCODE_CHARS`].
pub fn validate_postcode(value: &str) -> Result<Option<String>, JobValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let length = trimmed.chars().count();
    if length > NewJob::MAX_POSTCODE_CHARS {
        return Err(JobValidationError::Postcode(JobDomainError::PostcodeTooLong(length)));
    }
    Ok(Some(trimmed.to_owned()))
}

/// Validates an optional price. A blank value means no price.
///
/// # Errors
///
/// Returns [`JobValidationError::Price`] for negative or malformed amounts.
pub fn validate_price(value: &str) -> Result<Option<Price>, JobValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(Price::parse(trimmed)?))
}

/// Validates an optional status. A blank value means `pending`.
///
/// # Errors
///
/// Returns [`JobValidationError::Status`] for labels outside the status set.
pub fn validate_status(value: &str) -> Result<JobStatus, JobValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(JobStatus::default());
    }
    Ok(JobStatus::try_from(trimmed)?)
}
