//! Error types for job domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain job values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JobDomainError {
    /// The job type is empty after trimming.
    #[error("job type must not be empty")]
    EmptyJobType,

    /// The job type is longer than the store allows.
    #[error("job type is {0} characters long, at most 255 are allowed")]
    JobTypeTooLong(usize),

    /// The postcode is longer than the store allows.
    #[error("postcode is {0} characters long, at most 32 are allowed")]
    PostcodeTooLong(usize),
}

/// Error returned for a label outside the driver pool.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown driver '{0}', expected one of 'Driver 1' to 'Driver 12'")]
pub struct ParseDriverError(pub String);

/// Error returned for a status outside the job status set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid status '{0}', expected 'pending', 'complete' or 'incomplete - issue'")]
pub struct InvalidStatus(pub String);

/// Errors returned while parsing a price.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParsePriceError {
    /// The amount is below zero.
    #[error("price '{0}' must not be negative")]
    Negative(String),

    /// The value is not a decimal number with at most two decimal places.
    #[error("price '{0}' is not a valid amount with at most two decimal places")]
    Malformed(String),
}
