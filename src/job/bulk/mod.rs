//! Bulk import of jobs from delimited text.
//!
//! Each non-blank line holds one job as seven comma-separated fields:
//!
//! ```text
//! driver, date, type, postcode, price, status, notes
//! ```
//!
//! There is no header and no quoting, so a value cannot itself contain a
//! comma. Parsing never stops at a bad line: every line is validated and the
//! caller receives all valid records alongside all line errors.

use crate::job::{
    domain::NewJob,
    validation::{RawJobInput, ValidationErrors, validate_job_input},
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Number of fields in an import line.
pub const FIELD_COUNT: usize = 7;

const FIELD_SEPARATOR: char = ',';

/// A valid job together with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportedRecord {
    /// 1-based line number in the input text.
    pub line_number: usize,
    /// The validated job.
    pub job: NewJob,
}

/// Why an import line was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LineErrorReason {
    /// The line has more fields than the import format allows.
    #[error("expected at most {FIELD_COUNT} comma-separated fields, found {found}")]
    TooManyFields {
        /// Number of fields found on the line.
        found: usize,
    },

    /// One or more fields failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

/// A rejected import line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("line {line_number}: {reason}")]
pub struct LineError {
    /// 1-based line number in the input text.
    pub line_number: usize,
    /// Why the line was rejected.
    pub reason: LineErrorReason,
}

/// Result of parsing a bulk import text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkParseReport {
    valid_records: Vec<ImportedRecord>,
    errors: Vec<LineError>,
}

impl BulkParseReport {
    /// Returns the valid records in input order.
    #[must_use]
    pub fn valid_records(&self) -> &[ImportedRecord] {
        &self.valid_records
    }

    /// Returns the rejected lines in input order.
    #[must_use]
    pub fn errors(&self) -> &[LineError] {
        &self.errors
    }

    /// Returns the valid jobs in input order.
    #[must_use]
    pub fn jobs(&self) -> Vec<NewJob> {
        self.valid_records
            .iter()
            .map(|record| record.job.clone())
            .collect()
    }

    /// Returns `true` when no line was rejected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of job lines seen, valid or not.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.valid_records.len() + self.errors.len()
    }

    /// Splits the report into its valid records and errors.
    #[must_use]
    pub fn into_parts(self) -> (Vec<ImportedRecord>, Vec<LineError>) {
        (self.valid_records, self.errors)
    }
}

impl fmt::Display for BulkParseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} valid, {} rejected",
            self.valid_records.len(),
            self.errors.len()
        )
    }
}

/// Parses bulk import text.
///
/// Blank lines are skipped but still counted for line numbers.
///
/// # Examples
///
/// ```
/// use driver_jobs::job::bulk::parse_bulk_text;
///
/// let report = parse_bulk_text(
///     "Driver 2,2024-06-01,Clearance,NW1,45.50,,Notes here\n\
///      BadDriver,2024-06-01,Type,,,pending,",
/// );
/// assert_eq!(report.valid_records().len(), 1);
/// assert_eq!(report.errors().len(), 1);
/// ```
#[must_use]
pub fn parse_bulk_text(text: &str) -> BulkParseReport {
    let mut report = BulkParseReport::default();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        match parse_bulk_line(line) {
            Ok(job) => report
                .valid_records
                .push(ImportedRecord { line_number, job }),
            Err(reason) => report.errors.push(LineError {
                line_number,
                reason,
            }),
        }
    }

    report
}

/// Parses and validates a single import line.
///
/// Missing trailing fields are treated as blank.
///
/// # Errors
///
/// Returns [`LineErrorReason`] when the line has too many fields or any field
/// fails validation.
pub fn parse_bulk_line(line: &str) -> Result<NewJob, LineErrorReason> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
    if fields.len() > FIELD_COUNT {
        return Err(LineErrorReason::TooManyFields {
            found: fields.len(),
        });
    }

    let field = |position: usize| fields.get(position).copied().unwrap_or_default().to_owned();
    let raw = RawJobInput {
        driver: field(0),
        date: field(1),
        job_type: field(2),
        postcode: field(3),
        price: field(4),
        status: field(5),
        notes: field(6),
    };

    Ok(validate_job_input(&raw)?)
}
