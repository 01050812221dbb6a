//! Job aggregate root and related change types.

use super::{Actor, Driver, InvalidStatus, JobId, JobStatus, JobType, Price};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated job details ready to be stored.
///
/// Every field type enforces its own invariant, so any value of this type
/// describes a valid job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJob {
    /// Assigned driver.
    pub driver: Driver,
    /// Calendar day the job is scheduled for.
    pub date: NaiveDate,
    /// Kind of work.
    pub job_type: JobType,
    /// Site postcode, if known.
    pub postcode: Option<String>,
    /// Agreed price, if set.
    pub price: Option<Price>,
    /// Initial status. Callers fill this in explicitly; storage never
    /// defaults it.
    pub status: JobStatus,
    /// Free-form notes, empty when absent.
    pub notes: String,
}

impl NewJob {
    /// Longest postcode the store accepts, in characters.
    pub const MAX_POSTCODE_CHARS: usize = 32;

    /// Creates a pending job with no postcode, price or notes.
    #[must_use]
    pub const fn new(driver: Driver, date: NaiveDate, job_type: JobType) -> Self {
        Self {
            driver,
            date,
            job_type,
            postcode: None,
            price: None,
            status: JobStatus::Pending,
            notes: String::new(),
        }
    }

    /// Sets the postcode.
    #[must_use]
    pub fn with_postcode(mut self, postcode: impl Into<String>) -> Self {
        self.postcode = Some(postcode.into());
        self
    }

    /// Sets the price.
    #[must_use]
    pub const fn with_price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Field changes applied to a stored job.
///
/// `None` leaves a field untouched. For the optional fields the inner
/// `Option` is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPatch {
    /// New driver.
    pub driver: Option<Driver>,
    /// New date.
    pub date: Option<NaiveDate>,
    /// New job type.
    pub job_type: Option<JobType>,
    /// New postcode.
    pub postcode: Option<Option<String>>,
    /// New price.
    pub price: Option<Option<Price>>,
    /// New status.
    pub status: Option<JobStatus>,
    /// New notes.
    pub notes: Option<String>,
    /// Time of the change.
    pub updated_at: DateTime<Utc>,
}

impl JobPatch {
    /// A patch that changes nothing but the update timestamp.
    #[must_use]
    pub fn touch(clock: &impl Clock) -> Self {
        Self {
            driver: None,
            date: None,
            job_type: None,
            postcode: None,
            price: None,
            status: None,
            notes: None,
            updated_at: clock.utc(),
        }
    }

    /// A status-only patch.
    #[must_use]
    pub fn status(status: JobStatus, clock: &impl Clock) -> Self {
        Self {
            status: Some(status),
            ..Self::touch(clock)
        }
    }

    /// A patch replacing every editable field.
    #[must_use]
    pub fn replace(job: NewJob, clock: &impl Clock) -> Self {
        Self {
            driver: Some(job.driver),
            date: Some(job.date),
            job_type: Some(job.job_type),
            postcode: Some(job.postcode),
            price: Some(job.price),
            status: Some(job.status),
            notes: Some(job.notes),
            updated_at: clock.utc(),
        }
    }
}

/// Job aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    id: JobId,
    driver: Driver,
    date: NaiveDate,
    job_type: JobType,
    postcode: Option<String>,
    price: Option<Price>,
    status: JobStatus,
    notes: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedJobData {
    /// Persisted job identifier.
    pub id: JobId,
    /// Persisted job details.
    pub details: NewJob,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Creates a job record with a fresh identifier.
    #[must_use]
    pub fn create(details: NewJob, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self::from_persisted(PersistedJobData {
            id: JobId::new(),
            details,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a job from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedJobData) -> Self {
        let NewJob {
            driver,
            date,
            job_type,
            postcode,
            price,
            status,
            notes,
        } = data.details;

        Self {
            id: data.id,
            driver,
            date,
            job_type,
            postcode,
            price,
            status,
            notes,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the job identifier.
    #[must_use]
    pub const fn id(&self) -> JobId {
        self.id
    }

    /// Returns the assigned driver.
    #[must_use]
    pub const fn driver(&self) -> Driver {
        self.driver
    }

    /// Returns the scheduled date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the job type.
    #[must_use]
    pub const fn job_type(&self) -> &JobType {
        &self.job_type
    }

    /// Returns the postcode, if any.
    #[must_use]
    pub fn postcode(&self) -> Option<&str> {
        self.postcode.as_deref()
    }

    /// Returns the price, if any.
    #[must_use]
    pub const fn price(&self) -> Option<Price> {
        self.price
    }

    /// Returns the completion status.
    #[must_use]
    pub const fn status(&self) -> JobStatus {
        self.status
    }

    /// Returns the notes.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the editable details of this job.
    #[must_use]
    pub fn details(&self) -> NewJob {
        NewJob {
            driver: self.driver,
            date: self.date,
            job_type: self.job_type.clone(),
            postcode: self.postcode.clone(),
            price: self.price,
            status: self.status,
            notes: self.notes.clone(),
        }
    }

    /// Returns a copy of this job with the patch applied.
    #[must_use]
    pub fn patched(&self, patch: &JobPatch) -> Self {
        let mut job = self.clone();
        if let Some(driver) = patch.driver {
            job.driver = driver;
        }
        if let Some(date) = patch.date {
            job.date = date;
        }
        if let Some(job_type) = &patch.job_type {
            job.job_type = job_type.clone();
        }
        if let Some(postcode) = &patch.postcode {
            job.postcode.clone_from(postcode);
        }
        if let Some(price) = patch.price {
            job.price = price;
        }
        if let Some(status) = patch.status {
            job.status = status;
        }
        if let Some(notes) = &patch.notes {
            job.notes.clone_from(notes);
        }
        job.updated_at = patch.updated_at;
        job
    }

    /// Returns a copy of this job with a new status.
    ///
    /// Any actor may move a job to any of the three statuses at any time;
    /// the workflow only rejects labels outside the status set. `self` is
    /// never modified, so a rejected change leaves the caller's copy as it
    /// was.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStatus`] when `new_status` is not a known status
    /// label.
    pub fn with_status(
        &self,
        new_status: &str,
        _actor: Actor,
        clock: &impl Clock,
    ) -> Result<Self, InvalidStatus> {
        let status = JobStatus::try_from(new_status)?;
        Ok(self.patched(&JobPatch::status(status, clock)))
    }
}
