//! Domain model for job scheduling.
//!
//! The job domain models the fixed driver pool, job details, prices and the
//! status workflow while keeping all infrastructure concerns outside of the
//! domain boundary.

mod actor;
mod driver;
mod error;
mod ids;
mod job;
mod price;
mod status;

pub use actor::{Actor, CallerIdentity};
pub use driver::Driver;
pub use error::{InvalidStatus, JobDomainError, ParseDriverError, ParsePriceError};
pub use ids::{JobId, JobType};
pub use job::{Job, JobPatch, NewJob, PersistedJobData};
pub use price::Price;
pub use status::JobStatus;
