//! Application services for job scheduling and status tracking.

mod scheduling;

pub use scheduling::{
    AdminBoard, BulkImportOutcome, BulkSubmitPolicy, DriverMonthView, JobSchedulingService,
    JobServiceError, JobServiceResult,
};
