//! In-memory adapters for job scheduling.

mod job;

pub use job::InMemoryJobRepository;
