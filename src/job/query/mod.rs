//! Driver- and date-scoped views over a job collection.

use crate::job::domain::{Driver, Job};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Ordering used by the admin board: date ascending, then driver number
/// ascending.
///
/// Drivers compare by the number in their label, so `Driver 2` comes before
/// `Driver 10`.
#[must_use]
pub fn admin_order(a: &Job, b: &Job) -> Ordering {
    a.date()
        .cmp(&b.date())
        .then_with(|| a.driver().number().cmp(&b.driver().number()))
}

/// Returns the jobs of `driver` on `date`, keeping their input order.
#[must_use]
pub fn filter_by_driver_and_date(jobs: &[Job], driver: Driver, date: NaiveDate) -> Vec<Job> {
    jobs.iter()
        .filter(|job| job.driver() == driver && job.date() == date)
        .cloned()
        .collect()
}

/// Returns every job of `driver`, ordered by date ascending.
///
/// Jobs on the same date keep their input order.
#[must_use]
pub fn filter_by_driver(jobs: &[Job], driver: Driver) -> Vec<Job> {
    let mut matching: Vec<Job> = jobs
        .iter()
        .filter(|job| job.driver() == driver)
        .cloned()
        .collect();
    matching.sort_by_key(Job::date);
    matching
}

/// Returns the jobs dated on any of `dates`, in [`admin_order`].
///
/// The sort is stable, so jobs of one driver on one day keep their input
/// order.
#[must_use]
pub fn filter_by_date_window<S>(jobs: &[Job], dates: &HashSet<NaiveDate, S>) -> Vec<Job>
where
    S: std::hash::BuildHasher,
{
    let mut matching: Vec<Job> = jobs
        .iter()
        .filter(|job| dates.contains(&job.date()))
        .cloned()
        .collect();
    matching.sort_by(admin_order);
    matching
}
