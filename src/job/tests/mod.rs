//! Unit tests for the job module.


use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use std::sync::atomic::{AtomicI64, Ordering};

/// Clock that starts at noon UTC on a fixed day and advances one second per
/// reading, so successive timestamps are distinct.
pub(super) struct SteppingClock {
    seconds: AtomicI64,
}

impl SteppingClock {
    pub(super) fn at_noon(date: NaiveDate) -> Self {
        let start = Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).expect("valid time"));
        Self {
            seconds: AtomicI64::new(start.timestamp()),
        }
    }

    fn peek(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.seconds.load(Ordering::SeqCst), 0).expect("valid timestamp")
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.peek().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let seconds = self.seconds.fetch_add(1, Ordering::SeqCst);
        DateTime::from_timestamp(seconds, 0).expect("valid timestamp")
    }
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
