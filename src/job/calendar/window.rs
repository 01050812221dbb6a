//! The yesterday/today/tomorrow window and month arithmetic.

use chrono::{Months, NaiveDate};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Three consecutive calendar days centred on a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreeDayWindow {
    /// The day before the reference date.
    pub yesterday: NaiveDate,
    /// The reference date.
    pub today: NaiveDate,
    /// The day after the reference date.
    pub tomorrow: NaiveDate,
}

impl ThreeDayWindow {
    /// Returns the three dates in ascending order.
    #[must_use]
    pub const fn dates(&self) -> [NaiveDate; 3] {
        [self.yesterday, self.today, self.tomorrow]
    }

    /// Returns the three dates as `YYYY-MM-DD` strings in ascending order.
    #[must_use]
    pub fn iso(&self) -> [String; 3] {
        self.dates().map(|date| date.format("%Y-%m-%d").to_string())
    }

    /// Returns `true` when `date` is one of the three days.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates().contains(&date)
    }
}

/// Computes the window around `reference` by whole calendar days.
///
/// At the edges of chrono's date range the missing neighbour saturates to
/// the reference date itself.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use driver_jobs::job::calendar::three_day_window;
///
/// let reference = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
/// let window = three_day_window(reference);
/// assert_eq!(window.iso(), ["2024-02-29", "2024-03-01", "2024-03-02"]);
/// ```
#[must_use]
pub fn three_day_window(reference: NaiveDate) -> ThreeDayWindow {
    ThreeDayWindow {
        yesterday: reference.pred_opt().unwrap_or(reference),
        today: reference,
        tomorrow: reference.succ_opt().unwrap_or(reference),
    }
}

/// Returns the caller's local calendar day according to `clock`.
#[must_use]
pub fn today_local(clock: &impl Clock) -> NaiveDate {
    clock.local().date_naive()
}

/// Moves `date` by `delta` whole months.
///
/// The day of month is kept where the target month has it and clamped to
/// the target month's last day otherwise, so 31 January plus one month is
/// the last day of February. Returns `None` outside chrono's date range.
#[must_use]
pub fn shift_month(date: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let months = Months::new(delta.unsigned_abs());
    if delta < 0 {
        date.checked_sub_months(months)
    } else {
        date.checked_add_months(months)
    }
}
