//! Date windows used to scope job queries.
//!
//! Everything here works on calendar dates, never on timestamps, so there is
//! no midnight or time-zone ambiguity once "today" has been resolved.

mod grid;
mod window;

pub use grid::{DayCell, MonthGrid, month_grid};
pub use window::{ThreeDayWindow, shift_month, three_day_window, today_local};

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors returned while building calendar values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalendarError {
    /// The text is not a `YYYY-MM` month.
    #[error("invalid month '{0}', expected YYYY-MM")]
    InvalidYearMonth(String),

    /// The month lies outside the supported date range.
    #[error("month {year}-{month:02} is outside the supported date range")]
    OutOfRange {
        /// Requested year.
        year: i32,
        /// Requested month.
        month: u32,
    },
}

/// A calendar month, e.g. `2024-02`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    first_day: NaiveDate,
}

impl YearMonth {
    /// Creates a month from its year and 1-based month number.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] when the month number is not in
    /// `1..=12` or the year is outside chrono's supported range.
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or(CalendarError::OutOfRange { year, month })
    }

    /// Returns the month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// Returns the year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.first_day.year()
    }

    /// Returns the 1-based month number.
    #[must_use]
    pub fn month(self) -> u32 {
        self.first_day.month()
    }

    /// Returns the first day of the month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.first_day
    }

    /// Returns the number of days in the month (28 to 31).
    #[must_use]
    pub fn days_in_month(self) -> u32 {
        (28..=31)
            .rev()
            .find(|day| self.first_day.with_day(*day).is_some())
            .unwrap_or(28)
    }

    /// Returns the month before this one, or `None` at the start of the
    /// supported range.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.first_day
            .checked_sub_months(Months::new(1))
            .map(|first_day| Self { first_day })
    }

    /// Returns the month after this one, or `None` at the end of the
    /// supported range.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.first_day
            .checked_add_months(Months::new(1))
            .map(|first_day| Self { first_day })
    }

    /// Returns `true` when `date` falls in this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        Self::of(date) == self
    }
}

impl FromStr for YearMonth {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || CalendarError::InvalidYearMonth(s.to_owned());
        let (year_text, month_text) = trimmed.rsplit_once('-').ok_or_else(invalid)?;
        if month_text.len() != 2 {
            return Err(invalid());
        }
        let year = year_text.parse::<i32>().map_err(|_| invalid())?;
        let month = month_text.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
