//! Month calendar grid for the driver view.

use super::YearMonth;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const DAYS_PER_WEEK: usize = 7;

/// One cell of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayCell {
    /// Padding before the 1st so that it lands in its weekday column.
    Blank,
    /// A day of the month.
    Day {
        /// The full date of the cell.
        date: NaiveDate,
        /// Whether the cell is the caller's current day.
        is_today: bool,
        /// Whether the cell is the selected day.
        is_selected: bool,
    },
}

impl DayCell {
    /// Returns the date for day cells and `None` for blanks.
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Blank => None,
            Self::Day { date, .. } => Some(*date),
        }
    }
}

/// Sunday-first grid of cells for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    year_month: YearMonth,
    cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Returns the month shown.
    #[must_use]
    pub const fn year_month(&self) -> YearMonth {
        self.year_month
    }

    /// Returns every cell, blanks first, indexed from 0.
    #[must_use]
    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    /// Returns the number of leading blank cells.
    #[must_use]
    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|cell| matches!(cell, DayCell::Blank))
            .count()
    }

    /// Returns the number of day cells.
    #[must_use]
    pub fn day_count(&self) -> usize {
        self.cells.len() - self.leading_blanks()
    }

    /// Returns the grid split into rows of seven cells; the last row may be
    /// shorter.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    /// Returns the selected day's cell, if it lies in this month.
    #[must_use]
    pub fn selected(&self) -> Option<&DayCell> {
        self.cells
            .iter()
            .find(|cell| matches!(cell, DayCell::Day { is_selected: true, .. }))
    }
}

/// Builds the grid for `year_month`.
///
/// The grid starts with one blank per weekday before the 1st (0 for a
/// Sunday) followed by one cell per day of the month, each flagged against
/// `today` and `selected`.
#[must_use]
pub fn month_grid(year_month: YearMonth, today: NaiveDate, selected: NaiveDate) -> MonthGrid {
    let first_day = year_month.first_day();
    let blanks = first_day.weekday().num_days_from_sunday() as usize;
    let day_count = year_month.days_in_month() as usize;

    let mut cells = Vec::with_capacity(blanks + day_count);
    cells.extend(std::iter::repeat_n(DayCell::Blank, blanks));
    cells.extend(
        first_day
            .iter_days()
            .take(day_count)
            .map(|date| DayCell::Day {
                date,
                is_today: date == today,
                is_selected: date == selected,
            }),
    );

    MonthGrid { year_month, cells }
}
