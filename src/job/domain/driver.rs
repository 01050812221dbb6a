//! The fixed driver pool.

use super::ParseDriverError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the twelve driver slots jobs can be assigned to.
///
/// The pool is closed: labels outside `Driver 1` to `Driver 12` are rejected
/// rather than added. Ordering follows the numeric suffix, so `Driver 2`
/// sorts before `Driver 10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Driver {
    /// `Driver 1`.
    D1,
    /// `Driver 2`.
    D2,
    /// `Driver 3`.
    D3,
    /// `Driver 4`.
    D4,
    /// `Driver 5`.
    D5,
    /// `Driver 6`.
    D6,
    /// `Driver 7`.
    D7,
    /// `Driver 8`.
    D8,
    /// `Driver 9`.
    D9,
    /// `Driver 10`.
    D10,
    /// `Driver 11`.
    D11,
    /// `Driver 12`.
    D12,
}

impl Driver {
    /// Every driver in pool order.
    pub const ALL: [Self; 12] = [
        Self::D1,
        Self::D2,
        Self::D3,
        Self::D4,
        Self::D5,
        Self::D6,
        Self::D7,
        Self::D8,
        Self::D9,
        Self::D10,
        Self::D11,
        Self::D12,
    ];

    /// Returns the numeric suffix of the driver label.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::D1 => 1,
            Self::D2 => 2,
            Self::D3 => 3,
            Self::D4 => 4,
            Self::D5 => 5,
            Self::D6 => 6,
            Self::D7 => 7,
            Self::D8 => 8,
            Self::D9 => 9,
            Self::D10 => 10,
            Self::D11 => 11,
            Self::D12 => 12,
        }
    }

    /// Returns the canonical label, e.g. `Driver 7`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::D1 => "Driver 1",
            Self::D2 => "Driver 2",
            Self::D3 => "Driver 3",
            Self::D4 => "Driver 4",
            Self::D5 => "Driver 5",
            Self::D6 => "Driver 6",
            Self::D7 => "Driver 7",
            Self::D8 => "Driver 8",
            Self::D9 => "Driver 9",
            Self::D10 => "Driver 10",
            Self::D11 => "Driver 11",
            Self::D12 => "Driver 12",
        }
    }

    /// Looks a driver up by its numeric suffix.
    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|driver| driver.number() == number)
    }
}

impl TryFrom<&str> for Driver {
    type Error = ParseDriverError;

    /// Parses a canonical label. Matching is exact and case-sensitive.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|driver| driver.label() == value)
            .ok_or_else(|| ParseDriverError(value.to_owned()))
    }
}

impl TryFrom<String> for Driver {
    type Error = ParseDriverError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Driver> for String {
    fn from(driver: Driver) -> Self {
        driver.label().to_owned()
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}
