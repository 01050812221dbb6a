//! Currency amounts held in minor units.

use super::ParsePriceError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MINOR_PER_MAJOR: u64 = 100;

/// Non-negative job price with two decimal places, stored as pence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price(u64);

impl Price {
    /// Creates a price from minor units (pence).
    #[must_use]
    pub const fn from_minor_units(minor: u64) -> Self {
        Self(minor)
    }

    /// Returns the amount in minor units (pence).
    #[must_use]
    pub const fn minor_units(self) -> u64 {
        self.0
    }

    /// Parses a decimal amount such as `45`, `45.5` or `45.50`.
    ///
    /// # Errors
    ///
    /// Returns [`ParsePriceError::Negative`] for amounts below zero and
    /// [`ParsePriceError::Malformed`] for anything that is not a plain
    /// decimal number with at most two fractional digits.
    pub fn parse(raw: &str) -> Result<Self, ParsePriceError> {
        let trimmed = raw.trim();
        let (negative, magnitude) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let minor =
            parse_magnitude(magnitude).ok_or_else(|| ParsePriceError::Malformed(raw.to_owned()))?;
        if negative && minor > 0 {
            return Err(ParsePriceError::Negative(raw.to_owned()));
        }
        Ok(Self(minor))
    }
}

fn parse_magnitude(value: &str) -> Option<u64> {
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    if whole.is_empty() || !whole.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    if value.contains('.') && fraction.is_empty() {
        return None;
    }
    if fraction.len() > 2 || !fraction.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    let whole_minor = whole.parse::<u64>().ok()?.checked_mul(MINOR_PER_MAJOR)?;
    let fraction_minor = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<u64>().ok()?.checked_mul(10)?,
        _ => fraction.parse::<u64>().ok()?,
    };
    whole_minor.checked_add(fraction_minor)
}

impl TryFrom<String> for Price {
    type Error = ParsePriceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0.div_euclid(MINOR_PER_MAJOR),
            self.0.rem_euclid(MINOR_PER_MAJOR)
        )
    }
}
