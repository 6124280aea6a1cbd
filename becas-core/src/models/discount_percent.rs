use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// A whole-number scholarship percentage in `0..=100`.
///
/// Construction is the only place the range is checked, so every operation
/// taking a `DiscountPercent` can rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct DiscountPercent(u8);

impl DiscountPercent {
    pub const ZERO: Self = Self(0);
    pub const FULL: Self = Self(100);

    /// Validates `value` against `0..=100`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::PercentOutOfRange`] for anything else. Values
    /// are rejected rather than clamped.
    pub fn new(value: i64) -> Result<Self, InvalidInput> {
        if !(0..=100).contains(&value) {
            return Err(InvalidInput::PercentOutOfRange(value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl fmt::Display for DiscountPercent {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DiscountPercent {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix('%').unwrap_or(trimmed);
        let value = digits
            .parse::<i64>()
            .map_err(|_| InvalidInput::UnparseablePercent(s.to_string()))?;
        Self::new(value)
    }
}

impl TryFrom<i64> for DiscountPercent {
    type Error = InvalidInput;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DiscountPercent> for u8 {
    fn from(percent: DiscountPercent) -> Self {
        percent.0
    }
}
