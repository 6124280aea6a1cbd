//! Error taxonomy for tabulador calculations.
//!
//! Failures fall into two families:
//!
//! - [`ConfigurationError`]: the static catalog or engine configuration is
//!   unusable (unknown tabulador, malformed table). Fatal to the calculation
//!   and never defaulted.
//! - [`InvalidInput`]: the caller passed a value outside the operation's
//!   contract (negative income, percent above 100, no students).
//!
//! An out-of-range cap is not an error; see [`crate::CapSelection`].

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::TabuladorId;

/// The catalog, a discount table, or the engine configuration is malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("tabulador {0} is not present in the catalog")]
    UnknownTabulador(TabuladorId),

    #[error("tabulador {0} is defined more than once")]
    DuplicateTabulador(TabuladorId),

    #[error("discount table has no tiers")]
    EmptyTable,

    #[error("discount table is missing its unbounded sentinel tier")]
    MissingSentinel,

    #[error("unbounded tier at position {0} is not the last tier")]
    MisplacedSentinel(usize),

    #[error("sentinel tier must carry a 0% discount, got {0}%")]
    SentinelDiscount(u8),

    #[error("tier bounds must be strictly increasing, got {previous} followed by {next}")]
    NonIncreasingBound { previous: Decimal, next: Decimal },

    #[error("first tier bound must be positive, got {0}")]
    NonPositiveBound(Decimal),

    #[error("discounts must not increase with income, got {previous}% followed by {next}%")]
    IncreasingDiscount { previous: u8, next: u8 },

    #[error("cannot rescale a table from tuition {from} to {to}")]
    InvalidTuitionScale { from: Decimal, to: Decimal },

    #[error("reference tuition must be positive, got {0}")]
    InvalidReferenceTuition(Decimal),

    #[error("cap band {min}..={max} is empty or exceeds 100")]
    InvalidCapBand { min: u8, max: u8 },
}

/// A caller passed a value outside an operation's contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("income must be non-negative, got {0}")]
    NegativeIncome(Decimal),

    #[error("household income must be positive, got {0}")]
    NonPositiveHouseholdIncome(Decimal),

    #[error("base tuition must be non-negative, got {0}")]
    NegativeTuition(Decimal),

    #[error("base tuition must be positive, got {0}")]
    NonPositiveTuition(Decimal),

    #[error("discount percent must be between 0 and 100, got {0}")]
    PercentOutOfRange(i64),

    #[error("student count must be at least 1")]
    NoStudents,

    #[error("'{0}' is not a valid discount percent")]
    UnparseablePercent(String),

    #[error("'{0}' is not a valid tabulador identifier")]
    UnparseableTabulador(String),

    /// The inputs are individually valid but their product or quotient does
    /// not fit in a `Decimal`.
    #[error("arithmetic overflow computing {0}")]
    Overflow(&'static str),
}

/// Any failure returned by [`crate::TabuladorEngine`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TabuladorError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
}

impl TabuladorError {
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn configuration_error_wraps_into_tabulador_error() {
        let err: TabuladorError = ConfigurationError::MissingSentinel.into();

        assert!(err.is_configuration_error());
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn invalid_input_wraps_into_tabulador_error() {
        let err: TabuladorError = InvalidInput::NegativeIncome(dec!(-1)).into();

        assert!(err.is_invalid_input());
        assert_eq!(
            err.to_string(),
            "invalid input: income must be non-negative, got -1"
        );
    }

    #[test]
    fn overflow_names_the_quantity() {
        assert_eq!(
            InvalidInput::Overflow("student share").to_string(),
            "arithmetic overflow computing student share"
        );
    }
}
