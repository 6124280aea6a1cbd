//! Scholarship (beca) calculations over a tabulador catalog.
//!
//! The engine answers three questions:
//!
//! | Direction | Input | Output |
//! |-----------|-------|--------|
//! | Forward (table) | household income, tabulador | discount and amount due from the tabulador's table |
//! | Forward (formula) | household, tabulador | discount that caps each student's share at the tabulador's percentage of income |
//! | Inverse | household, target discount | tabulador whose cap matches the target, or out of range |
//!
//! Every operation is a pure function of its inputs and the borrowed catalog.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use becas_core::{
//!     DiscountPercent, DiscountTable, DiscountTier, EngineConfig, TabuladorCatalog,
//!     TabuladorEngine, TabuladorId,
//! };
//!
//! let catorce = TabuladorId::new(14).unwrap();
//! let table = DiscountTable::new(vec![
//!     DiscountTier::bounded(dec!(800), DiscountPercent::new(94).unwrap()),
//!     DiscountTier::bounded(dec!(900), DiscountPercent::new(93).unwrap()),
//!     DiscountTier::sentinel(),
//! ])
//! .unwrap();
//! let catalog = TabuladorCatalog::from_tables([(catorce, table)]).unwrap();
//!
//! let engine = TabuladorEngine::new(&catalog, EngineConfig::default()).unwrap();
//! let quote = engine.select_tabulador(dec!(800), catorce).unwrap();
//!
//! assert_eq!(quote.percent.value(), 93);
//! assert_eq!(quote.amount_due, dec!(105.00));
//! ```

use std::ops::RangeInclusive;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::{floor_percent, round_half_up};
use crate::error::{ConfigurationError, InvalidInput, TabuladorError};
use crate::models::{
    Assignment, CapSelection, DiscountPercent, DiscountTable, FormChoice, Household, Quote,
    TabuladorCatalog, TabuladorId, tabulador_choices,
};

/// Computes the monthly contribution after a discount:
/// `base_tuition − base_tuition × percent / 100`, rounded half away from
/// zero to 2 decimal places.
///
/// # Errors
///
/// - [`InvalidInput::NegativeTuition`] if `base_tuition < 0`. The
///   percentage is already range-checked by [`DiscountPercent`].
/// - [`InvalidInput::Overflow`] if the discount does not fit in a `Decimal`
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use becas_core::{DiscountPercent, compute_amount_due};
///
/// let amount = compute_amount_due(dec!(1500), DiscountPercent::new(93).unwrap()).unwrap();
/// assert_eq!(amount, dec!(105.00));
/// ```
pub fn compute_amount_due(
    base_tuition: Decimal,
    percent: DiscountPercent,
) -> Result<Decimal, InvalidInput> {
    if base_tuition < Decimal::ZERO {
        return Err(InvalidInput::NegativeTuition(base_tuition));
    }
    let discount = base_tuition
        .checked_mul(percent.as_decimal())
        .map(|product| product / Decimal::ONE_HUNDRED)
        .ok_or(InvalidInput::Overflow("discount amount"))?;
    Ok(round_half_up(base_tuition - discount))
}

/// Engine parameters shared by every calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tuition (colegiatura) the catalog's tables were written for. Also the
    /// base tuition of the fixed-tuition operations.
    pub reference_tuition: Decimal,

    /// Lowest cap, in percent of household income, that maps to a tabulador.
    pub min_cap: u8,

    /// Highest cap that maps to a tabulador.
    pub max_cap: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reference_tuition: Decimal::new(1500, 0),
            min_cap: 14,
            max_cap: 20,
        }
    }
}

impl EngineConfig {
    /// # Errors
    ///
    /// - [`ConfigurationError::InvalidReferenceTuition`] unless the tuition is positive
    /// - [`ConfigurationError::InvalidCapBand`] if `min_cap > max_cap` or `max_cap > 100`
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.reference_tuition <= Decimal::ZERO {
            return Err(ConfigurationError::InvalidReferenceTuition(
                self.reference_tuition,
            ));
        }
        if self.min_cap > self.max_cap || self.max_cap > 100 {
            return Err(ConfigurationError::InvalidCapBand {
                min: self.min_cap,
                max: self.max_cap,
            });
        }
        Ok(())
    }

    pub fn cap_band(&self) -> RangeInclusive<u8> {
        self.min_cap..=self.max_cap
    }
}

/// Calculator over a borrowed, read-only [`TabuladorCatalog`].
#[derive(Debug, Clone)]
pub struct TabuladorEngine<'a> {
    catalog: &'a TabuladorCatalog,
    config: EngineConfig,
}

impl<'a> TabuladorEngine<'a> {
    /// # Errors
    ///
    /// Returns the [`ConfigurationError`] from [`EngineConfig::validate`].
    pub fn new(
        catalog: &'a TabuladorCatalog,
        config: EngineConfig,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self { catalog, config })
    }

    pub fn catalog(&self) -> &TabuladorCatalog {
        self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolves `cap` and returns its table.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::UnknownTabulador`] if the catalog lacks `cap`.
    pub fn table(
        &self,
        cap: TabuladorId,
    ) -> Result<&DiscountTable, ConfigurationError> {
        self.catalog.get(cap)
    }

    /// Forward lookup at the reference tuition: finds the discount for
    /// `income` in `cap`'s table and the amount due after it.
    ///
    /// # Errors
    ///
    /// - [`InvalidInput::NegativeIncome`] if `income < 0`
    /// - [`ConfigurationError::UnknownTabulador`] if `cap` is not in the catalog
    pub fn select_tabulador(
        &self,
        income: Decimal,
        cap: TabuladorId,
    ) -> Result<Quote, TabuladorError> {
        if income < Decimal::ZERO {
            return Err(InvalidInput::NegativeIncome(income).into());
        }
        let table = self.catalog.get(cap)?;
        let percent = table.lookup(income);
        debug!(%income, %cap, %percent, "tabulador lookup");

        let amount_due = compute_amount_due(self.config.reference_tuition, percent)?;
        Ok(Quote {
            percent,
            amount_due,
        })
    }

    /// Forward lookup for a household whose tuition differs from the
    /// reference. The table's bounds are rescaled to `base_tuition` before
    /// the lookup, so the percentage schedule is preserved.
    ///
    /// # Errors
    ///
    /// As [`Self::select_tabulador`], plus [`InvalidInput::NonPositiveTuition`]
    /// unless `base_tuition > 0`.
    pub fn select_tabulador_for_tuition(
        &self,
        income: Decimal,
        cap: TabuladorId,
        base_tuition: Decimal,
    ) -> Result<Quote, TabuladorError> {
        if income < Decimal::ZERO {
            return Err(InvalidInput::NegativeIncome(income).into());
        }
        if base_tuition <= Decimal::ZERO {
            return Err(InvalidInput::NonPositiveTuition(base_tuition).into());
        }
        let table = self
            .catalog
            .get(cap)?
            .scaled(self.config.reference_tuition, base_tuition)?;
        let percent = table.lookup(income);
        debug!(%income, %cap, %base_tuition, %percent, "scaled tabulador lookup");

        let amount_due = compute_amount_due(base_tuition, percent)?;
        Ok(Quote {
            percent,
            amount_due,
        })
    }

    /// Inverse direction: given the discount the committee wants to grant,
    /// works out what share of household income the family would pay across
    /// all its students, `floor(students × tuition × (100 − target) / 100 /
    /// income × 100)`, and maps it to a tabulador.
    ///
    /// Shares inside the configured cap band select that tabulador; anything
    /// else is [`CapSelection::OutOfRange`].
    ///
    /// # Errors
    ///
    /// - [`InvalidInput::NegativeTuition`] if `base_tuition < 0`
    /// - [`InvalidInput::NoStudents`] / [`InvalidInput::NonPositiveHouseholdIncome`]
    ///   for an invalid household
    /// - [`InvalidInput::Overflow`] if the contribution or its share of income
    ///   does not fit in a `Decimal`, e.g. for a vanishingly small income
    pub fn derive_cap_from_target(
        &self,
        base_tuition: Decimal,
        target: DiscountPercent,
        household: &Household,
    ) -> Result<CapSelection, InvalidInput> {
        if base_tuition < Decimal::ZERO {
            return Err(InvalidInput::NegativeTuition(base_tuition));
        }
        household.validate()?;

        let aggregate = base_tuition
            .checked_mul(Decimal::ONE_HUNDRED - target.as_decimal())
            .map(|product| product / Decimal::ONE_HUNDRED)
            .and_then(|per_student| {
                per_student.checked_mul(Decimal::from(household.student_count))
            })
            .ok_or(InvalidInput::Overflow("household contribution"))?;
        let share = floor_percent(aggregate, household.income)
            .ok_or(InvalidInput::Overflow("share of household income"))?;

        let selection = share
            .to_u8()
            .filter(|cap| self.config.cap_band().contains(cap))
            .and_then(|cap| TabuladorId::new(cap).ok())
            .map_or(CapSelection::OutOfRange, CapSelection::Cap);

        if selection.is_out_of_range() {
            warn!(%share, %target, "derived cap outside tabulador band");
        } else {
            debug!(%share, %target, "derived cap");
        }
        Ok(selection)
    }

    /// Forward direction by formula: caps each student's share at `cap`
    /// percent of household income, `income × cap / 100 / students`, and
    /// returns the whole discount that share implies, rounded down.
    ///
    /// A share at or above the tuition means no discount; the percentage is
    /// clamped at 0 rather than going negative.
    ///
    /// # Errors
    ///
    /// - [`InvalidInput::NonPositiveTuition`] unless `base_tuition > 0`
    /// - [`InvalidInput::NoStudents`] / [`InvalidInput::NonPositiveHouseholdIncome`]
    ///   for an invalid household
    /// - [`InvalidInput::Overflow`] if the share or the percentage does not fit
    ///   in a `Decimal`
    pub fn recalculate_from_cap(
        &self,
        base_tuition: Decimal,
        cap: TabuladorId,
        household: &Household,
    ) -> Result<Quote, InvalidInput> {
        if base_tuition <= Decimal::ZERO {
            return Err(InvalidInput::NonPositiveTuition(base_tuition));
        }
        household.validate()?;

        let share = household
            .income
            .checked_mul(Decimal::from(cap.cap_percent()))
            .map(|product| {
                product / Decimal::ONE_HUNDRED / Decimal::from(household.student_count)
            })
            .ok_or(InvalidInput::Overflow("student share"))?;

        let percent = if share >= base_tuition {
            warn!(%share, %base_tuition, "student share exceeds tuition, no discount");
            DiscountPercent::ZERO
        } else {
            // 0 <= share < base_tuition keeps raw within 0..=100
            let raw = floor_percent(base_tuition - share, base_tuition)
                .ok_or(InvalidInput::Overflow("discount percent"))?;
            raw.to_i64()
                .map_or(Ok(DiscountPercent::FULL), DiscountPercent::new)?
        };

        let amount_due = compute_amount_due(base_tuition, percent)?;
        Ok(Quote {
            percent,
            amount_due,
        })
    }

    /// Inverse direction producing everything the assignment form submits:
    /// the derived tabulador (possibly out of range) and the quote for the
    /// target discount.
    ///
    /// # Errors
    ///
    /// As [`Self::derive_cap_from_target`].
    pub fn recalculate_from_percent(
        &self,
        base_tuition: Decimal,
        target: DiscountPercent,
        household: &Household,
    ) -> Result<Assignment, InvalidInput> {
        let tabulador = self.derive_cap_from_target(base_tuition, target, household)?;
        let amount_due = compute_amount_due(base_tuition, target)?;

        Ok(Assignment {
            tabulador,
            quote: Quote {
                percent: target,
                amount_due,
            },
        })
    }

    /// Tabulador options for the configured cap band.
    pub fn tabulador_choices(&self) -> Vec<FormChoice> {
        tabulador_choices(self.config.min_cap, self.config.max_cap)
    }
}
