//! Discount schedules mapping household income to a scholarship percentage.
//!
//! A table is an ascending list of tiers. Each tier reads "if income is
//! strictly below `upper_income_bound`, the discount is `discount_percent`".
//! The last tier has no bound (the sentinel) and a 0% discount, so every
//! non-negative income finds a tier.
//!
//! | upper bound | discount |
//! |-------------|----------|
//! | 800         | 94       |
//! | 900         | 93       |
//! | ...         | ...      |
//! | (none)      | 0        |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, InvalidInput, TabuladorError};
use crate::models::DiscountPercent;

/// One row of a discount table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTier {
    /// Exclusive upper income bound; `None` marks the sentinel tier.
    pub upper_income_bound: Option<Decimal>,
    pub discount_percent: DiscountPercent,
}

impl DiscountTier {
    pub fn bounded(
        upper_income_bound: Decimal,
        discount_percent: DiscountPercent,
    ) -> Self {
        Self {
            upper_income_bound: Some(upper_income_bound),
            discount_percent,
        }
    }

    pub fn sentinel() -> Self {
        Self {
            upper_income_bound: None,
            discount_percent: DiscountPercent::ZERO,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.upper_income_bound.is_none()
    }

    /// Whether `income` falls below this tier's bound. An income equal to the
    /// bound belongs to the next tier.
    pub fn admits(
        &self,
        income: Decimal,
    ) -> bool {
        self.upper_income_bound
            .is_none_or(|bound| income < bound)
    }
}

/// Scans `tiers` in order and returns the discount of the first tier whose
/// bound exceeds `income`.
///
/// Returns `None` when no tier matches, which only happens for an empty or
/// sentinel-less slice. Callers must treat that as a configuration problem.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use becas_core::{DiscountPercent, DiscountTier, lookup_discount};
///
/// let tiers = vec![
///     DiscountTier::bounded(dec!(800), DiscountPercent::new(94).unwrap()),
///     DiscountTier::bounded(dec!(900), DiscountPercent::new(93).unwrap()),
///     DiscountTier::sentinel(),
/// ];
///
/// assert_eq!(lookup_discount(&tiers, dec!(800)).map(|p| p.value()), Some(93));
/// assert_eq!(lookup_discount(&tiers[..2], dec!(5000)), None);
/// ```
pub fn lookup_discount(
    tiers: &[DiscountTier],
    income: Decimal,
) -> Option<DiscountPercent> {
    tiers
        .iter()
        .find(|tier| tier.admits(income))
        .map(|tier| tier.discount_percent)
}

/// A validated discount schedule.
///
/// Guarantees, checked by [`DiscountTable::new`]:
/// - at least one tier, the last of which is the only unbounded one
/// - the sentinel carries a 0% discount
/// - bounds are positive and strictly increasing
/// - discounts never increase as the bound increases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountTable {
    tiers: Vec<DiscountTier>,
}

impl DiscountTable {
    /// Validates `tiers` and wraps them in a table.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found in the tier list.
    pub fn new(tiers: Vec<DiscountTier>) -> Result<Self, ConfigurationError> {
        let Some(last) = tiers.last() else {
            return Err(ConfigurationError::EmptyTable);
        };
        if let Some(position) = tiers[..tiers.len() - 1]
            .iter()
            .position(DiscountTier::is_sentinel)
        {
            return Err(ConfigurationError::MisplacedSentinel(position));
        }
        if !last.is_sentinel() {
            return Err(ConfigurationError::MissingSentinel);
        }
        if last.discount_percent != DiscountPercent::ZERO {
            return Err(ConfigurationError::SentinelDiscount(
                last.discount_percent.value(),
            ));
        }

        if let Some(first) = tiers[0].upper_income_bound {
            if first <= Decimal::ZERO {
                return Err(ConfigurationError::NonPositiveBound(first));
            }
        }

        for pair in tiers.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            if let (Some(prev_bound), Some(next_bound)) =
                (previous.upper_income_bound, next.upper_income_bound)
            {
                if next_bound <= prev_bound {
                    return Err(ConfigurationError::NonIncreasingBound {
                        previous: prev_bound,
                        next: next_bound,
                    });
                }
            }
            if next.discount_percent > previous.discount_percent {
                return Err(ConfigurationError::IncreasingDiscount {
                    previous: previous.discount_percent.value(),
                    next: next.discount_percent.value(),
                });
            }
        }

        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[DiscountTier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Discount for `income`. Total because the sentinel matches everything.
    pub fn lookup(
        &self,
        income: Decimal,
    ) -> DiscountPercent {
        // `new` guarantees a trailing sentinel, so a tier always matches and
        // the fallback is never taken.
        lookup_discount(&self.tiers, income).unwrap_or(DiscountPercent::ZERO)
    }

    /// Returns a copy whose finite bounds are rescaled from a table written
    /// for `from_tuition` to one for `to_tuition`.
    ///
    /// Percentages are unchanged; each bound becomes
    /// `bound × to_tuition / from_tuition`, multiplied before dividing so
    /// whole-number ratios stay exact.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::InvalidTuitionScale`] unless both tuitions are
    ///   positive
    /// - [`InvalidInput::Overflow`] if a rescaled bound does not fit in a
    ///   `Decimal`
    pub fn scaled(
        &self,
        from_tuition: Decimal,
        to_tuition: Decimal,
    ) -> Result<Self, TabuladorError> {
        if from_tuition <= Decimal::ZERO || to_tuition <= Decimal::ZERO {
            return Err(ConfigurationError::InvalidTuitionScale {
                from: from_tuition,
                to: to_tuition,
            }
            .into());
        }
        let tiers = self
            .tiers
            .iter()
            .map(|tier| -> Result<DiscountTier, InvalidInput> {
                let upper_income_bound = match tier.upper_income_bound {
                    Some(bound) => Some(
                        bound
                            .checked_mul(to_tuition)
                            .and_then(|product| product.checked_div(from_tuition))
                            .ok_or(InvalidInput::Overflow("scaled income bound"))?,
                    ),
                    None => None,
                };
                Ok(DiscountTier {
                    upper_income_bound,
                    discount_percent: tier.discount_percent,
                })
            })
            .collect::<Result<Vec<_>, InvalidInput>>()?;

        Ok(Self { tiers })
    }
}
