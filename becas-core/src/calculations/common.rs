//! Rounding helpers shared by the tabulador calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to exactly two decimal places, half away from zero.
///
/// The result always carries a scale of 2 so it renders as a currency
/// figure without further formatting.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use becas_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// assert_eq!(round_half_up(dec!(1500)).to_string(), "1500.00");
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// `floor(part / whole × 100)`: the whole percentage `part` represents of
/// `whole`.
///
/// Returns `None` when `whole` is zero or the quotient does not fit in a
/// `Decimal`.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use becas_core::calculations::common::floor_percent;
///
/// assert_eq!(floor_percent(dec!(300), dec!(3750)), Some(dec!(8)));
/// assert_eq!(floor_percent(dec!(330), dec!(2000)), Some(dec!(16)));
/// assert_eq!(floor_percent(dec!(1500), Decimal::new(1, 28)), None);
/// ```
pub fn floor_percent(
    part: Decimal,
    whole: Decimal,
) -> Option<Decimal> {
    part.checked_mul(Decimal::ONE_HUNDRED)?
        .checked_div(whole)
        .map(|ratio| ratio.floor())
}
