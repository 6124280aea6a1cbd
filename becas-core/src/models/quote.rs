use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::DiscountPercent;

/// A computed scholarship: the discount granted and what the family pays.
///
/// Recomputed on every input change and discarded after rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub percent: DiscountPercent,

    /// Monthly contribution (aportación) after the discount, 2 decimal places.
    pub amount_due: Decimal,
}

/// A [`Quote`] formatted for the assignment form's controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    /// Integer string, e.g. `"93"`.
    pub percent: String,
    /// Exactly two decimals, e.g. `"105.00"`.
    pub amount_due: String,
}

impl Quote {
    pub fn form_values(&self) -> FormValues {
        FormValues {
            percent: self.percent.to_string(),
            amount_due: format!("{:.2}", self.amount_due),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn form_values_pad_amount_to_two_decimals() {
        let quote = Quote {
            percent: DiscountPercent::new(0).unwrap(),
            amount_due: dec!(1500),
        };

        assert_eq!(
            quote.form_values(),
            FormValues {
                percent: "0".to_string(),
                amount_due: "1500.00".to_string(),
            }
        );
    }

    #[test]
    fn form_values_keep_cents() {
        let quote = Quote {
            percent: DiscountPercent::new(93).unwrap(),
            amount_due: dec!(105.50),
        };

        assert_eq!(quote.form_values().amount_due, "105.50");
        assert_eq!(quote.form_values().percent, "93");
    }
}
