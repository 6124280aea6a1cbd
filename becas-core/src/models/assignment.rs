//! The tabulador selection and the scholarship assignment submitted with it.
//!
//! When the inverse calculation lands outside the cap band the selection is
//! [`CapSelection::OutOfRange`]. That value is ordinary data: it is carried
//! in [`Assignment`] and submitted like any other choice. Whether a form
//! shows it as disabled is up to the renderer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;
use crate::models::{Quote, TabuladorId};

/// Form value of the out-of-range choice.
pub const OUT_OF_RANGE_VALUE: &str = "fuera_rango";

/// Form label of the out-of-range choice.
pub const OUT_OF_RANGE_LABEL: &str = "Fuera del rango";

/// Which tabulador the assignment form should select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CapSelection {
    Cap(TabuladorId),
    OutOfRange,
}

impl CapSelection {
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange)
    }

    pub fn tabulador(&self) -> Option<TabuladorId> {
        match self {
            Self::Cap(id) => Some(*id),
            Self::OutOfRange => None,
        }
    }

    /// Value the form submits for this choice.
    pub fn form_value(&self) -> String {
        match self {
            Self::Cap(id) => id.to_string(),
            Self::OutOfRange => OUT_OF_RANGE_VALUE.to_string(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Cap(id) => id.label(),
            Self::OutOfRange => OUT_OF_RANGE_LABEL.to_string(),
        }
    }
}

impl fmt::Display for CapSelection {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.form_value())
    }
}

impl FromStr for CapSelection {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == OUT_OF_RANGE_VALUE {
            return Ok(Self::OutOfRange);
        }
        s.parse().map(Self::Cap)
    }
}

impl TryFrom<String> for CapSelection {
    type Error = InvalidInput;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CapSelection> for String {
    fn from(selection: CapSelection) -> Self {
        selection.form_value()
    }
}

/// Outcome of recalculating from a target percentage: the tabulador to
/// select plus the resulting quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub tabulador: CapSelection,
    #[serde(flatten)]
    pub quote: Quote,
}

impl Assignment {
    /// Field name/value pairs as submitted by the assignment form. The
    /// tabulador is always present, `fuera_rango` included.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let values = self.quote.form_values();
        vec![
            ("tabulador", self.tabulador.form_value()),
            ("porcentaje", values.percent),
            ("monto", values.amount_due),
        ]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::DiscountPercent;

    #[test]
    fn parses_out_of_range_and_caps() {
        assert_eq!("fuera_rango".parse::<CapSelection>(), Ok(CapSelection::OutOfRange));
        assert_eq!(
            "15".parse::<CapSelection>(),
            Ok(CapSelection::Cap(TabuladorId::new(15).unwrap()))
        );
        assert!("nope".parse::<CapSelection>().is_err());
    }

    #[test]
    fn out_of_range_has_its_own_label() {
        assert_eq!(CapSelection::OutOfRange.label(), "Fuera del rango");
        assert_eq!(CapSelection::OutOfRange.tabulador(), None);
        assert!(CapSelection::OutOfRange.is_out_of_range());
    }

    #[test]
    fn form_fields_always_include_tabulador() {
        let assignment = Assignment {
            tabulador: CapSelection::OutOfRange,
            quote: Quote {
                percent: DiscountPercent::new(50).unwrap(),
                amount_due: dec!(750.00),
            },
        };

        assert_eq!(
            assignment.form_fields(),
            vec![
                ("tabulador", "fuera_rango".to_string()),
                ("porcentaje", "50".to_string()),
                ("monto", "750.00".to_string()),
            ]
        );
    }
}
