use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// Household facts the inverse calculation needs: how many students the
/// family enrols and the income their contribution is measured against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Household {
    pub student_count: u32,
    pub income: Decimal,
}

impl Household {
    /// # Errors
    ///
    /// [`InvalidInput::NoStudents`] for a zero count and
    /// [`InvalidInput::NonPositiveHouseholdIncome`] unless `income > 0`.
    pub fn new(
        student_count: u32,
        income: Decimal,
    ) -> Result<Self, InvalidInput> {
        let household = Self {
            student_count,
            income,
        };
        household.validate()?;
        Ok(household)
    }

    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.student_count == 0 {
            return Err(InvalidInput::NoStudents);
        }
        if self.income <= Decimal::ZERO {
            return Err(InvalidInput::NonPositiveHouseholdIncome(self.income));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn new_accepts_valid_household() {
        let household = Household::new(2, dec!(3000)).unwrap();

        assert_eq!(household.student_count, 2);
        assert_eq!(household.income, dec!(3000));
    }

    #[test]
    fn new_rejects_zero_students() {
        assert_eq!(Household::new(0, dec!(3000)), Err(InvalidInput::NoStudents));
    }

    #[test]
    fn new_rejects_non_positive_income() {
        assert_eq!(
            Household::new(1, dec!(0)),
            Err(InvalidInput::NonPositiveHouseholdIncome(dec!(0)))
        );
        assert_eq!(
            Household::new(1, dec!(-10)),
            Err(InvalidInput::NonPositiveHouseholdIncome(dec!(-10)))
        );
    }
}
