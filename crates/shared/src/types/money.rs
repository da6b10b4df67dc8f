//! Money type with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision, and the
//! ledger balance check compares amounts as exact integer cents.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors converting a decimal amount to integer cents.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    /// Amount has more precision than whole cents.
    #[error("Amount {0} has sub-cent precision")]
    SubCentPrecision(Decimal),

    /// Amount does not fit in 64-bit cents.
    #[error("Amount {0} is out of range")]
    OutOfRange(Decimal),
}

/// A monetary amount in the company's bookkeeping currency (ZAR).
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Creates an amount from integer cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Converts to exact integer cents.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::SubCentPrecision` if the amount carries precision
    /// beyond two decimal places, `MoneyError::OutOfRange` if it does not fit
    /// in an `i64` number of cents. Cents are never rounded - the ledger
    /// balance invariant is exact.
    pub fn to_cents(self) -> Result<i64, MoneyError> {
        let scaled = self.0 * Decimal::ONE_HUNDRED;
        if scaled.fract() != Decimal::ZERO {
            return Err(MoneyError::SubCentPrecision(self.0));
        }
        scaled.to_i64().ok_or(MoneyError::OutOfRange(self.0))
    }

    /// Returns the inner decimal amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative()
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(self) -> bool {
        !self.0.is_zero() && self.0.is_sign_positive()
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|m| m.0).sum())
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "R {:.2}", self.0)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_from_cents() {
        let money = Money::from_cents(15_000_00);
        assert_eq!(money.amount(), dec!(15000.00));
        assert_eq!(money.to_cents().unwrap(), 15_000_00);
    }

    #[rstest::rstest]
    #[case(dec!(100.00), 10_000)]
    #[case(dec!(0.01), 1)]
    #[case(dec!(-42.50), -4250)]
    #[case(dec!(0), 0)]
    fn test_to_cents_exact(#[case] amount: Decimal, #[case] cents: i64) {
        assert_eq!(Money::new(amount).to_cents().unwrap(), cents);
    }

    #[test]
    fn test_to_cents_rejects_sub_cent_precision() {
        assert_eq!(
            Money::new(dec!(0.005)).to_cents(),
            Err(MoneyError::SubCentPrecision(dec!(0.005)))
        );
    }

    #[test]
    fn test_money_sum() {
        let total: Money = [dec!(60.00), dec!(30.00), dec!(10.00)]
            .into_iter()
            .map(Money::new)
            .sum();
        assert_eq!(total, Money::new(dec!(100.00)));
    }

    #[test]
    fn test_money_signs() {
        assert!(Money::new(dec!(10)).is_positive());
        assert!(!Money::new(dec!(10)).is_negative());
        assert!(Money::new(dec!(-10)).is_negative());
        assert!(Money::ZERO.is_zero());
        assert!(!Money::ZERO.is_positive());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(dec!(1234.5)).to_string(), "R 1234.50");
    }
}
