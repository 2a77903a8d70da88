use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// A monetary value in the smallest currency unit (yen).
///
/// Arithmetic saturates at `u64::MAX` so that adding to the cart stays total.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(pub u64);

impl Price {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl Add for Price {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Mul<u32> for Price {
    type Output = Self;
    fn mul(self, quantity: u32) -> Self::Output {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tax rate expressed as an exact decimal fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// 10% consumption tax.
    pub const STANDARD: Self = Self(dec!(0.10));

    /// Tax owed on `subtotal`, truncated to a whole currency unit.
    ///
    /// Computed in decimal, so `999 * 0.10` is `99.9` and truncates to `99`.
    pub fn apply(&self, subtotal: Price) -> Price {
        // The rate is at most 1, so the result always fits in u64.
        Decimal::from(subtotal.0)
            .checked_mul(self.0)
            .and_then(|tax| tax.floor().to_u64())
            .map_or(subtotal, Price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_arithmetic() {
        let p1 = Price::new(1000);
        let p2 = Price::new(500);
        assert_eq!(p1 + p2, Price::new(1500));
        assert_eq!(p1 * 3, Price::new(3000));
        assert_eq!([p1, p2, p2].into_iter().sum::<Price>(), Price::new(2000));
    }

    #[test]
    fn test_price_saturates() {
        let max = Price::new(u64::MAX);
        assert_eq!(max + Price::new(1), max);
        assert_eq!(max * 2, max);
    }

    #[test]
    fn test_standard_tax_truncates() {
        let rate = TaxRate::STANDARD;
        assert_eq!(rate.apply(Price::new(999)), Price::new(99));
        assert_eq!(rate.apply(Price::new(2500)), Price::new(250));
        assert_eq!(rate.apply(Price::new(9)), Price::ZERO);
        assert_eq!(rate.apply(Price::ZERO), Price::ZERO);
    }

    #[test]
    fn test_tax_on_largest_subtotal() {
        let tax = TaxRate::STANDARD.apply(Price::new(u64::MAX));
        assert_eq!(tax, Price::new(u64::MAX / 10));
    }
}
