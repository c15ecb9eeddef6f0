//! Type-safe price representation using decimal arithmetic.
//!
//! The backend sends costs as plain JSON numbers (`"cost": 100`). They are
//! decoded straight into a [`Decimal`] so cart totals never pick up binary
//! floating point error.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product cost or cart total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: NonZeroU32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity.get())))
    }
}

impl From<u32> for Price {
    fn from(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_integer_and_fractional_costs() {
        let whole: Price = serde_json::from_str("100").unwrap();
        assert_eq!(whole, Price::from(100));

        let fractional: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(fractional.amount(), Decimal::new(1999, 2));
    }

    #[test]
    fn test_times_quantity() {
        let price = Price::new(Decimal::new(1999, 2));
        let total = price.times(NonZeroU32::new(3).unwrap());
        assert_eq!(total.amount(), Decimal::new(5997, 2));
    }

    #[test]
    fn test_sum_of_empty_is_zero() {
        let total: Price = Vec::<Price>::new().into_iter().sum();
        assert_eq!(total, Price::ZERO);
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from(100).to_string(), "100.00");
        assert_eq!(Price::new(Decimal::new(55, 1)).to_string(), "5.50");
    }
}
