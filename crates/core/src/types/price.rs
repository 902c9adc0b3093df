//! Type-safe price representation using decimal arithmetic.
//!
//! All FerreterIA prices are Colombian pesos. The catalog displays them with
//! zero decimal places and dot thousands grouping (`$ 45.000`), matching the
//! `es-CO` currency convention. On the wire a price is a plain JSON number so
//! stores written by earlier versions of the app parse unchanged.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price in Colombian pesos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of pesos.
    #[must_use]
    pub fn from_pesos(pesos: i64) -> Self {
        Self(Decimal::from(pesos))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Multiply by a line quantity, yielding a subtotal.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Format as Colombian peso currency with zero decimal places,
    /// e.g. `$ 45.000`.
    #[must_use]
    pub fn display_cop(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let digits = rounded.abs().to_string();
        let grouped = group_thousands(&digits);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-$ {grouped}")
        } else {
            format!("$ {grouped}")
        }
    }
}

/// Insert `.` thousands separators into a plain digit string.
fn group_thousands(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut grouped = String::with_capacity(chars.len() + chars.len() / 3);
    for (i, c) in chars.iter().enumerate() {
        let remaining = chars.len() - i;
        if i > 0 && remaining.is_multiple_of(3) {
            grouped.push('.');
        }
        grouped.push(*c);
    }
    grouped
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_cop())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::from_pesos(0).display_cop(), "$ 0");
        assert_eq!(Price::from_pesos(999).display_cop(), "$ 999");
        assert_eq!(Price::from_pesos(1_000).display_cop(), "$ 1.000");
        assert_eq!(Price::from_pesos(45_000).display_cop(), "$ 45.000");
        assert_eq!(Price::from_pesos(1_234_567).display_cop(), "$ 1.234.567");
    }

    #[test]
    fn test_display_rounds_to_whole_pesos() {
        let price = Price::new(Decimal::new(14_999_5, 1)); // 14999.5
        assert_eq!(price.display_cop(), "$ 15.000");
    }

    #[test]
    fn test_times_and_sum() {
        let unit = Price::from_pesos(15_000);
        let subtotal = unit.times(3);
        assert_eq!(subtotal, Price::from_pesos(45_000));

        let total: Price = [subtotal, Price::from_pesos(5_000)].into_iter().sum();
        assert_eq!(total, Price::from_pesos(50_000));
    }

    #[test]
    fn test_serde_as_number() {
        let price = Price::from_pesos(15_000);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "15000.0");

        let parsed: Price = serde_json::from_str("15000").unwrap();
        assert_eq!(parsed, price);
    }

    #[test]
    fn test_is_positive() {
        assert!(Price::from_pesos(1).is_positive());
        assert!(!Price::ZERO.is_positive());
        assert!(!Price::from_pesos(-5).is_positive());
    }
}
