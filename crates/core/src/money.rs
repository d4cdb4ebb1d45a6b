use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A monetary value held at full decimal precision.
///
/// Parsed amounts keep whatever scale the source text had; nothing is rounded
/// so persisted values read back identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(decimal)
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(self) -> Self {
        Money(self.0.abs())
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Money {
    fn from(decimal: Decimal) -> Self {
        Money(decimal)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |a, b| a + b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn parse_keeps_scale() {
        assert_eq!(money("42.10").as_decimal().to_string(), "42.10");
        assert_eq!(money("7").as_decimal().to_string(), "7");
    }

    #[test]
    fn abs_of_negative() {
        assert_eq!(money("-99.00").abs(), money("99.00"));
        assert!(money("-0.01").is_negative());
        assert!(!money("0").is_negative());
    }

    #[test]
    fn display_two_places() {
        assert_eq!(money("1234.5").to_string(), "1234.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn sum_and_difference() {
        let total: Money = [money("1.25"), money("2.75"), money("10")].into_iter().sum();
        assert_eq!(total, money("14"));
        assert_eq!(total - money("4.5"), money("9.5"));
    }

    #[test]
    fn serializes_as_decimal_text() {
        let json = serde_json::to_string(&money("12.30")).unwrap();
        assert_eq!(json, "\"12.30\"");
    }
}
