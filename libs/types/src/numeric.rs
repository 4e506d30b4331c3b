//! Fixed-point decimal types for prices and quantities
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point errors).
//! A `Price` is always strictly positive; a `Quantity` is never negative.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A strictly positive price on the quote-per-base axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price, rejecting zero and negative values
    pub fn try_new(value: Decimal) -> Option<Self> {
        (value > Decimal::ZERO).then_some(Self(value))
    }

    /// Create from an integer price (whole quote units per base unit)
    ///
    /// # Panics
    /// Panics on zero (use `try_new` for fallible construction)
    pub fn from_u64(value: u64) -> Self {
        assert!(value > 0, "price must be positive");
        Self(Decimal::from(value))
    }

    /// Parse from a decimal string
    pub fn from_str(s: &str) -> Option<Self> {
        Decimal::from_str_exact(s).ok().and_then(Self::try_new)
    }

    /// Normalize an order's two legs onto the quote-per-base axis.
    ///
    /// `quote_leg / base_leg`; None if the base leg is zero or the ratio is
    /// not positive.
    pub fn from_legs(quote_leg: Quantity, base_leg: Quantity) -> Option<Self> {
        quote_leg
            .as_decimal()
            .checked_div(base_leg.as_decimal())
            .and_then(Self::try_new)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-negative quantity of base or quote units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    /// The zero quantity
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Create a quantity, rejecting negative values
    pub fn try_new(value: Decimal) -> Option<Self> {
        (value >= Decimal::ZERO).then_some(Self(value))
    }

    /// Create a quantity, rejecting zero and negative values
    pub fn try_positive(value: Decimal) -> Option<Self> {
        (value > Decimal::ZERO).then_some(Self(value))
    }

    /// Parse from a decimal string
    pub fn from_str(s: &str) -> Option<Self> {
        Decimal::from_str_exact(s).ok().and_then(Self::try_new)
    }

    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Subtract, returning None on underflow
    pub fn checked_sub(&self, other: Quantity) -> Option<Self> {
        Self::try_new(self.0 - other.0)
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        Quantity(self.0 + rhs.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_rejects_non_positive() {
        assert!(Price::try_new(Decimal::ZERO).is_none());
        assert!(Price::try_new(Decimal::from(-1)).is_none());
        assert!(Price::try_new(Decimal::ONE).is_some());
    }

    #[test]
    fn test_price_from_legs() {
        // 20000 quote for 100 base -> 200 quote per base
        let quote = Quantity::from_u64(20000);
        let base = Quantity::from_u64(100);
        let price = Price::from_legs(quote, base).unwrap();
        assert_eq!(price, Price::from_u64(200));
    }

    #[test]
    fn test_price_from_legs_zero_base() {
        let quote = Quantity::from_u64(100);
        assert!(Price::from_legs(quote, Quantity::zero()).is_none());
    }

    #[test]
    fn test_price_ordering() {
        let low = Price::from_str("99.5").unwrap();
        let high = Price::from_str("100.25").unwrap();
        assert!(low < high);
    }

    #[test]
    fn test_price_scale_insensitive_equality() {
        let a = Price::from_str("200").unwrap();
        let b = Price::from_str("200.00").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_quantity_rejects_negative() {
        assert!(Quantity::try_new(Decimal::from(-1)).is_none());
        assert!(Quantity::try_new(Decimal::ZERO).is_some());
        assert!(Quantity::try_positive(Decimal::ZERO).is_none());
    }

    #[test]
    fn test_quantity_arithmetic() {
        let a = Quantity::from_str("1.5").unwrap();
        let b = Quantity::from_str("2.5").unwrap();
        assert_eq!(a + b, Quantity::from_u64(4));
        assert_eq!(b.checked_sub(a).unwrap(), Quantity::from_u64(1));
        assert!(a.checked_sub(b).is_none());
    }

    #[test]
    fn test_quantity_min_by_ordering() {
        let a = Quantity::from_u64(100);
        let b = Quantity::from_u64(150);
        assert_eq!(a.min(b), a);
    }

    #[test]
    fn test_serialization_round_trip() {
        let price = Price::from_str("123.456").unwrap();
        let json = serde_json::to_string(&price).unwrap();
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(price, back);
    }
}
