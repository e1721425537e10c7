//! Fixed-point price and integer quantity types
//!
//! Uses rust_decimal for deterministic price arithmetic (no floating-point
//! errors). Quantities are whole units and are always strictly positive.

use crate::errors::OrderError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Limit price of an order or execution price of a trade
///
/// Always strictly positive and at most `MAX_PRICE_UNITS`. Ordering and
/// equality are numeric, so `190.40` and `190.4` are the same price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

/// Largest accepted price, in whole units
///
/// Keeps sums of book prices far below `Decimal::MAX`.
pub const MAX_PRICE_UNITS: u64 = 1_000_000_000_000;

impl Price {
    /// Create a price, rejecting zero, negative values and values above
    /// `MAX_PRICE_UNITS`
    pub fn try_new(value: Decimal) -> Result<Self, OrderError> {
        if value <= Decimal::ZERO || value > Decimal::from(MAX_PRICE_UNITS) {
            return Err(OrderError::InvalidPrice(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Whole-unit price for literals in tests and demo data
    ///
    /// Infallible: `0` becomes one unit and anything above
    /// `MAX_PRICE_UNITS` becomes `MAX_PRICE_UNITS`. Input that may be out of
    /// range goes through `try_new` or `FromStr` instead.
    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value.clamp(1, MAX_PRICE_UNITS)))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = OrderError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl FromStr for Price {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str_exact(s.trim())
            .map_err(|_| OrderError::InvalidPrice(s.to_string()))?;
        Self::try_new(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order or trade size in whole units
///
/// Invariant: `quantity > 0`. An order that would reach zero is removed
/// from the book rather than kept with an empty size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Quantity(u64);

impl Quantity {
    pub fn try_new(value: u64) -> Result<Self, OrderError> {
        if value == 0 {
            return Err(OrderError::InvalidQuantity(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// `self - other`, or `None` when the result would not be positive
    pub fn checked_sub(self, other: Quantity) -> Option<Quantity> {
        match self.0.checked_sub(other.0) {
            Some(0) | None => None,
            Some(rest) => Some(Quantity(rest)),
        }
    }
}

impl TryFrom<u64> for Quantity {
    type Error = OrderError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Quantity> for u64 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl FromStr for Quantity {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u64>()
            .map_err(|_| OrderError::InvalidQuantity(s.to_string()))?;
        Self::try_new(value)
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
    use proptest::prelude::*;

    #[test]
    fn test_price_rejects_non_positive() {
        assert!(Price::try_new(Decimal::ZERO).is_err());
        assert!(Price::try_new(Decimal::new(-1, 2)).is_err());
        assert!("0".parse::<Price>().is_err());
        assert!("abc".parse::<Price>().is_err());
    }

    #[test]
    fn test_price_upper_bound() {
        let max = Decimal::from(MAX_PRICE_UNITS);
        assert_eq!(Price::try_new(max).map(|p| p.as_decimal()), Ok(max));
        assert!(Price::try_new(max + Decimal::new(1, 2)).is_err());
        assert!(Price::try_new(Decimal::MAX).is_err());
        assert!("1000000000000.01".parse::<Price>().is_err());
        assert!(serde_json::from_str::<Price>("\"79228162514264337593543950335\"").is_err());
    }

    #[test]
    fn test_price_from_u64_clamps_into_range() {
        assert_eq!(Price::from_u64(0), Price::from_u64(1));
        assert_eq!(Price::from_u64(u64::MAX).as_decimal(), Decimal::from(MAX_PRICE_UNITS));
        assert_eq!(Price::from_u64(190).as_decimal(), Decimal::from(190));
    }

    #[test]
    fn test_price_numeric_equality() {
        let a: Price = "190.40".parse().unwrap();
        let b: Price = "190.4".parse().unwrap();
        assert_eq!(a, b);
        assert!(a < "190.41".parse::<Price>().unwrap());
    }

    #[test]
    fn test_price_serialization() {
        let price: Price = "3000.50".parse().unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"3000.50\"");

        let deserialized: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(price, deserialized);
        assert!(serde_json::from_str::<Price>("\"-1\"").is_err());
    }

    #[test]
    fn test_quantity_rejects_zero() {
        assert_eq!(
            Quantity::try_new(0),
            Err(OrderError::InvalidQuantity("0".to_string()))
        );
        assert!(serde_json::from_str::<Quantity>("0").is_err());
    }

    #[test]
    fn test_quantity_checked_sub() {
        let forty = Quantity::try_new(40).unwrap();
        let fifteen = Quantity::try_new(15).unwrap();

        assert_eq!(forty.checked_sub(fifteen), Some(Quantity::try_new(25).unwrap()));
        assert_eq!(fifteen.checked_sub(forty), None);
        assert_eq!(forty.checked_sub(forty), None);
    }

    proptest! {
        #[test]
        fn prop_checked_sub_stays_positive(a in 1u64..10_000, b in 1u64..10_000) {
            let qa = Quantity::try_new(a).unwrap();
            let qb = Quantity::try_new(b).unwrap();
            match qa.checked_sub(qb) {
                Some(rest) => prop_assert_eq!(rest.get(), a - b),
                None => prop_assert!(a <= b),
            }
        }
    }
}
