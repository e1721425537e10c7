//! Order types
//!
//! A single `Order` record tagged with its `Side`. Orders are values: a
//! partial fill does not mutate the resting order, it replaces it with a
//! new value carrying the same id and price and the reduced quantity.

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    Bid,
    /// Sell order (ask)
    Ask,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => f.write_str("bid"),
            Side::Ask => f.write_str("ask"),
        }
    }
}

/// Resting limit order
///
/// Two orders are equal iff every field matches. The book uses this to
/// make sure a remove/replace targets the exact value the caller last saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
}

impl Order {
    pub fn new(order_id: OrderId, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            order_id,
            side,
            price,
            quantity,
        }
    }

    pub fn bid(order_id: OrderId, price: Price, quantity: Quantity) -> Self {
        Self::new(order_id, Side::Bid, price, quantity)
    }

    pub fn ask(order_id: OrderId, price: Price, quantity: Quantity) -> Self {
        Self::new(order_id, Side::Ask, price, quantity)
    }

    /// Same order with a different size
    pub fn with_quantity(&self, quantity: Quantity) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} #{} {} @ {}",
            self.side, self.order_id, self.quantity, self.price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(side: Side, id: u64, price: &str, qty: u64) -> Order {
        Order::new(
            OrderId::new(id),
            side,
            price.parse().unwrap(),
            Quantity::try_new(qty).unwrap(),
        )
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Bid.opposite(), Side::Ask);
        assert_eq!(Side::Ask.opposite(), Side::Bid);
    }

    #[test]
    fn test_with_quantity_keeps_identity() {
        let original = order(Side::Bid, 7, "190.75", 15);
        let reduced = original.with_quantity(Quantity::try_new(5).unwrap());

        assert_eq!(reduced.order_id, original.order_id);
        assert_eq!(reduced.price, original.price);
        assert_eq!(reduced.side, Side::Bid);
        assert_eq!(reduced.quantity.get(), 5);
        assert_ne!(reduced, original);
    }

    #[test]
    fn test_order_equality_is_by_value() {
        assert_eq!(order(Side::Ask, 1, "190.40", 40), order(Side::Ask, 1, "190.4", 40));
        assert_ne!(order(Side::Ask, 1, "190.40", 40), order(Side::Ask, 1, "190.40", 39));
    }

    #[test]
    fn test_order_serialization() {
        let order = order(Side::Ask, 3, "3000.50", 25);

        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("\"side\":\"ASK\""));

        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, deserialized);
    }

    #[test]
    fn test_order_display() {
        assert_eq!(order(Side::Bid, 12, "100", 10).to_string(), "bid #12 10 @ 100");
    }
}
