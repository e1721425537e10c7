//! Trade execution types
//!
//! Trades are write-once: created by a successful match and then only
//! appended to the trade log.

use crate::ids::{OrderId, TradeId};
use crate::numeric::{Price, Quantity};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Executed trade between the best bid and the best ask
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: TradeId,
    pub executed_at: DateTime<Utc>,
    pub quantity: Quantity,
    /// Always the matched ask's price
    pub price: Price,
    pub bid_order_id: OrderId,
    pub ask_order_id: OrderId,
}

impl Trade {
    pub fn new(
        trade_id: TradeId,
        executed_at: DateTime<Utc>,
        quantity: Quantity,
        price: Price,
        bid_order_id: OrderId,
        ask_order_id: OrderId,
    ) -> Self {
        Self {
            trade_id,
            executed_at,
            quantity,
            price,
            bid_order_id,
            ask_order_id,
        }
    }

    /// Calculate trade value (price × quantity); `None` when the product
    /// does not fit in a `Decimal`
    pub fn trade_value(&self) -> Option<Decimal> {
        self.price.as_decimal().checked_mul(Decimal::from(self.quantity.get()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_trade() -> Trade {
        Trade::new(
            TradeId::new(1),
            Utc.with_ymd_and_hms(2024, 2, 16, 12, 0, 0).unwrap(),
            Quantity::try_new(15).unwrap(),
            "190.40".parse().unwrap(),
            OrderId::new(10),
            OrderId::new(11),
        )
    }

    #[test]
    fn test_trade_value() {
        assert_eq!(sample_trade().trade_value(), Some(Decimal::new(285600, 2)));
    }

    #[test]
    fn test_trade_value_overflow() {
        let mut trade = sample_trade();
        trade.price = Price::from_u64(crate::numeric::MAX_PRICE_UNITS);
        trade.quantity = Quantity::try_new(u64::MAX).unwrap();
        assert_eq!(trade.trade_value(), None);
    }

    #[test]
    fn test_trade_serialization() {
        let trade = sample_trade();
        let json = serde_json::to_string(&trade).unwrap();
        let deserialized: Trade = serde_json::from_str(&json).unwrap();

        assert_eq!(trade, deserialized);
    }
}
