//! Book statistics
//!
//! Count, volume and average-price aggregates derived from a snapshot of
//! the book. Pure: computing statistics never touches the book.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use types::order::Order;

use crate::book::{BookSnapshot, OrderBook};

/// Digits kept after the decimal point in average prices (round half up)
pub const AVERAGE_PRICE_DP: u32 = 5;

/// Aggregates over both sides of the book
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookStatistics {
    pub bid_count: usize,
    pub ask_count: usize,
    pub bid_total_quantity: u128,
    pub ask_total_quantity: u128,
    /// Zero when there are no bids
    pub bid_average_price: Decimal,
    /// Zero when there are no asks
    pub ask_average_price: Decimal,
}

impl BookStatistics {
    pub fn from_snapshot(snapshot: &BookSnapshot) -> Self {
        let (bid_count, bid_total_quantity, bid_average_price) = side_totals(&snapshot.bids);
        let (ask_count, ask_total_quantity, ask_average_price) = side_totals(&snapshot.asks);
        Self {
            bid_count,
            ask_count,
            bid_total_quantity,
            ask_total_quantity,
            bid_average_price,
            ask_average_price,
        }
    }

    pub fn from_book(book: &OrderBook) -> Self {
        Self::from_snapshot(&book.snapshot())
    }
}

/// Unweighted mean of the order prices, as in `sum(price) / count`
fn average_price(orders: &[Order]) -> Decimal {
    if orders.is_empty() {
        return Decimal::ZERO;
    }
    let count = Decimal::from(orders.len());
    let mean = match orders
        .iter()
        .try_fold(Decimal::ZERO, |acc, o| acc.checked_add(o.price.as_decimal()))
    {
        Some(sum) => sum / count,
        // Each term is at most the largest price, so this cannot overflow
        None => orders
            .iter()
            .fold(Decimal::ZERO, |acc, o| acc + o.price.as_decimal() / count),
    };
    mean.round_dp_with_strategy(AVERAGE_PRICE_DP, RoundingStrategy::MidpointAwayFromZero)
}

fn side_totals(orders: &[Order]) -> (usize, u128, Decimal) {
    let total_quantity = orders.iter().map(|o| u128::from(o.quantity.get())).sum();
    (orders.len(), total_quantity, average_price(orders))
}
