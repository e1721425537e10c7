//! Order book infrastructure module
//!
//! Contains price levels, the per-side ranked container, and the two-sided
//! `OrderBook` that routes every operation to the side named by the order.

pub mod price_level;
pub mod book_side;

pub use book_side::BookSide;
pub use price_level::PriceLevel;

use serde::{Deserialize, Serialize};
use types::errors::EngineError;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use crate::events::BookMutation;

/// Order book for the single instrument
#[derive(Debug, Clone)]
pub struct OrderBook {
    bids: BookSide,
    asks: BookSide,
}

/// Both sides of the book in rank order, best first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub bids: Vec<Order>,
    pub asks: Vec<Order>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self {
            bids: BookSide::new(Side::Bid),
            asks: BookSide::new(Side::Ask),
        }
    }

    /// Rebuild a book from orders in arbitrary sequence
    ///
    /// Equal-price orders rank in the sequence given.
    pub fn from_orders(orders: impl IntoIterator<Item = Order>) -> Result<Self, EngineError> {
        let mut book = Self::new();
        for order in orders {
            book.insert(order)?;
        }
        Ok(book)
    }

    pub fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    pub fn bids(&self) -> &BookSide {
        &self.bids
    }

    pub fn asks(&self) -> &BookSide {
        &self.asks
    }

    /// Add an order to the side it names
    pub fn insert(&mut self, order: Order) -> Result<(), EngineError> {
        self.side_mut(order.side).insert(order)
    }

    /// Highest-priced bid
    pub fn best_bid(&self) -> Option<&Order> {
        self.bids.best()
    }

    /// Lowest-priced ask
    pub fn best_ask(&self) -> Option<&Order> {
        self.asks.best()
    }

    /// Remove the resting order equal to `order`; `OrderNotFound` otherwise
    pub fn remove(&mut self, order: &Order) -> Result<Order, EngineError> {
        self.side_mut(order.side).remove(order)
    }

    pub fn replace_with_reduced_quantity(
        &mut self,
        order: &Order,
        new_quantity: Quantity,
    ) -> Result<Order, EngineError> {
        self.side_mut(order.side)
            .replace_with_reduced_quantity(order, new_quantity)
    }

    /// Apply a match's mutations as one unit
    ///
    /// Every mutation is validated before any is applied, so on error the
    /// book is unchanged.
    pub fn apply(&mut self, mutations: &[BookMutation]) -> Result<(), EngineError> {
        for mutation in mutations {
            let side = self.side(mutation.side());
            match mutation {
                BookMutation::Remove { order } => side.check_resting(order)?,
                BookMutation::Reduce { order, remaining } => {
                    side.check_reduction(order, *remaining)?
                }
            }
        }

        for mutation in mutations {
            match mutation {
                BookMutation::Remove { order } => {
                    self.remove(order)?;
                }
                BookMutation::Reduce { order, remaining } => {
                    self.replace_with_reduced_quantity(order, *remaining)?;
                }
            }
        }
        Ok(())
    }

    pub fn is_either_side_empty(&self) -> bool {
        self.bids.is_empty() || self.asks.is_empty()
    }

    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }

    pub fn ask_count(&self) -> usize {
        self.asks.len()
    }

    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            bids: self.bids.orders().cloned().collect(),
            asks: self.asks.orders().cloned().collect(),
        }
    }

    /// Aggregated top-of-book levels for both sides
    pub fn depth(&self, depth: usize) -> (Vec<(Price, u128)>, Vec<(Price, u128)>) {
        (self.bids.depth(depth), self.asks.depth(depth))
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
