//! Event structures for matching engine
//!
//! A successful match emits one trade and the book mutations that went
//! with it.

use serde::{Deserialize, Serialize};
use types::numeric::Quantity;
use types::order::{Order, Side};
use types::trade::Trade;

/// Change applied to one resting order by a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookMutation {
    /// Fully filled: the order leaves the book
    Remove { order: Order },
    /// Partially filled: the order stays with `remaining` (same id and price)
    Reduce { order: Order, remaining: Quantity },
}

impl BookMutation {
    /// The resting order as it was before the match
    pub fn order(&self) -> &Order {
        match self {
            BookMutation::Remove { order } | BookMutation::Reduce { order, .. } => order,
        }
    }

    pub fn side(&self) -> Side {
        self.order().side
    }
}

/// Result of one successful match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub trade: Trade,
    pub mutations: Vec<BookMutation>,
}

impl MatchOutcome {
    /// The order that survived the match with reduced quantity, if any
    pub fn survivor(&self) -> Option<Order> {
        self.mutations.iter().find_map(|m| match m {
            BookMutation::Reduce { order, remaining } => Some(order.with_quantity(*remaining)),
            BookMutation::Remove { .. } => None,
        })
    }
}
