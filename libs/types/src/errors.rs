//! Error types for the order book
//!
//! Comprehensive error taxonomy using thiserror

use crate::ids::{OrderId, TradeId};
use crate::numeric::Price;
use crate::order::Side;
use thiserror::Error;

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Recoverable: the book has nothing to match right now
    #[error("No match possible: {0}")]
    NoMatchPossible(NoMatchReason),

    /// Remove/replace target is not resting on its side. Always a bug in
    /// the caller or the engine, never swallowed.
    #[error("Order not found: {side} order {order_id}")]
    OrderNotFound { side: Side, order_id: OrderId },

    #[error("Duplicate order: {side} order {order_id} is already resting")]
    DuplicateOrder { side: Side, order_id: OrderId },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Trade error: {0}")]
    Trade(#[from] TradeError),

    #[error("System error: {message}")]
    System { message: String },
}

impl EngineError {
    /// True for the no-match condition that a drain treats as a normal stop
    pub fn is_no_match(&self) -> bool {
        matches!(self, EngineError::NoMatchPossible(_))
    }
}

/// Why a match attempt did not produce a trade
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoMatchReason {
    #[error("no {0} orders in the book")]
    SideEmpty(Side),

    #[error("best bid {bid} is below best ask {ask}")]
    NoCross { bid: Price, ask: Price },
}

/// Order-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrderError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
}

/// Trade-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradeError {
    #[error("Trade not found: {trade_id}")]
    NotFound { trade_id: TradeId },
}

/// Failures of the order/trade store collaborators
///
/// Propagated to the caller unchanged; the engine never retries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("{path}: {reason}")]
    Unavailable { path: String, reason: String },

    #[error("{path}:{line}: corrupt record: {reason}")]
    Corrupt { path: String, line: usize, reason: String },
}
