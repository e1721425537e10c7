//! Drain loop
//!
//! Repeats a single match until it stops producing trades. Each successful
//! match removes at least one order, so a book with n bids and m asks
//! drains in at most n + m matches.

use types::errors::{EngineError, NoMatchReason};
use types::trade::Trade;

/// Why a drain stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainStop {
    /// One side of the book ran out of orders
    SideEmpty,
    /// Both sides still hold orders but the best bid is below the best ask
    NoCross,
}

/// Trades produced by a drain and the reason it ended
#[derive(Debug, Clone, PartialEq)]
pub struct DrainSummary {
    pub trades: Vec<Trade>,
    pub stop: DrainStop,
}

impl DrainSummary {
    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }
}

/// Call `match_one` until it reports that no match is possible
///
/// `NoMatchPossible` ends the drain normally; any other error is returned
/// and the trades completed before it stay applied.
pub fn drain<F>(mut match_one: F) -> Result<DrainSummary, EngineError>
where
    F: FnMut() -> Result<Trade, EngineError>,
{
    let mut trades = Vec::new();
    loop {
        match match_one() {
            Ok(trade) => trades.push(trade),
            Err(EngineError::NoMatchPossible(reason)) => {
                let stop = match reason {
                    NoMatchReason::SideEmpty(_) => DrainStop::SideEmpty,
                    NoMatchReason::NoCross { .. } => DrainStop::NoCross,
                };
                return Ok(DrainSummary { trades, stop });
            }
            Err(e) => return Err(e),
        }
    }
}
