//! Trade execution logic
//!
//! Planning is pure: given the best bid and best ask it decides whether
//! they cross, how much trades, at what price, and what happens to each
//! order. The executor then turns a plan into a sequenced `Trade`.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use types::errors::{EngineError, NoMatchReason};
use types::ids::TradeId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};
use types::trade::Trade;

use super::crossing;
use crate::events::BookMutation;
use crate::sequencer::Sequencer;

/// What a match does to one of the two orders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Fully consumed; leaves the book
    Full,
    /// Partially consumed; stays with `remaining`
    Partial { remaining: Quantity },
}

impl Fill {
    /// Fill of an order of size `original` after `traded` units execute
    fn after(original: Quantity, traded: Quantity) -> Self {
        match original.checked_sub(traded) {
            Some(remaining) => Fill::Partial { remaining },
            None => Fill::Full,
        }
    }
}

/// Decision for one bid/ask pair
#[derive(Debug, Clone, PartialEq)]
pub struct MatchPlan {
    pub bid: Order,
    pub ask: Order,
    /// Execution price: always the ask's price
    pub price: Price,
    /// `min(bid.quantity, ask.quantity)`
    pub quantity: Quantity,
    pub bid_fill: Fill,
    pub ask_fill: Fill,
}

impl MatchPlan {
    /// Book mutations that carry out this plan; the fully filled order(s)
    /// are removed first
    pub fn mutations(&self) -> Vec<BookMutation> {
        let mut removals = Vec::with_capacity(2);
        let mut reductions = Vec::with_capacity(1);
        for (order, fill) in [(&self.bid, self.bid_fill), (&self.ask, self.ask_fill)] {
            match fill {
                Fill::Full => removals.push(BookMutation::Remove { order: order.clone() }),
                Fill::Partial { remaining } => reductions.push(BookMutation::Reduce {
                    order: order.clone(),
                    remaining,
                }),
            }
        }
        removals.extend(reductions);
        removals
    }
}

/// Decide the match between the best bid and the best ask
///
/// Fails with `SideEmpty` when either is missing and `NoCross` when the
/// bid is priced below the ask.
pub fn plan_match(best_bid: Option<&Order>, best_ask: Option<&Order>) -> Result<MatchPlan, NoMatchReason> {
    let bid = best_bid.ok_or(NoMatchReason::SideEmpty(Side::Bid))?;
    let ask = best_ask.ok_or(NoMatchReason::SideEmpty(Side::Ask))?;

    if !crossing::can_match(bid.price, ask.price) {
        return Err(NoMatchReason::NoCross {
            bid: bid.price,
            ask: ask.price,
        });
    }

    let (quantity, bid_fill, ask_fill) = match bid.quantity.cmp(&ask.quantity) {
        Ordering::Equal => (bid.quantity, Fill::Full, Fill::Full),
        Ordering::Greater => (ask.quantity, Fill::after(bid.quantity, ask.quantity), Fill::Full),
        Ordering::Less => (bid.quantity, Fill::Full, Fill::after(ask.quantity, bid.quantity)),
    };

    Ok(MatchPlan {
        bid: bid.clone(),
        ask: ask.clone(),
        price: ask.price,
        quantity,
        bid_fill,
        ask_fill,
    })
}

/// Match executor for handling trade generation
#[derive(Debug, Clone)]
pub struct MatchExecutor {
    trade_ids: Sequencer,
}

impl MatchExecutor {
    /// Create a new match executor with its trade id sequencer
    pub fn new(trade_ids: Sequencer) -> Self {
        Self { trade_ids }
    }

    /// Id the next executed trade will receive; `None` once ids run out
    pub fn next_trade_id(&self) -> Option<TradeId> {
        self.trade_ids.peek().map(TradeId::new)
    }

    /// Execute a planned match, assigning the next trade id
    pub fn execute_trade(&mut self, plan: &MatchPlan, executed_at: DateTime<Utc>) -> Result<Trade, EngineError> {
        Ok(Trade::new(
            TradeId::new(self.trade_ids.next_id()?),
            executed_at,
            plan.quantity,
            plan.price,
            plan.bid.order_id,
            plan.ask.order_id,
        ))
    }
}
