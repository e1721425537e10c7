//! Order book service
//!
//! The engine bound to its stores. Every mutation is written through: an
//! accepted order rewrites its side, a trade rewrites both sides and is
//! appended to the trade log. When a write fails the engine is put back to
//! its state before the call, the touched sides are re-saved best-effort,
//! and the store error propagates unchanged.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use persistence::{OrderStore, TradeStore};
use types::errors::{EngineError, TradeError};
use types::ids::TradeId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};
use types::trade::Trade;

use crate::book::BookSnapshot;
use crate::engine::MatchingEngine;
use crate::matching::drain::DrainSummary;
use crate::stats::BookStatistics;

/// Source of trade execution times
pub type Clock = fn() -> DateTime<Utc>;

pub struct OrderBookService<B, A, T> {
    engine: MatchingEngine,
    bid_store: B,
    ask_store: A,
    trade_store: T,
    clock: Clock,
}

impl<B, A, T> OrderBookService<B, A, T>
where
    B: OrderStore,
    A: OrderStore,
    T: TradeStore,
{
    /// Load both sides and the trade log, re-rank, and reseed the id
    /// sequencers
    pub fn open(bid_store: B, ask_store: A, trade_store: T) -> Result<Self, EngineError> {
        let bids = bid_store.load_all()?;
        let asks = ask_store.load_all()?;
        let trades = trade_store.load_all()?;
        check_side(&bids, Side::Bid)?;
        check_side(&asks, Side::Ask)?;

        let engine = MatchingEngine::restore(bids.into_iter().chain(asks), trades.values())?;
        Ok(Self {
            engine,
            bid_store,
            ask_store,
            trade_store,
            clock: Utc::now,
        })
    }

    /// Replace the wall clock used to stamp trades
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn submit_buy(&mut self, price: Price, quantity: Quantity) -> Result<Order, EngineError> {
        self.submit(Side::Bid, price, quantity)
    }

    pub fn submit_sell(&mut self, price: Price, quantity: Quantity) -> Result<Order, EngineError> {
        self.submit(Side::Ask, price, quantity)
    }

    fn submit(&mut self, side: Side, price: Price, quantity: Quantity) -> Result<Order, EngineError> {
        let checkpoint = self.engine.clone();
        let order = self.engine.submit(side, price, quantity)?;
        if let Err(e) = self.persist_side(side) {
            self.rollback(checkpoint, &[side]);
            return Err(e);
        }
        Ok(order)
    }

    /// Match the best bid against the best ask once and persist the result
    ///
    /// If any write fails the match is undone: the book, both stored sides
    /// and the trade id sequence are as they were before the call.
    pub fn match_one(&mut self) -> Result<Trade, EngineError> {
        let checkpoint = self.engine.clone();
        let outcome = self.engine.match_one((self.clock)())?;
        if let Err(e) = self.persist_match(&outcome.trade) {
            self.rollback(checkpoint, &[Side::Bid, Side::Ask]);
            return Err(e);
        }
        Ok(outcome.trade)
    }

    fn persist_match(&mut self, trade: &Trade) -> Result<(), EngineError> {
        self.persist_side(Side::Bid)?;
        self.persist_side(Side::Ask)?;
        self.trade_store.append(trade)?;
        Ok(())
    }

    /// Drain the book; returns the number of trades executed
    pub fn match_all(&mut self) -> Result<usize, EngineError> {
        Ok(self.drain()?.trade_count())
    }

    /// Drain the book, keeping the trades and the reason it stopped
    pub fn drain(&mut self) -> Result<DrainSummary, EngineError> {
        let summary = crate::matching::drain::drain(|| self.match_one())?;
        info!(
            trades = summary.trade_count(),
            stop = ?summary.stop,
            "Drain finished"
        );
        Ok(summary)
    }

    pub fn snapshot(&self) -> BookSnapshot {
        self.engine.snapshot()
    }

    pub fn stats(&self) -> BookStatistics {
        self.engine.stats()
    }

    /// Fetch a trade from the trade log
    pub fn get_trade(&self, trade_id: TradeId) -> Result<Trade, EngineError> {
        self.trade_store
            .get(trade_id)?
            .ok_or(EngineError::Trade(TradeError::NotFound { trade_id }))
    }

    /// Every trade in the log, ascending by id
    pub fn get_trades(&self) -> Result<Vec<Trade>, EngineError> {
        Ok(self.trade_store.load_all()?.into_values().collect())
    }

    pub fn is_either_side_empty(&self) -> bool {
        self.engine.is_either_side_empty()
    }

    pub fn bid_count(&self) -> usize {
        self.engine.book().bid_count()
    }

    pub fn ask_count(&self) -> usize {
        self.engine.book().ask_count()
    }

    /// Add `amount` synthetic bids and `amount` synthetic asks
    ///
    /// `generator` is asked for a price and quantity per order. Each side is
    /// written to its store once, after all of its orders are accepted. On
    /// failure none of the generated orders are kept.
    pub fn generate_orders<G>(&mut self, amount: usize, mut generator: G) -> Result<(), EngineError>
    where
        G: FnMut(Side) -> (Price, Quantity),
    {
        if amount == 0 {
            return Ok(());
        }
        let checkpoint = self.engine.clone();
        for side in [Side::Bid, Side::Ask] {
            if let Err(e) = self.generate_side(side, amount, &mut generator) {
                self.rollback(checkpoint, &[Side::Bid, Side::Ask]);
                return Err(e);
            }
        }
        info!(amount, bids = self.bid_count(), asks = self.ask_count(), "Generated orders");
        Ok(())
    }

    pub fn engine(&self) -> &MatchingEngine {
        &self.engine
    }

    /// Give back the stores, dropping the in-memory book
    pub fn into_stores(self) -> (B, A, T) {
        (self.bid_store, self.ask_store, self.trade_store)
    }

    fn generate_side<G>(&mut self, side: Side, amount: usize, generator: &mut G) -> Result<(), EngineError>
    where
        G: FnMut(Side) -> (Price, Quantity),
    {
        for _ in 0..amount {
            let (price, quantity) = generator(side);
            self.engine.submit(side, price, quantity)?;
        }
        self.persist_side(side)
    }

    /// Put the engine back to `checkpoint` and re-save `sides` from it
    ///
    /// Re-save failures are logged only; the caller reports the original
    /// error.
    fn rollback(&mut self, checkpoint: MatchingEngine, sides: &[Side]) {
        self.engine = checkpoint;
        for &side in sides {
            if let Err(e) = self.persist_side(side) {
                warn!(side = %side, error = %e, "Could not re-save book side after rollback");
            }
        }
    }

    fn persist_side(&mut self, side: Side) -> Result<(), EngineError> {
        let orders: Vec<Order> = self.engine.book().side(side).orders().cloned().collect();
        debug!(side = %side, orders = orders.len(), "Persisting book side");
        match side {
            Side::Bid => self.bid_store.save_all(&orders)?,
            Side::Ask => self.ask_store.save_all(&orders)?,
        }
        Ok(())
    }
}

/// A store must only hold orders of its own side
fn check_side(orders: &[Order], side: Side) -> Result<(), EngineError> {
    match orders.iter().find(|o| o.side != side) {
        Some(order) => Err(EngineError::System {
            message: format!("{} store holds {} order {}", side, order.side, order.order_id),
        }),
        None => Ok(()),
    }
}
