//! Matching engine core
//!
//! Owns the book and both id sequencers. Every operation runs to
//! completion before returning; callers that share an engine serialize
//! access around it. Executed trades are handed back to the caller, which
//! keeps the trade log.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use types::errors::EngineError;
use types::ids::{OrderId, TradeId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};
use types::trade::Trade;

use crate::book::{BookSnapshot, OrderBook};
use crate::events::MatchOutcome;
use crate::matching::drain::{self, DrainSummary};
use crate::matching::executor::{plan_match, MatchExecutor};
use crate::sequencer::Sequencer;
use crate::stats::BookStatistics;

/// Main matching engine
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    book: OrderBook,
    /// Order ids, shared by both sides
    order_ids: Sequencer,
    /// Trade executor with trade id generation
    executor: MatchExecutor,
}

impl MatchingEngine {
    /// Empty engine; the first order and the first trade both get id 1
    pub fn new() -> Self {
        Self {
            book: OrderBook::new(),
            order_ids: Sequencer::default(),
            executor: MatchExecutor::new(Sequencer::default()),
        }
    }

    /// Rebuild an engine from persisted state
    ///
    /// `orders` may hold both sides in any sequence. Order ids resume after
    /// the highest id seen on a resting order or referenced by a trade, and
    /// trade ids after the highest trade id.
    pub fn restore<'a>(
        orders: impl IntoIterator<Item = Order>,
        trades: impl IntoIterator<Item = &'a Trade>,
    ) -> Result<Self, EngineError> {
        let book = OrderBook::from_orders(orders)?;

        let mut max_trade_id: Option<u64> = None;
        let mut max_traded_order_id: Option<u64> = None;
        let mut trade_count = 0usize;
        for trade in trades {
            trade_count += 1;
            max_trade_id = max_trade_id.max(Some(trade.trade_id.value()));
            max_traded_order_id = max_traded_order_id
                .max(Some(trade.bid_order_id.value()))
                .max(Some(trade.ask_order_id.value()));
        }
        let max_order_id = book
            .bids()
            .orders()
            .chain(book.asks().orders())
            .map(|o| o.order_id.value())
            .max()
            .max(max_traded_order_id);

        info!(
            bids = book.bid_count(),
            asks = book.ask_count(),
            trades = trade_count,
            ?max_order_id,
            ?max_trade_id,
            "Restored order book"
        );

        Ok(Self {
            book,
            order_ids: Sequencer::resume_after(max_order_id)?,
            executor: MatchExecutor::new(Sequencer::resume_after(max_trade_id)?),
        })
    }

    /// Rest a new order on `side` under the next order id
    ///
    /// On failure the book is unchanged and no order id is consumed.
    pub fn submit(&mut self, side: Side, price: Price, quantity: Quantity) -> Result<Order, EngineError> {
        let order_ids_before = self.order_ids.clone();
        let order = Order::new(OrderId::new(self.order_ids.next_id()?), side, price, quantity);
        if let Err(e) = self.book.insert(order.clone()) {
            self.order_ids = order_ids_before;
            return Err(e);
        }
        debug!(
            order_id = %order.order_id,
            side = %side,
            price = %price,
            quantity = %quantity,
            "Order accepted"
        );
        Ok(order)
    }

    pub fn submit_buy(&mut self, price: Price, quantity: Quantity) -> Result<Order, EngineError> {
        self.submit(Side::Bid, price, quantity)
    }

    pub fn submit_sell(&mut self, price: Price, quantity: Quantity) -> Result<Order, EngineError> {
        self.submit(Side::Ask, price, quantity)
    }

    /// Match the best bid against the best ask once
    ///
    /// Fails with `NoMatchPossible` when a side is empty or the prices do
    /// not cross. On any failure the book is unchanged and no trade id is
    /// consumed.
    pub fn match_one(&mut self, executed_at: DateTime<Utc>) -> Result<MatchOutcome, EngineError> {
        let plan = plan_match(self.book.best_bid(), self.book.best_ask())
            .map_err(EngineError::NoMatchPossible)?;
        let mutations = plan.mutations();

        let executor_before = self.executor.clone();
        let trade = self.executor.execute_trade(&plan, executed_at)?;
        if let Err(e) = self.book.apply(&mutations) {
            self.executor = executor_before;
            return Err(e);
        }

        info!(
            trade_id = %trade.trade_id,
            bid = %trade.bid_order_id,
            ask = %trade.ask_order_id,
            price = %trade.price,
            quantity = %trade.quantity,
            "Trade executed"
        );
        Ok(MatchOutcome { trade, mutations })
    }

    /// Match repeatedly until a side empties or the best prices stop crossing
    ///
    /// `clock` supplies the execution time of each trade.
    pub fn match_all<C>(&mut self, mut clock: C) -> Result<DrainSummary, EngineError>
    where
        C: FnMut() -> DateTime<Utc>,
    {
        let summary = drain::drain(|| self.match_one(clock()).map(|outcome| outcome.trade))?;
        info!(
            trades = summary.trade_count(),
            stop = ?summary.stop,
            "Drain finished"
        );
        Ok(summary)
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn snapshot(&self) -> BookSnapshot {
        self.book.snapshot()
    }

    pub fn stats(&self) -> BookStatistics {
        BookStatistics::from_book(&self.book)
    }

    pub fn is_either_side_empty(&self) -> bool {
        self.book.is_either_side_empty()
    }

    /// Id the next accepted order will receive; `None` once ids run out
    pub fn next_order_id(&self) -> Option<OrderId> {
        self.order_ids.peek().map(OrderId::new)
    }

    /// Id the next executed trade will receive; `None` once ids run out
    pub fn next_trade_id(&self) -> Option<TradeId> {
        self.executor.next_trade_id()
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}
