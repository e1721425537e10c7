//! In-memory stores for tests and ephemeral books

use crate::store::{OrderStore, TradeStore};
use std::collections::BTreeMap;
use types::errors::StoreError;
use types::ids::TradeId;
use types::order::Order;
use types::trade::Trade;

/// Order store backed by a `Vec`. Counts saves so tests can assert on
/// the number of wholesale rewrites.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderStore {
    orders: Vec<Order>,
    saves: usize,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store; `orders` may be in any sequence.
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self { orders, saves: 0 }
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }
}

impl OrderStore for MemoryOrderStore {
    fn load_all(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.orders.clone())
    }

    fn save_all(&mut self, orders: &[Order]) -> Result<(), StoreError> {
        self.orders = orders.to_vec();
        self.saves += 1;
        Ok(())
    }
}

/// Trade log backed by a `BTreeMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryTradeStore {
    trades: BTreeMap<TradeId, Trade>,
}

impl MemoryTradeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trades(trades: Vec<Trade>) -> Self {
        Self {
            trades: trades.into_iter().map(|t| (t.trade_id, t)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

impl TradeStore for MemoryTradeStore {
    fn append(&mut self, trade: &Trade) -> Result<(), StoreError> {
        self.trades.insert(trade.trade_id, trade.clone());
        Ok(())
    }

    fn load_all(&self) -> Result<BTreeMap<TradeId, Trade>, StoreError> {
        Ok(self.trades.clone())
    }
}
