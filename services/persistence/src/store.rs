//! Store contracts consumed by the order book service
//!
//! One `OrderStore` per book side and one `TradeStore` for the trade log.
//! Order stores are loaded and rewritten wholesale, so every book mutation
//! costs O(n) at this boundary.

use std::collections::BTreeMap;
use types::errors::StoreError;
use types::ids::TradeId;
use types::order::Order;
use types::trade::Trade;

/// Persistent collection of the resting orders of one side.
///
/// `load_all` may return orders in any sequence; callers re-rank.
pub trait OrderStore {
    fn load_all(&self) -> Result<Vec<Order>, StoreError>;

    /// Replace the stored side with `orders`.
    fn save_all(&mut self, orders: &[Order]) -> Result<(), StoreError>;
}

/// Append-only trade log.
pub trait TradeStore {
    fn append(&mut self, trade: &Trade) -> Result<(), StoreError>;

    fn load_all(&self) -> Result<BTreeMap<TradeId, Trade>, StoreError>;

    fn get(&self, trade_id: TradeId) -> Result<Option<Trade>, StoreError> {
        Ok(self.load_all()?.remove(&trade_id))
    }
}
