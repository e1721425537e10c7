//! Shared order book service
//!
//! One mutex around the whole service: each call holds the lock for its
//! full duration, so other callers never see a half-applied match.

use std::sync::{Arc, Mutex};
use persistence::{OrderStore, TradeStore};
use types::errors::EngineError;
use types::ids::TradeId;
use types::numeric::{Price, Quantity};
use types::order::Order;
use types::trade::Trade;

use crate::book::BookSnapshot;
use crate::service::OrderBookService;
use crate::stats::BookStatistics;

/// Cloneable handle to a service shared between threads
pub struct SharedOrderBookService<B, A, T> {
    inner: Arc<Mutex<OrderBookService<B, A, T>>>,
}

impl<B, A, T> Clone for SharedOrderBookService<B, A, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B, A, T> SharedOrderBookService<B, A, T>
where
    B: OrderStore,
    A: OrderStore,
    T: TradeStore,
{
    pub fn new(service: OrderBookService<B, A, T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    /// Run `f` with exclusive access to the service
    pub fn with<R>(
        &self,
        f: impl FnOnce(&mut OrderBookService<B, A, T>) -> Result<R, EngineError>,
    ) -> Result<R, EngineError> {
        let mut guard = self.inner.lock().map_err(|_| EngineError::System {
            message: "order book lock poisoned".to_string(),
        })?;
        f(&mut guard)
    }

    pub fn submit_buy(&self, price: Price, quantity: Quantity) -> Result<Order, EngineError> {
        self.with(|svc| svc.submit_buy(price, quantity))
    }

    pub fn submit_sell(&self, price: Price, quantity: Quantity) -> Result<Order, EngineError> {
        self.with(|svc| svc.submit_sell(price, quantity))
    }

    pub fn match_one(&self) -> Result<Trade, EngineError> {
        self.with(|svc| svc.match_one())
    }

    pub fn match_all(&self) -> Result<usize, EngineError> {
        self.with(|svc| svc.match_all())
    }

    pub fn snapshot(&self) -> Result<BookSnapshot, EngineError> {
        self.with(|svc| Ok(svc.snapshot()))
    }

    pub fn stats(&self) -> Result<BookStatistics, EngineError> {
        self.with(|svc| Ok(svc.stats()))
    }

    pub fn get_trade(&self, trade_id: TradeId) -> Result<Trade, EngineError> {
        self.with(|svc| svc.get_trade(trade_id))
    }

    pub fn get_trades(&self) -> Result<Vec<Trade>, EngineError> {
        self.with(|svc| svc.get_trades())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persistence::{MemoryOrderStore, MemoryTradeStore};
    use std::thread;

    #[test]
    fn test_poisoned_lock_maps_to_system_error() {
        let service =
            OrderBookService::open(MemoryOrderStore::new(), MemoryOrderStore::new(), MemoryTradeStore::new())
                .unwrap();
        let shared = SharedOrderBookService::new(service);

        let poisoner = shared.clone();
        let _ = thread::spawn(move || {
            let _ = poisoner.with(|_| -> Result<(), EngineError> { panic!("poison") });
        })
        .join();

        let err = shared.stats().unwrap_err();
        assert!(matches!(err, EngineError::System { .. }));
    }
}
