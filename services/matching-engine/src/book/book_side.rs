//! One side of the order book
//!
//! Price levels are kept in a BTreeMap for deterministic iteration. Bids
//! rank from the highest price down, asks from the lowest price up; within
//! a level orders rank by arrival. An `OrderId → Price` index makes removal
//! by id a map lookup plus a scan of a single level.

use std::collections::{BTreeMap, HashMap};
use types::errors::{EngineError, OrderError};
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use super::price_level::PriceLevel;

/// Ranked resting orders of one side
#[derive(Debug, Clone)]
pub struct BookSide {
    side: Side,
    levels: BTreeMap<Price, PriceLevel>,
    index: HashMap<OrderId, Price>,
}

impl BookSide {
    /// Create a new empty side
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
            index: HashMap::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Insert an order behind every resting order at its price
    ///
    /// Fails if an order with the same id already rests on this side.
    pub fn insert(&mut self, order: Order) -> Result<(), EngineError> {
        if self.index.contains_key(&order.order_id) {
            return Err(EngineError::DuplicateOrder {
                side: self.side,
                order_id: order.order_id,
            });
        }
        self.index.insert(order.order_id, order.price);
        self.levels.entry(order.price).or_default().push_back(order);
        Ok(())
    }

    /// Best-ranked order, if any
    pub fn best(&self) -> Option<&Order> {
        let level = match self.side {
            // BTreeMap iter is ascending, so the best bid is at the back
            Side::Bid => self.levels.values().next_back(),
            Side::Ask => self.levels.values().next(),
        };
        level.and_then(PriceLevel::front)
    }

    /// Look up a resting order by id
    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        let price = self.index.get(order_id)?;
        self.levels.get(price)?.get(order_id)
    }

    /// Check that `order` is resting here exactly as given
    pub fn check_resting(&self, order: &Order) -> Result<(), EngineError> {
        match self.get(&order.order_id) {
            Some(resting) if resting == order => Ok(()),
            _ => Err(EngineError::OrderNotFound {
                side: self.side,
                order_id: order.order_id,
            }),
        }
    }

    /// Remove the resting order equal to `order`
    ///
    /// The order is located by id; a resting value that differs from the
    /// argument (stale price or quantity) counts as not found.
    pub fn remove(&mut self, order: &Order) -> Result<Order, EngineError> {
        self.check_resting(order)?;

        let (side, order_id) = (self.side, order.order_id);
        let not_found = || EngineError::OrderNotFound { side, order_id };
        let level = self.levels.get_mut(&order.price).ok_or_else(not_found)?;
        let removed = level.remove(&order.order_id).ok_or_else(not_found)?;
        // Remove empty price levels to keep book clean
        if level.is_empty() {
            self.levels.remove(&order.price);
        }
        self.index.remove(&order.order_id);
        Ok(removed)
    }

    /// Check that `order` can be reduced to `new_quantity`
    pub fn check_reduction(&self, order: &Order, new_quantity: Quantity) -> Result<(), EngineError> {
        self.check_resting(order)?;
        if new_quantity >= order.quantity {
            return Err(OrderError::InvalidQuantity(format!(
                "{} is not below the resting quantity {} of order {}",
                new_quantity, order.quantity, order.order_id
            ))
            .into());
        }
        Ok(())
    }

    /// Replace `order` with a copy carrying `new_quantity`
    ///
    /// Id and price are unchanged and the order keeps its place in the
    /// queue. Returns the new value.
    pub fn replace_with_reduced_quantity(
        &mut self,
        order: &Order,
        new_quantity: Quantity,
    ) -> Result<Order, EngineError> {
        self.check_reduction(order, new_quantity)?;

        let reduced = order.with_quantity(new_quantity);
        self.levels
            .get_mut(&order.price)
            .and_then(|level| level.replace(reduced.clone()))
            .ok_or(EngineError::OrderNotFound {
                side: self.side,
                order_id: order.order_id,
            })?;
        Ok(reduced)
    }

    /// Price levels in rank order, best first
    pub fn levels(&self) -> Box<dyn Iterator<Item = (&Price, &PriceLevel)> + '_> {
        match self.side {
            Side::Bid => Box::new(self.levels.iter().rev()),
            Side::Ask => Box::new(self.levels.iter()),
        }
    }

    /// Orders in rank order, best first
    pub fn orders(&self) -> impl Iterator<Item = &Order> + '_ {
        self.levels().flat_map(|(_, level)| level.iter())
    }

    /// Get depth snapshot (top N price levels)
    pub fn depth(&self, depth: usize) -> Vec<(Price, u128)> {
        self.levels()
            .take(depth)
            .map(|(price, level)| (*price, level.total_quantity()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn total_quantity(&self) -> u128 {
        self.levels.values().map(PriceLevel::total_quantity).sum()
    }
}
