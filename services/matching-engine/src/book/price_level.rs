//! Price level implementation with FIFO queue
//!
//! A price level contains all resting orders at one price point, in
//! arrival order. Equal-price orders therefore match first-in-first-out.

use std::collections::VecDeque;
use types::ids::OrderId;
use types::order::Order;

/// A price level containing orders at a specific price
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Queue of orders at this price level (FIFO order)
    orders: VecDeque<Order>,
    /// Total quantity available at this level; wide enough that no
    /// number of `u64` quantities can overflow it
    total_quantity: u128,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self {
            orders: VecDeque::new(),
            total_quantity: 0,
        }
    }

    /// Insert an order at the back of the queue (time priority)
    pub fn push_back(&mut self, order: Order) {
        self.total_quantity += u128::from(order.quantity.get());
        self.orders.push_back(order);
    }

    /// Look up an order by id
    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.order_id == order_id)
    }

    /// Remove an order from the queue by OrderId
    pub fn remove(&mut self, order_id: &OrderId) -> Option<Order> {
        let position = self.orders.iter().position(|o| &o.order_id == order_id)?;
        let order = self.orders.remove(position)?;
        self.total_quantity -= u128::from(order.quantity.get());
        Some(order)
    }

    /// Swap the order with the same id for `order`, keeping its place in
    /// the queue. Returns the previous value.
    pub fn replace(&mut self, order: Order) -> Option<Order> {
        let slot = self.orders.iter_mut().find(|o| o.order_id == order.order_id)?;
        let previous = std::mem::replace(slot, order);
        self.total_quantity =
            self.total_quantity - u128::from(previous.quantity.get()) + u128::from(slot.quantity.get());
        Some(previous)
    }

    /// Peek at the front order without removing it
    pub fn front(&self) -> Option<&Order> {
        self.orders.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// Check if the price level is empty
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Get the total quantity at this price level
    pub fn total_quantity(&self) -> u128 {
        self.total_quantity
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

impl Default for PriceLevel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::numeric::Quantity;

    fn bid(id: u64, qty: u64) -> Order {
        Order::bid(OrderId::new(id), "100".parse().unwrap(), Quantity::try_new(qty).unwrap())
    }

    #[test]
    fn test_price_level_fifo_order() {
        let mut level = PriceLevel::new();
        level.push_back(bid(1, 10));
        level.push_back(bid(2, 20));
        level.push_back(bid(3, 30));

        assert_eq!(level.front().map(|o| o.order_id), Some(OrderId::new(1)));
        assert_eq!(level.order_count(), 3);
        assert_eq!(level.total_quantity(), 60);
    }

    #[test]
    fn test_price_level_remove() {
        let mut level = PriceLevel::new();
        level.push_back(bid(1, 10));
        level.push_back(bid(2, 20));

        let removed = level.remove(&OrderId::new(1));
        assert_eq!(removed, Some(bid(1, 10)));
        assert_eq!(level.total_quantity(), 20);
        assert!(level.remove(&OrderId::new(1)).is_none());
    }

    #[test]
    fn test_price_level_replace_keeps_position() {
        let mut level = PriceLevel::new();
        level.push_back(bid(1, 10));
        level.push_back(bid(2, 20));

        let previous = level.replace(bid(1, 4));
        assert_eq!(previous, Some(bid(1, 10)));
        assert_eq!(level.front(), Some(&bid(1, 4)));
        assert_eq!(level.total_quantity(), 24);
        assert!(level.replace(bid(9, 1)).is_none());
    }

    #[test]
    fn test_price_level_total_exceeds_u64() {
        let mut level = PriceLevel::new();
        level.push_back(bid(1, u64::MAX));
        level.push_back(bid(2, 1));

        assert_eq!(level.total_quantity(), u128::from(u64::MAX) + 1);
        level.replace(bid(1, u64::MAX - 1));
        assert_eq!(level.total_quantity(), u128::from(u64::MAX));
        level.remove(&OrderId::new(2));
        assert_eq!(level.total_quantity(), u128::from(u64::MAX - 1));
    }
}
