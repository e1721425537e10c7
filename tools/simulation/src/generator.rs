//! Synthetic order generator
//!
//! Produces demo liquidity around a base price with a deterministic seeded
//! RNG, so a given seed always yields the same book.

use matching_engine::OrderBookService;
use persistence::{OrderStore, TradeStore};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use types::errors::{EngineError, OrderError};
use types::numeric::{Price, Quantity};
use types::order::Side;

/// Shape of the generated orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Lowest generated price
    pub base_price: Decimal,
    /// Prices fall in `[base_price, base_price + price_spread)`
    pub price_spread: Decimal,
    /// Smallest generated quantity
    pub min_quantity: u64,
    /// Exclusive upper bound on generated quantities
    pub max_quantity: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_price: Decimal::from(190),
            price_spread: Decimal::ONE,
            min_quantity: 20,
            max_quantity: 50,
        }
    }
}

/// Seeded generator of `(price, quantity)` pairs.
pub struct OrderGenerator {
    base_price: Price,
    /// Spread in hundredths; prices are generated at 2 dp
    spread_cents: u64,
    min_quantity: Quantity,
    max_quantity: u64,
    pub orders_generated: usize,
    rng: ChaCha8Rng,
}

impl OrderGenerator {
    /// Create a generator with a deterministic seed.
    pub fn new(config: &GeneratorConfig, seed: u64) -> Result<Self, OrderError> {
        let base_price = Price::try_new(config.base_price.round_dp(2))?;
        let spread_cents = (config.price_spread * Decimal::ONE_HUNDRED)
            .trunc()
            .to_u64()
            .ok_or_else(|| OrderError::InvalidPrice(format!("spread {}", config.price_spread)))?;
        let min_quantity = Quantity::try_new(config.min_quantity)?;
        if config.max_quantity <= config.min_quantity {
            return Err(OrderError::InvalidQuantity(format!(
                "max quantity {} must exceed min quantity {}",
                config.max_quantity, config.min_quantity
            )));
        }

        Ok(Self {
            base_price,
            spread_cents,
            min_quantity,
            max_quantity: config.max_quantity,
            orders_generated: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Generate the price and quantity of one order.
    ///
    /// The side does not change the distribution; both sides share one
    /// price band, so a generated book usually crosses.
    pub fn generate(&mut self, _side: Side) -> (Price, Quantity) {
        let offset = if self.spread_cents == 0 {
            0
        } else {
            self.rng.gen_range(0..self.spread_cents)
        };
        let price = Price::try_new(self.base_price.as_decimal() + Decimal::new(offset as i64, 2))
            .unwrap_or(self.base_price);

        let quantity = Quantity::try_new(self.rng.gen_range(self.min_quantity.get()..self.max_quantity))
            .unwrap_or(self.min_quantity);

        self.orders_generated += 1;
        (price, quantity)
    }
}

/// Fill the book until the thinner side holds `target_depth` orders.
///
/// Adds `target_depth - min(bids, asks)` orders to each side and returns
/// that number; nothing is added when both sides are already deep enough.
pub fn top_up<B, A, T>(
    service: &mut OrderBookService<B, A, T>,
    target_depth: usize,
    generator: &mut OrderGenerator,
) -> Result<usize, EngineError>
where
    B: OrderStore,
    A: OrderStore,
    T: TradeStore,
{
    let amount = target_depth.saturating_sub(service.bid_count().min(service.ask_count()));
    service.generate_orders(amount, |side| generator.generate(side))?;
    info!(amount, target_depth, "Book topped up");
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use persistence::{MemoryOrderStore, MemoryTradeStore};
    use proptest::prelude::*;

    fn service() -> OrderBookService<MemoryOrderStore, MemoryOrderStore, MemoryTradeStore> {
        OrderBookService::open(MemoryOrderStore::new(), MemoryOrderStore::new(), MemoryTradeStore::new())
            .unwrap()
    }

    #[test]
    fn test_same_seed_same_orders() {
        let config = GeneratorConfig::default();
        let mut a = OrderGenerator::new(&config, 42).unwrap();
        let mut b = OrderGenerator::new(&config, 42).unwrap();

        for _ in 0..100 {
            assert_eq!(a.generate(Side::Bid), b.generate(Side::Bid));
        }
        assert_eq!(a.orders_generated, 100);
    }

    #[test]
    fn test_rejects_bad_config() {
        let zero_price = GeneratorConfig { base_price: Decimal::ZERO, ..GeneratorConfig::default() };
        assert!(matches!(OrderGenerator::new(&zero_price, 1), Err(OrderError::InvalidPrice(_))));

        let empty_range = GeneratorConfig { min_quantity: 50, max_quantity: 50, ..GeneratorConfig::default() };
        assert!(matches!(OrderGenerator::new(&empty_range, 1), Err(OrderError::InvalidQuantity(_))));

        let zero_quantity = GeneratorConfig { min_quantity: 0, ..GeneratorConfig::default() };
        assert!(matches!(OrderGenerator::new(&zero_quantity, 1), Err(OrderError::InvalidQuantity(_))));
    }

    #[test]
    fn test_zero_spread_pins_price() {
        let config = GeneratorConfig { price_spread: Decimal::ZERO, ..GeneratorConfig::default() };
        let mut generator = OrderGenerator::new(&config, 7).unwrap();
        for _ in 0..20 {
            assert_eq!(generator.generate(Side::Ask).0, Price::from_u64(190));
        }
    }

    #[test]
    fn test_top_up_fills_thinner_side() {
        let mut svc = service();
        svc.submit_buy(Price::from_u64(1), Quantity::try_new(1).unwrap()).unwrap();
        svc.submit_buy(Price::from_u64(1), Quantity::try_new(1).unwrap()).unwrap();
        let mut generator = OrderGenerator::new(&GeneratorConfig::default(), 3).unwrap();

        // min(2, 0) = 0, so 5 per side
        assert_eq!(top_up(&mut svc, 5, &mut generator).unwrap(), 5);
        assert_eq!(svc.bid_count(), 7);
        assert_eq!(svc.ask_count(), 5);

        assert_eq!(top_up(&mut svc, 5, &mut generator).unwrap(), 0);
        assert_eq!(svc.ask_count(), 5);
    }

    proptest! {
        #[test]
        fn prop_generated_orders_in_range(seed in any::<u64>()) {
            let config = GeneratorConfig::default();
            let mut generator = OrderGenerator::new(&config, seed).unwrap();
            for side in [Side::Bid, Side::Ask] {
                let (price, quantity) = generator.generate(side);
                prop_assert!(price.as_decimal() >= config.base_price);
                prop_assert!(price.as_decimal() < config.base_price + config.price_spread);
                prop_assert!(price.as_decimal().scale() <= 2);
                prop_assert!(quantity.get() >= config.min_quantity);
                prop_assert!(quantity.get() < config.max_quantity);
            }
        }
    }
}
