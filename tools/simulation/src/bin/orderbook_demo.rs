//! Order book demo runner
//!
//! Opens the file stores, tops the book up with generated orders, drains
//! it and logs the statistics before and after.

use matching_engine::OrderBookService;
use persistence::{FileStores, StoreConfig};
use simulation::{top_up, DemoConfig, OrderGenerator};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DemoConfig::from_env()?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        target_depth = config.target_depth,
        seed = config.seed,
        "Starting order book demo"
    );

    let stores = FileStores::open(&StoreConfig::new(&config.data_dir))?;
    let mut service = OrderBookService::open(stores.bids, stores.asks, stores.trades)?;
    let mut generator = OrderGenerator::new(&config.generator, config.seed)?;

    top_up(&mut service, config.target_depth, &mut generator)?;
    tracing::info!(stats = %serde_json::to_string(&service.stats())?, "Book before matching");

    let summary = service.drain()?;
    tracing::info!(
        trades = summary.trade_count(),
        stop = ?summary.stop,
        "Matching finished"
    );
    if let (Some(first), Some(last)) = (summary.trades.first(), summary.trades.last()) {
        tracing::info!(first = %first.trade_id, last = %last.trade_id, "Trade ids");
    }

    tracing::info!(stats = %serde_json::to_string(&service.stats())?, "Book after matching");
    Ok(())
}
