//! Persistence for the order book
//!
//! Concrete implementations of the store collaborators the order book
//! service depends on: one order store per side, loaded and rewritten
//! wholesale, and an append-only trade log.
//!
//! - `store` — `OrderStore` / `TradeStore` contracts
//! - `memory` — in-memory stores
//! - `file` — checksummed line files on disk
//! - `record` — line codec shared by the file stores
//! - `config` — file layout

pub mod config;
pub mod file;
pub mod memory;
pub mod record;
pub mod store;

pub use config::StoreConfig;
pub use file::{FileOrderStore, FileStores, FileTradeStore};
pub use memory::{MemoryOrderStore, MemoryTradeStore};
pub use store::{OrderStore, TradeStore};
