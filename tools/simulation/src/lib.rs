//! Synthetic order flow for the order book
//!
//! Seeded order generation used to populate a book with demo liquidity,
//! and the configuration of the `orderbook-demo` runner.
//!
//! # Modules
//! - `generator` — Deterministic price/quantity generator and book top-up
//! - `config` — Demo runner configuration from the environment

pub mod config;
pub mod generator;

pub use config::DemoConfig;
pub use generator::{top_up, GeneratorConfig, OrderGenerator};

/// Crate version constant
pub const VERSION: &str = "1.0.0";
