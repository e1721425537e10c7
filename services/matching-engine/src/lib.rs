//! Matching Engine Service
//!
//! Single-instrument continuous double auction: resting bids and asks
//! ranked by price, and a matcher that crosses the best bid against the
//! best ask, one trade at a time.
//!
//! **Key Invariants:**
//! - Both sides fully ranked after every mutation (bids high→low, asks low→high)
//! - Conservation of quantity: the smaller side is consumed, the larger
//!   side survives with exactly the difference
//! - Trade price is always the matched ask's price
//! - A failed match leaves the book untouched

pub mod book;
pub mod matching;
pub mod engine;
pub mod events;
pub mod sequencer;
pub mod stats;
pub mod service;
pub mod shared;

pub use book::{BookSnapshot, OrderBook};
pub use engine::MatchingEngine;
pub use events::{BookMutation, MatchOutcome};
pub use matching::drain::{DrainStop, DrainSummary};
pub use sequencer::Sequencer;
pub use service::OrderBookService;
pub use shared::SharedOrderBookService;
pub use stats::BookStatistics;
