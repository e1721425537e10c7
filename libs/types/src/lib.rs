//! Types library for the order book
//!
//! Core type definitions shared by the matching engine, the stores and the
//! simulation tooling. Prices are exact decimals, quantities are positive
//! integers, and identifiers are sequencer-assigned integers.
//!
//! # Modules
//! - `ids`: Unique identifiers (OrderId, TradeId)
//! - `numeric`: Fixed-point price and integer quantity types
//! - `order`: Order side and resting order record
//! - `trade`: Executed trade record
//! - `errors`: Error taxonomy

pub mod ids;
pub mod numeric;
pub mod order;
pub mod trade;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
    pub use crate::trade::*;
    pub use crate::errors::*;
}
