//! Matching logic module
//!
//! Crossing test, match planning and trade execution, and the drain loop.

pub mod crossing;
pub mod drain;
pub mod executor;

pub use crossing::can_match;
pub use executor::{plan_match, Fill, MatchExecutor, MatchPlan};
