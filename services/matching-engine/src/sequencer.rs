//! Id sequencer
//!
//! Hands out monotonically increasing ids for one id-space. Owned by the
//! engine (one for orders, one for trades) and reseeded at start-up from
//! the highest id found in persisted state, so ids are never reused.

use types::errors::EngineError;

/// Monotonic id counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequencer {
    /// `None` once `u64::MAX` has been handed out
    next: Option<u64>,
}

impl Sequencer {
    /// Create a sequencer whose first id is `start`
    pub fn new(start: u64) -> Self {
        Self { next: Some(start) }
    }

    /// Continue after the highest id already in use; start at 1 when
    /// nothing has been persisted
    pub fn resume_after(max_seen: Option<u64>) -> Result<Self, EngineError> {
        match max_seen {
            None => Ok(Self::new(1)),
            Some(max) => max.checked_add(1).map(Self::new).ok_or_else(|| exhausted(max)),
        }
    }

    /// Get next id (monotonically increasing)
    pub fn next_id(&mut self) -> Result<u64, EngineError> {
        let id = self.next.ok_or_else(|| exhausted(u64::MAX))?;
        self.next = id.checked_add(1);
        Ok(id)
    }

    /// The id the next call to `next_id` will return, if any is left
    pub fn peek(&self) -> Option<u64> {
        self.next
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(1)
    }
}

fn exhausted(last: u64) -> EngineError {
    EngineError::System {
        message: format!("id space exhausted after {}", last),
    }
}
