//! Store Configuration — where the book and trade log live on disk

use std::path::PathBuf;

/// Configuration for the file-backed stores.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Directory holding all store files.
    pub dir: PathBuf,
    /// Resting bids, one record per line.
    pub bid_file: String,
    /// Resting asks, one record per line.
    pub ask_file: String,
    /// Append-only trade log.
    pub trade_file: String,
}

impl StoreConfig {
    /// Create a config with the default file names.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            bid_file: "bids.jsonl".to_string(),
            ask_file: "asks.jsonl".to_string(),
            trade_file: "trades.jsonl".to_string(),
        }
    }

    pub fn bid_path(&self) -> PathBuf {
        self.dir.join(&self.bid_file)
    }

    pub fn ask_path(&self) -> PathBuf {
        self.dir.join(&self.ask_file)
    }

    pub fn trade_path(&self) -> PathBuf {
        self.dir.join(&self.trade_file)
    }
}
