//! File Stores — Line-oriented order sides and trade log
//!
//! - `FileOrderStore`: one file per side, rewritten wholesale on every save
//!   (write to temp → fsync → rename, so a crash leaves the old side intact)
//! - `FileTradeStore`: append-only log, one trade per line
//!
//! A missing file reads as an empty collection. Every line carries a CRC32C
//! (see `record`); corrupt lines are reported with their line number.

use crate::config::StoreConfig;
use crate::record::{decode_line, encode_line};
use crate::store::{OrderStore, TradeStore};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use types::errors::StoreError;
use types::ids::TradeId;
use types::order::{Order, Side};
use types::trade::Trade;

// ── Helpers ─────────────────────────────────────────────────────────

fn unavailable(path: &Path, err: impl Display) -> StoreError {
    StoreError::Unavailable {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

fn corrupt(path: &Path, line: usize, reason: impl Into<String>) -> StoreError {
    StoreError::Corrupt {
        path: path.display().to_string(),
        line,
        reason: reason.into(),
    }
}

/// Read every non-blank line of `path` as a record. Line numbers are 1-based.
fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<(usize, T)>, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(unavailable(path, e)),
    };

    let mut records = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| unavailable(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let record = decode_line(&line).map_err(|reason| corrupt(path, idx + 1, reason))?;
        records.push((idx + 1, record));
    }
    Ok(records)
}

fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| unavailable(parent, e))?;
        }
    }
    Ok(())
}

// ── Order Store ─────────────────────────────────────────────────────

/// One side of the book persisted as a line file.
#[derive(Debug, Clone)]
pub struct FileOrderStore {
    path: PathBuf,
    side: Side,
}

impl FileOrderStore {
    pub fn new(path: impl Into<PathBuf>, side: Side) -> Self {
        Self {
            path: path.into(),
            side,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn side(&self) -> Side {
        self.side
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl OrderStore for FileOrderStore {
    fn load_all(&self) -> Result<Vec<Order>, StoreError> {
        let records: Vec<(usize, Order)> = read_records(&self.path)?;
        let mut orders = Vec::with_capacity(records.len());
        for (line, order) in records {
            if order.side != self.side {
                return Err(corrupt(
                    &self.path,
                    line,
                    format!("{} order in {} store", order.side, self.side),
                ));
            }
            orders.push(order);
        }
        debug!(path = %self.path.display(), side = %self.side, count = orders.len(), "Loaded orders");
        Ok(orders)
    }

    fn save_all(&mut self, orders: &[Order]) -> Result<(), StoreError> {
        ensure_parent(&self.path)?;
        let tmp_path = self.tmp_path();

        // Atomic write: write to tmp, fsync, rename
        {
            let file = File::create(&tmp_path).map_err(|e| unavailable(&tmp_path, e))?;
            let mut writer = BufWriter::new(file);
            for order in orders {
                let line = encode_line(order).map_err(|e| unavailable(&self.path, e))?;
                writeln!(writer, "{}", line).map_err(|e| unavailable(&tmp_path, e))?;
            }
            writer.flush().map_err(|e| unavailable(&tmp_path, e))?;
            writer
                .get_ref()
                .sync_all()
                .map_err(|e| unavailable(&tmp_path, e))?;
        }
        fs::rename(&tmp_path, &self.path).map_err(|e| unavailable(&self.path, e))?;

        debug!(path = %self.path.display(), side = %self.side, count = orders.len(), "Saved orders");
        Ok(())
    }
}

// ── Trade Store ─────────────────────────────────────────────────────

/// Append-only trade log persisted as a line file.
#[derive(Debug, Clone)]
pub struct FileTradeStore {
    path: PathBuf,
}

impl FileTradeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TradeStore for FileTradeStore {
    fn append(&mut self, trade: &Trade) -> Result<(), StoreError> {
        ensure_parent(&self.path)?;
        let line = encode_line(trade).map_err(|e| unavailable(&self.path, e))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| unavailable(&self.path, e))?;
        writeln!(file, "{}", line).map_err(|e| unavailable(&self.path, e))?;
        file.sync_data().map_err(|e| unavailable(&self.path, e))?;

        debug!(path = %self.path.display(), trade_id = %trade.trade_id, "Appended trade");
        Ok(())
    }

    fn load_all(&self) -> Result<BTreeMap<TradeId, Trade>, StoreError> {
        let records: Vec<(usize, Trade)> = read_records(&self.path)?;
        let mut trades = BTreeMap::new();
        for (line, trade) in records {
            let trade_id = trade.trade_id;
            if trades.insert(trade_id, trade).is_some() {
                return Err(corrupt(&self.path, line, format!("duplicate trade id {}", trade_id)));
            }
        }
        debug!(path = %self.path.display(), count = trades.len(), "Loaded trades");
        Ok(trades)
    }
}

// ── Bundle ──────────────────────────────────────────────────────────

/// The three file stores of one book, laid out per `StoreConfig`.
#[derive(Debug, Clone)]
pub struct FileStores {
    pub bids: FileOrderStore,
    pub asks: FileOrderStore,
    pub trades: FileTradeStore,
}

impl FileStores {
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        fs::create_dir_all(&config.dir).map_err(|e| unavailable(&config.dir, e))?;
        Ok(Self {
            bids: FileOrderStore::new(config.bid_path(), Side::Bid),
            asks: FileOrderStore::new(config.ask_path(), Side::Ask),
            trades: FileTradeStore::new(config.trade_path()),
        })
    }
}
