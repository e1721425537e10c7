//! Demo runner configuration
//!
//! Read from `ORDERBOOK_*` environment variables; unset variables fall back
//! to the defaults of `DemoConfig::new`.

use anyhow::Context;
use std::path::PathBuf;

use crate::generator::GeneratorConfig;

pub const DATA_DIR_VAR: &str = "ORDERBOOK_DATA_DIR";
pub const TARGET_DEPTH_VAR: &str = "ORDERBOOK_TARGET_DEPTH";
pub const SEED_VAR: &str = "ORDERBOOK_SEED";

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Directory holding the bid, ask and trade files
    pub data_dir: PathBuf,
    /// Orders per side the book is topped up to before draining
    pub target_depth: usize,
    /// Seed of the order generator
    pub seed: u64,
    pub generator: GeneratorConfig,
}

impl DemoConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            target_depth: 1000,
            seed: 42,
            generator: GeneratorConfig::default(),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::new(lookup(DATA_DIR_VAR).unwrap_or_else(|| "data".to_string()));
        if let Some(raw) = lookup(TARGET_DEPTH_VAR) {
            config.target_depth = raw
                .trim()
                .parse()
                .with_context(|| format!("{TARGET_DEPTH_VAR}={raw} is not a count"))?;
        }
        if let Some(raw) = lookup(SEED_VAR) {
            config.seed = raw
                .trim()
                .parse()
                .with_context(|| format!("{SEED_VAR}={raw} is not a u64"))?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DemoConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DemoConfig::new("data"));
        assert_eq!(config.target_depth, 1000);
    }

    #[test]
    fn test_overrides() {
        let config = DemoConfig::from_lookup(lookup(&[
            (DATA_DIR_VAR, "/tmp/book"),
            (TARGET_DEPTH_VAR, "250"),
            (SEED_VAR, " 7 "),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/book"));
        assert_eq!(config.target_depth, 250);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_bad_number_rejected() {
        let err = DemoConfig::from_lookup(lookup(&[(TARGET_DEPTH_VAR, "lots")])).unwrap_err();
        assert!(err.to_string().contains(TARGET_DEPTH_VAR));
    }
}
