//! Journal files and batch summaries.
//!
//! A journal file is the JSON export the storage layer hands over: the trades
//! with their ledgers, plus whatever live prices were fetched alongside them.

use crate::config::JournalConfig;
use journal_core::{summarize, PositionSummary, Trade};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read journal {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid journal JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalFile {
    pub trades: Vec<Trade>,
    /// Latest known price per symbol, for marking open positions.
    #[serde(default)]
    pub prices: HashMap<String, f64>,
}

impl JournalFile {
    pub fn from_json(json: &str, config: &JournalConfig) -> Result<Self, LoadError> {
        let mut journal: Self = serde_json::from_str(json)?;
        apply_defaults(&mut journal.trades, config);
        Ok(journal)
    }

    pub fn load(path: &Path, config: &JournalConfig) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json, config)
    }

    pub fn find(&self, id: &str) -> Option<&Trade> {
        self.trades.iter().find(|t| t.id.as_str() == id)
    }

    pub fn price_of(&self, symbol: &str) -> Option<f64> {
        self.prices.get(symbol).copied()
    }

    /// Summaries of every trade, marked at the journal's prices.
    pub fn summaries(&self) -> Vec<PositionSummary> {
        summarize_all(&self.trades, &self.prices)
    }
}

/// Fill in the configured commission rate where an OPEN trade has none.
/// CLOSED trades keep whatever they were closed with.
pub fn apply_defaults(trades: &mut [Trade], config: &JournalConfig) {
    for trade in trades.iter_mut().filter(|t| t.is_open()) {
        if trade.commission_rate.is_none() {
            trade.commission_rate = Some(config.journal.default_commission_rate);
        }
    }
}

/// Summarize many positions in parallel. Each summary is independent, so the
/// output order matches the input order.
pub fn summarize_all(trades: &[Trade], prices: &HashMap<String, f64>) -> Vec<PositionSummary> {
    trades
        .par_iter()
        .map(|t| summarize(t, prices.get(&t.symbol).copied()))
        .collect()
}
