//! Journal Stats — cross-trade performance statistics.
//!
//! This crate builds on `journal-core` to provide:
//! - Portfolio-level metrics over closed trades (win rate, profit factor, streaks)
//! - Per-strategy and per-mistake breakdowns
//! - Realized PnL curves bucketed by date
//! - Journal file loading and TOML configuration
//! - Parallel per-position summaries

pub mod breakdown;
pub mod config;
pub mod equity;
pub mod journal;
pub mod metrics;

pub use breakdown::{by_strategy, mistake_histogram, MistakeCount, StrategyBreakdown};
pub use config::{ConfigError, JournalConfig, JournalSettings, StatsConfig};
pub use equity::{closed_pnl_series, realized_pnl_series, EquityPoint};
pub use journal::{apply_defaults, summarize_all, JournalFile, LoadError};
pub use metrics::{closed_trades, max_streaks, ClosedTrade, Outcome, PerformanceStats, Streaks};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn performance_stats_is_send_sync() {
        assert_send::<PerformanceStats>();
        assert_sync::<PerformanceStats>();
    }

    #[test]
    fn closed_trade_is_send_sync() {
        assert_send::<ClosedTrade>();
        assert_sync::<ClosedTrade>();
    }

    #[test]
    fn journal_types_are_send_sync() {
        assert_send::<JournalFile>();
        assert_sync::<JournalFile>();
        assert_send::<JournalConfig>();
        assert_sync::<JournalConfig>();
    }

    #[test]
    fn equity_point_is_send_sync() {
        assert_send::<EquityPoint>();
        assert_sync::<EquityPoint>();
    }
}
