//! Performance statistics: pure functions over closed trades.
//!
//! Every metric reads only the stored final results of CLOSED trades; nothing
//! here re-prices a ledger. Ratios with no defined value are `None`.

use crate::breakdown::{by_strategy, mistake_histogram, MistakeCount, StrategyBreakdown};
use crate::config::StatsConfig;
use chrono::{DateTime, Utc};
use journal_core::domain::holding_days;
use journal_core::{Trade, TradeId};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The slice of a CLOSED trade that statistics read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    pub trade_id: TradeId,
    pub final_pnl: f64,
    pub final_r_multiple: Option<f64>,
    pub strategy: Option<String>,
    pub mistake_type: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Win / loss classification. Zero PnL is neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Breakeven,
}

impl ClosedTrade {
    /// `None` unless the trade is CLOSED with stored final results and an end date.
    pub fn from_trade(trade: &Trade) -> Option<Self> {
        let results = trade.final_results()?;
        let end_date = trade.end_date?;
        Some(Self {
            trade_id: trade.id.clone(),
            final_pnl: results.final_pnl,
            final_r_multiple: results.final_r_multiple,
            strategy: trade.strategy.clone(),
            mistake_type: trade.mistake_type.clone(),
            start_date: trade.start_date,
            end_date,
        })
    }

    pub fn outcome(&self) -> Outcome {
        if self.final_pnl > 0.0 {
            Outcome::Win
        } else if self.final_pnl < 0.0 {
            Outcome::Loss
        } else {
            Outcome::Breakeven
        }
    }

    pub fn is_winner(&self) -> bool {
        self.outcome() == Outcome::Win
    }

    pub fn is_loser(&self) -> bool {
        self.outcome() == Outcome::Loss
    }

    pub fn holding_days(&self) -> i64 {
        holding_days(self.start_date, self.end_date)
    }
}

/// Extract the closed trades from a journal. OPEN trades are skipped; CLOSED
/// trades missing their stored results are skipped with a warning.
pub fn closed_trades(trades: &[Trade]) -> Vec<ClosedTrade> {
    trades
        .iter()
        .filter(|t| t.is_closed())
        .filter_map(|t| {
            let closed = ClosedTrade::from_trade(t);
            if closed.is_none() {
                warn!(trade = %t.id, "closed trade has no stored final results; excluded from stats");
            }
            closed
        })
        .collect()
}

/// Aggregate performance over a set of closed trades.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformanceStats {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub breakeven_trades: usize,
    /// Percent, 0–100.
    pub win_rate: f64,
    pub total_pnl: f64,
    pub max_profit: Option<f64>,
    pub max_loss: Option<f64>,
    pub avg_win_amount: Option<f64>,
    /// Mean of |loss| over losing trades.
    pub avg_loss_amount: Option<f64>,
    /// `None` when there are no losing trades.
    pub profit_factor: Option<f64>,
    /// `total_pnl / total_trades`
    pub expectancy: Option<f64>,
    pub avg_r_multiple: Option<f64>,
    pub avg_holding_days: Option<f64>,
    pub max_win_streak: usize,
    pub max_lose_streak: usize,
    pub by_strategy: Vec<StrategyBreakdown>,
    pub mistakes: Vec<MistakeCount>,
}

impl PerformanceStats {
    /// Compute all statistics with default settings.
    pub fn compute(trades: &[ClosedTrade]) -> Self {
        Self::compute_with(trades, &StatsConfig::default())
    }

    pub fn compute_with(trades: &[ClosedTrade], config: &StatsConfig) -> Self {
        let winners: Vec<f64> = trades.iter().filter(|t| t.is_winner()).map(|t| t.final_pnl).collect();
        let losers: Vec<f64> = trades.iter().filter(|t| t.is_loser()).map(|t| t.final_pnl).collect();
        let streaks = max_streaks(trades);

        Self {
            total_trades: trades.len(),
            winning_trades: winners.len(),
            losing_trades: losers.len(),
            breakeven_trades: trades.len() - winners.len() - losers.len(),
            win_rate: win_rate(trades),
            total_pnl: total_pnl(trades),
            max_profit: trades.iter().map(|t| t.final_pnl).reduce(f64::max),
            max_loss: trades.iter().map(|t| t.final_pnl).reduce(f64::min),
            avg_win_amount: mean(&winners),
            avg_loss_amount: mean(&losers.iter().map(|l| l.abs()).collect::<Vec<_>>()),
            profit_factor: profit_factor(trades),
            expectancy: mean(&trades.iter().map(|t| t.final_pnl).collect::<Vec<_>>()),
            avg_r_multiple: avg_r_multiple(trades),
            avg_holding_days: avg_holding_days(trades),
            max_win_streak: streaks.max_win_streak,
            max_lose_streak: streaks.max_lose_streak,
            by_strategy: by_strategy(trades, config.min_trades_per_strategy),
            mistakes: mistake_histogram(trades),
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Winning trades as a percentage of all trades; 0 for an empty set.
pub fn win_rate(trades: &[ClosedTrade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let winners = trades.iter().filter(|t| t.is_winner()).count();
    winners as f64 / trades.len() as f64 * 100.0
}

pub fn total_pnl(trades: &[ClosedTrade]) -> f64 {
    trades.iter().map(|t| t.final_pnl).sum()
}

/// Gross profit / gross loss.
///
/// `None` when there are no losing trades: the ratio is undefined, and
/// reporting a cap or infinity would mislead.
pub fn profit_factor(trades: &[ClosedTrade]) -> Option<f64> {
    let gross_loss: f64 = trades.iter().filter(|t| t.is_loser()).map(|t| t.final_pnl.abs()).sum();
    if gross_loss <= 0.0 {
        return None;
    }
    let gross_profit: f64 = trades.iter().filter(|t| t.is_winner()).map(|t| t.final_pnl).sum();
    Some(gross_profit / gross_loss)
}

/// Mean R-multiple over trades that have one.
pub fn avg_r_multiple(trades: &[ClosedTrade]) -> Option<f64> {
    let rs: Vec<f64> = trades.iter().filter_map(|t| t.final_r_multiple).collect();
    mean(&rs)
}

/// Mean whole-day holding period.
pub fn avg_holding_days(trades: &[ClosedTrade]) -> Option<f64> {
    let days: Vec<f64> = trades.iter().map(|t| t.holding_days() as f64).collect();
    mean(&days)
}

/// Longest runs of consecutive wins and losses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Streaks {
    pub max_win_streak: usize,
    pub max_lose_streak: usize,
}

/// Walk trades in close-date order and measure the longest win and loss runs.
///
/// A breakeven trade ends both runs without starting a new one.
pub fn max_streaks(trades: &[ClosedTrade]) -> Streaks {
    let mut ordered: Vec<&ClosedTrade> = trades.iter().collect();
    ordered.sort_by_key(|t| t.end_date);

    let mut streaks = Streaks::default();
    let mut wins = 0;
    let mut losses = 0;

    for trade in ordered {
        match trade.outcome() {
            Outcome::Win => {
                wins += 1;
                losses = 0;
            }
            Outcome::Loss => {
                losses += 1;
                wins = 0;
            }
            Outcome::Breakeven => {
                wins = 0;
                losses = 0;
            }
        }
        streaks.max_win_streak = streaks.max_win_streak.max(wins);
        streaks.max_lose_streak = streaks.max_lose_streak.max(losses);
    }
    streaks
}

// ─── Helpers ────────────────────────────────────────────────────────

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
