//! Trade: a journaled position and the ledger that belongs to it.

use super::action::Action;
use super::ids::TradeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Position lifecycle. CLOSED is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatus {
    Open,
    Closed,
}

/// One planned take-profit level. Display only; never read by the calculators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanTarget {
    pub price: f64,
    /// Share of the position planned to exit at this level, in percent.
    pub weight_pct: f64,
}

/// The write-once record produced when a position closes.
///
/// Once stored on a CLOSED trade this is the historical fact; nothing in the
/// engine recomputes it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalResults {
    pub final_pnl: f64,
    /// `final_pnl / total_buy_amount`; `None` when nothing was bought.
    pub final_roi: Option<f64>,
    /// `None` when no stop-loss was planned or the planned risk is not positive.
    pub final_r_multiple: Option<f64>,
}

/// A journaled position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub symbol: String,
    pub status: TradeStatus,
    #[serde(default)]
    pub actions: Vec<Action>,

    // ── Plan ──
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_stop_loss: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plan_targets: Vec<PlanTarget>,
    /// Commission as a percentage of notional: `0.07` means 0.07 %, not 7 %.
    /// `None` lets the loader fill in the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_rate: Option<f64>,

    // ── Tags ──
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mistake_type: Option<String>,

    // ── Dates ──
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_results: Option<FinalResults>,
}

impl Trade {
    /// An OPEN position with an empty ledger.
    pub fn new(id: impl Into<TradeId>, symbol: impl Into<String>, start_date: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            status: TradeStatus::Open,
            actions: Vec::new(),
            plan_stop_loss: None,
            plan_targets: Vec::new(),
            commission_rate: None,
            strategy: None,
            mistake_type: None,
            start_date,
            end_date: None,
            final_results: None,
        }
    }

    /// An OPEN position seeded with its initial BUY; the start date is the fill date.
    pub fn with_initial_buy(
        id: impl Into<TradeId>,
        symbol: impl Into<String>,
        price: f64,
        quantity: u64,
        date: DateTime<Utc>,
    ) -> Self {
        let mut trade = Self::new(id, symbol, date);
        trade.actions.push(Action::buy(price, quantity, date));
        trade
    }

    pub fn with_stop_loss(mut self, stop: f64) -> Self {
        self.plan_stop_loss = Some(stop);
        self
    }

    pub fn with_commission_rate(mut self, rate_pct: f64) -> Self {
        self.commission_rate = Some(rate_pct);
        self
    }

    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    pub fn with_mistake(mut self, mistake: impl Into<String>) -> Self {
        self.mistake_type = Some(mistake.into());
        self
    }

    pub fn with_targets(mut self, targets: Vec<PlanTarget>) -> Self {
        self.plan_targets = targets;
        self
    }

    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }

    pub fn is_closed(&self) -> bool {
        self.status == TradeStatus::Closed
    }

    /// Commission rate in percent, zero when none is recorded.
    pub fn effective_commission_rate(&self) -> f64 {
        self.commission_rate.unwrap_or(0.0)
    }

    /// Whole days between start and end; `None` while the position has no end date.
    pub fn holding_days(&self) -> Option<i64> {
        self.end_date.map(|end| holding_days(self.start_date, end))
    }

    /// Date of the most recent action, if any.
    pub fn last_action_date(&self) -> Option<DateTime<Utc>> {
        self.actions.iter().map(|a| a.date).max()
    }
}

/// Whole days elapsed between two instants (truncated toward zero).
pub fn holding_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_days()
}
