//! Position summary: every per-position metric in one record.
//!
//! List, detail, and export screens all call `summarize`, so they agree on
//! every number.

use crate::accounting::{
    compute_cost_basis, compute_realized_pnl, compute_unrealized_pnl, CostBasis, RealizedPnl,
    UnrealizedPnl,
};
use crate::domain::{holding_days, FinalResults, Trade, TradeId, TradeStatus};
use crate::risk::{planned_reward_risk, r_multiple, risk_amount};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSummary {
    pub trade_id: TradeId,
    pub symbol: String,
    pub status: TradeStatus,
    pub cost_basis: CostBasis,
    pub realized: RealizedPnl,
    /// `None` when no live price was supplied.
    pub unrealized: Option<UnrealizedPnl>,
    /// Stored final PnL for CLOSED trades. Otherwise realized plus unrealized
    /// (realized only without a live price).
    pub total_pnl: f64,
    pub risk_amount: Option<f64>,
    /// Stored final value for CLOSED trades, `total_pnl` in R for OPEN ones.
    pub r_multiple: Option<f64>,
    pub planned_reward_risk: Option<f64>,
    /// Start to end date, or to the latest action while OPEN.
    pub holding_days: Option<i64>,
    pub final_results: Option<FinalResults>,
}

/// Build the summary of one position, optionally marked at `current_price`.
pub fn summarize(trade: &Trade, current_price: Option<f64>) -> PositionSummary {
    let cost = compute_cost_basis(&trade.actions);
    let realized = compute_realized_pnl(&trade.actions, &cost, trade.effective_commission_rate());
    let unrealized = if trade.is_open() {
        compute_unrealized_pnl(&cost, current_price)
    } else {
        None
    };
    let final_results = trade.final_results();
    let (total_pnl, r) = match final_results {
        Some(fr) => (fr.final_pnl, fr.final_r_multiple),
        None => {
            let total = realized.realized_pnl + unrealized.map_or(0.0, |u| u.unrealized_pnl);
            let r = r_multiple(total, cost.avg_entry_price, cost.total_buy_quantity, trade.plan_stop_loss);
            (total, r)
        }
    };

    let held_until = trade.end_date.or_else(|| trade.last_action_date());

    PositionSummary {
        trade_id: trade.id.clone(),
        symbol: trade.symbol.clone(),
        status: trade.status,
        risk_amount: risk_amount(cost.avg_entry_price, cost.total_buy_quantity, trade.plan_stop_loss),
        planned_reward_risk: cost
            .entry_price()
            .and_then(|entry| planned_reward_risk(entry, trade.plan_stop_loss, &trade.plan_targets)),
        holding_days: held_until.map(|end| holding_days(trade.start_date, end)),
        cost_basis: cost,
        realized,
        unrealized,
        total_pnl,
        r_multiple: r,
        final_results,
    }
}
