//! Realized PnL curves: per-date buckets accumulated into an equity curve.

use crate::metrics::ClosedTrade;
use chrono::NaiveDate;
use journal_core::accounting::{compute_cost_basis, compute_realized_pnl};
use journal_core::Trade;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One calendar day of realized PnL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    /// PnL realized on this date.
    pub pnl: f64,
    /// Running total up to and including this date.
    pub cumulative_pnl: f64,
}

/// Realized PnL by sell date across every position, open or closed.
///
/// Each sell contributes its own result on the (UTC) date it happened, so
/// partial exits show up when they were taken rather than when the position
/// closed. Sells with no cost basis are skipped.
pub fn realized_pnl_series(trades: &[Trade]) -> Vec<EquityPoint> {
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for trade in trades {
        let cost = compute_cost_basis(&trade.actions);
        let realized = compute_realized_pnl(&trade.actions, &cost, trade.effective_commission_rate());
        for sell in &realized.sells {
            if let Some(pnl) = sell.realized_pnl {
                *buckets.entry(sell.date.date_naive()).or_default() += pnl;
            }
        }
    }
    accumulate(buckets)
}

/// Stored final PnL by close date, for closed trades only.
pub fn closed_pnl_series(trades: &[ClosedTrade]) -> Vec<EquityPoint> {
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for trade in trades {
        *buckets.entry(trade.end_date.date_naive()).or_default() += trade.final_pnl;
    }
    accumulate(buckets)
}

fn accumulate(buckets: BTreeMap<NaiveDate, f64>) -> Vec<EquityPoint> {
    let mut running = 0.0;
    buckets
        .into_iter()
        .map(|(date, pnl)| {
            running += pnl;
            EquityPoint { date, pnl, cumulative_pnl: running }
        })
        .collect()
}
