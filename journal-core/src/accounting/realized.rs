//! Realized PnL: profit locked in by each SELL against the pooled entry price.
//!
//! Each sell is priced independently against the average entry price, so the
//! per-sell results can be summed, or bucketed by date for an equity curve,
//! and always agree with the aggregate.

use super::cost_basis::CostBasis;
use crate::domain::{chronological, Action, ActionSide};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Realized result of one SELL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SellPnl {
    pub date: DateTime<Utc>,
    pub price: f64,
    pub quantity: u64,
    /// Commission charged on both legs of this sale.
    pub commission: f64,
    /// `None` when the ledger has no buys to price the sale against.
    pub realized_pnl: Option<f64>,
}

/// Realized PnL over a whole ledger.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RealizedPnl {
    /// One entry per SELL, in date order.
    pub sells: Vec<SellPnl>,
    /// Σ of the available per-sell results.
    pub realized_pnl: f64,
    /// `realized_pnl / total_buy_amount`
    pub realized_roi: Option<f64>,
    pub total_commission: f64,
    /// Sells that could not be priced (no buys on record).
    pub skipped_sells: usize,
}

/// Convert a percentage rate into a fraction: `0.07` (%) → `0.0007`.
pub fn commission_fraction(rate_pct: f64) -> f64 {
    rate_pct / 100.0
}

/// Commission on one sale, charged on the exit notional and the entry cost of
/// the units sold.
pub fn commission_amount(exit_price: f64, avg_entry_price: f64, quantity: u64, rate_pct: f64) -> f64 {
    let q = quantity as f64;
    (exit_price * q + avg_entry_price * q) * commission_fraction(rate_pct)
}

/// Net realized PnL of selling `quantity` units at `exit_price`.
///
/// Returns `None` when `avg_entry_price` is not positive: a sale with no cost
/// basis has no meaningful result.
pub fn sell_pnl(exit_price: f64, quantity: u64, avg_entry_price: f64, rate_pct: f64) -> Option<f64> {
    if avg_entry_price <= 0.0 {
        return None;
    }
    let gross = (exit_price - avg_entry_price) * quantity as f64;
    Some(gross - commission_amount(exit_price, avg_entry_price, quantity, rate_pct))
}

/// Price every SELL in the ledger against the cost basis.
pub fn compute_realized_pnl(actions: &[Action], cost: &CostBasis, rate_pct: f64) -> RealizedPnl {
    let mut result = RealizedPnl::default();

    for action in chronological(actions) {
        if action.side != ActionSide::Sell {
            continue;
        }
        let pnl = sell_pnl(action.price, action.quantity, cost.avg_entry_price, rate_pct);
        let commission = match pnl {
            Some(pnl) => {
                result.realized_pnl += pnl;
                commission_amount(action.price, cost.avg_entry_price, action.quantity, rate_pct)
            }
            None => {
                warn!(
                    date = %action.date,
                    quantity = action.quantity,
                    "sell has no cost basis; realized pnl unavailable"
                );
                result.skipped_sells += 1;
                0.0
            }
        };
        result.total_commission += commission;
        result.sells.push(SellPnl {
            date: action.date,
            price: action.price,
            quantity: action.quantity,
            commission,
            realized_pnl: pnl,
        });
    }

    result.realized_roi = roi(result.realized_pnl, cost.total_buy_amount);
    result
}

/// `pnl / invested`, `None` when nothing was invested.
pub fn roi(pnl: f64, invested: f64) -> Option<f64> {
    (invested > 0.0).then(|| pnl / invested)
}
