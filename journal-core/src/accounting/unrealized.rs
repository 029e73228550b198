//! Unrealized PnL: paper result on units still held. No commission until sold.

use super::cost_basis::CostBasis;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnrealizedPnl {
    pub current_price: f64,
    pub unrealized_pnl: f64,
    /// `unrealized_pnl / (avg_entry_price × current_quantity)`, 0 when that is 0.
    pub unrealized_roi: f64,
}

/// Mark the open units at `current_price`.
pub fn unrealized_pnl(avg_entry_price: f64, current_quantity: i64, current_price: f64) -> UnrealizedPnl {
    if current_quantity <= 0 {
        return UnrealizedPnl { current_price, unrealized_pnl: 0.0, unrealized_roi: 0.0 };
    }
    let qty = current_quantity as f64;
    let pnl = (current_price - avg_entry_price) * qty;
    let cost = avg_entry_price * qty;
    let roi = if cost > 0.0 { pnl / cost } else { 0.0 };
    UnrealizedPnl { current_price, unrealized_pnl: pnl, unrealized_roi: roi }
}

/// Mark a cost basis to market; `None` when no live price is available.
pub fn compute_unrealized_pnl(cost: &CostBasis, current_price: Option<f64>) -> Option<UnrealizedPnl> {
    current_price
        .filter(|p| p.is_finite())
        .map(|p| unrealized_pnl(cost.avg_entry_price, cost.current_quantity, p))
}
