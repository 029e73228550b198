//! Cost basis: pooled weighted-average entry price over every BUY.

use crate::domain::{Action, ActionSide};
use serde::{Deserialize, Serialize};

/// Ledger reduced to entry price and holdings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBasis {
    /// `total_buy_amount / total_buy_quantity`, or 0 when nothing was bought.
    pub avg_entry_price: f64,
    pub total_buy_quantity: u64,
    pub total_sell_quantity: u64,
    /// `total_buy_quantity - total_sell_quantity`. Only negative for a ledger
    /// that bypassed `can_sell`.
    pub current_quantity: i64,
    /// Σ(buy.price × buy.quantity)
    pub total_buy_amount: f64,
}

impl CostBasis {
    /// Average entry price, or `None` when the ledger has no buys.
    pub fn entry_price(&self) -> Option<f64> {
        (self.total_buy_quantity > 0).then_some(self.avg_entry_price)
    }

    pub fn is_flat(&self) -> bool {
        self.current_quantity == 0
    }

    /// Entry cost of the units still held.
    pub fn open_cost(&self) -> f64 {
        if self.current_quantity <= 0 {
            return 0.0;
        }
        self.avg_entry_price * self.current_quantity as f64
    }
}

/// Reduce a ledger to its cost basis.
///
/// Sells remove quantity but never re-weight the entry price, so the result is
/// independent of action order.
pub fn compute_cost_basis(actions: &[Action]) -> CostBasis {
    let mut total_buy_quantity: u64 = 0;
    let mut total_sell_quantity: u64 = 0;
    let mut total_buy_amount = 0.0;

    for action in actions {
        match action.side {
            ActionSide::Buy => {
                total_buy_quantity += action.quantity;
                total_buy_amount += action.notional();
            }
            ActionSide::Sell => {
                total_sell_quantity += action.quantity;
            }
        }
    }

    let avg_entry_price = if total_buy_quantity > 0 {
        total_buy_amount / total_buy_quantity as f64
    } else {
        0.0
    };

    CostBasis {
        avg_entry_price,
        total_buy_quantity,
        total_sell_quantity,
        current_quantity: total_buy_quantity as i64 - total_sell_quantity as i64,
        total_buy_amount,
    }
}

/// Units held after all actions, without building the full cost basis.
pub fn current_quantity(actions: &[Action]) -> i64 {
    actions.iter().map(Action::quantity_delta).sum()
}
