//! Risk metrics: sell validation and R-multiples.
//!
//! Validation runs before the caller mutates a ledger; the R-multiple expresses
//! a dollar result in units of the risk originally planned.

use crate::accounting::current_quantity;
use crate::domain::{chronological, Action, ActionError, PlanTarget, TradeStatus};

/// True iff `proposed_quantity` units can be sold from what the ledger holds now.
///
/// Call this before appending the SELL: the boundary is inclusive, so selling
/// exactly the held quantity is allowed.
pub fn can_sell(actions: &[Action], proposed_quantity: u64) -> bool {
    let held = current_quantity(actions);
    held >= 0 && proposed_quantity <= held as u64
}

/// Validate an action about to be appended to a position's ledger.
pub fn validate_action(actions: &[Action], status: TradeStatus, action: &Action) -> Result<(), ActionError> {
    if status == TradeStatus::Closed {
        return Err(ActionError::PositionClosed);
    }
    action.validate()?;
    if action.is_sell() && !can_sell(actions, action.quantity) {
        return Err(ActionError::InsufficientHoldings {
            requested: action.quantity,
            held: current_quantity(actions),
        });
    }
    Ok(())
}

/// Validate a whole ledger: every action well-formed, and holdings never
/// negative at any point in date order.
///
/// Used when an existing action is edited or removed, where checking only the
/// last action is not enough.
pub fn validate_ledger(actions: &[Action]) -> Result<(), ActionError> {
    let mut held: i64 = 0;
    for action in chronological(actions) {
        action.validate()?;
        held += action.quantity_delta();
        if held < 0 {
            return Err(ActionError::NegativeHoldings { date: action.date, held });
        }
    }
    Ok(())
}

/// Dollars at risk between entry and the planned stop.
///
/// # Formula
/// ```text
/// risk_amount = (avg_entry_price - plan_stop_loss) × total_buy_quantity
/// ```
///
/// Returns `None` unless a stop is set and the resulting risk is positive.
pub fn risk_amount(avg_entry_price: f64, total_buy_quantity: u64, plan_stop_loss: Option<f64>) -> Option<f64> {
    let stop = plan_stop_loss?;
    let risk = (avg_entry_price - stop) * total_buy_quantity as f64;
    (risk.is_finite() && risk > 0.0).then_some(risk)
}

/// Express `pnl` as a multiple of the planned risk.
///
/// `None` means "no usable stop-loss", which is not the same as `Some(0.0)`.
pub fn r_multiple(
    pnl: f64,
    avg_entry_price: f64,
    total_buy_quantity: u64,
    plan_stop_loss: Option<f64>,
) -> Option<f64> {
    risk_amount(avg_entry_price, total_buy_quantity, plan_stop_loss).map(|risk| pnl / risk)
}

/// Planned reward-to-risk ratio from the take-profit plan.
///
/// # Formula
/// ```text
/// reward = Σ (target.price - entry) × weight / Σ weight
/// risk   = entry - stop
/// ratio  = reward / risk
/// ```
pub fn planned_reward_risk(entry_price: f64, plan_stop_loss: Option<f64>, targets: &[PlanTarget]) -> Option<f64> {
    let stop = plan_stop_loss?;
    let per_unit_risk = entry_price - stop;
    if per_unit_risk <= 0.0 {
        return None;
    }
    let total_weight: f64 = targets.iter().map(|t| t.weight_pct).sum();
    if total_weight <= 0.0 {
        return None;
    }
    let reward = targets
        .iter()
        .map(|t| (t.price - entry_price) * t.weight_pct)
        .sum::<f64>()
        / total_weight;
    Some(reward / per_unit_risk)
}
