//! Position lifecycle: OPEN → CLOSED, one way.
//!
//! The evaluator functions are pure: they look at a ledger and say what should
//! happen. The `Trade` methods below are the thin caller-side layer that
//! validates a change, applies it, and records the decision. Final results are
//! written exactly once, at the CLOSED transition.

use crate::accounting::{compute_cost_basis, compute_realized_pnl, current_quantity, roi};
use crate::domain::{chronological, Action, ActionError, FinalResults, Trade, TradeStatus};
use crate::risk::{r_multiple, validate_action, validate_ledger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What the ledger says about the position's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleDecision {
    StayOpen,
    /// Holdings reached zero; `end_date` is the date of the sell that did it.
    AutoClose { end_date: DateTime<Utc> },
}

/// Result of an explicit close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloseOutcome {
    pub final_results: FinalResults,
    /// False when units were still held at close. Not an error: only the
    /// realized portion counts, and the caller should surface a warning.
    pub fully_liquidated: bool,
    pub residual_quantity: i64,
}

/// Decide whether a ledger has fully liquidated its position.
///
/// Fires whenever holdings are exactly zero on a non-empty ledger, even if a
/// back-dated SELL got it there. The end date is the latest SELL's date; an
/// empty ledger stays open.
pub fn evaluate_auto_close(actions: &[Action]) -> LifecycleDecision {
    if current_quantity(actions) != 0 {
        return LifecycleDecision::StayOpen;
    }
    match chronological(actions).into_iter().rev().find(|a| a.is_sell()) {
        Some(last_sell) => LifecycleDecision::AutoClose { end_date: last_sell.date },
        None => LifecycleDecision::StayOpen,
    }
}

/// Final results from the realized portion of a ledger. Open units are not
/// marked to market.
pub fn compute_final_results(actions: &[Action], plan_stop_loss: Option<f64>, rate_pct: f64) -> FinalResults {
    let cost = compute_cost_basis(actions);
    let realized = compute_realized_pnl(actions, &cost, rate_pct);
    let final_pnl = realized.realized_pnl;
    FinalResults {
        final_pnl,
        final_roi: roi(final_pnl, cost.total_buy_amount),
        final_r_multiple: r_multiple(final_pnl, cost.avg_entry_price, cost.total_buy_quantity, plan_stop_loss),
    }
}

/// Evaluate an explicit close at whatever quantity is currently held.
pub fn evaluate_close(actions: &[Action], plan_stop_loss: Option<f64>, rate_pct: f64) -> CloseOutcome {
    let residual_quantity = current_quantity(actions);
    CloseOutcome {
        final_results: compute_final_results(actions, plan_stop_loss, rate_pct),
        fully_liquidated: residual_quantity == 0,
        residual_quantity,
    }
}

impl Trade {
    /// Validate and append an action, auto-closing if holdings reach zero.
    pub fn record_action(&mut self, action: Action) -> Result<LifecycleDecision, ActionError> {
        validate_action(&self.actions, self.status, &action)?;
        self.actions.push(action);
        Ok(self.apply_auto_close())
    }

    /// Replace the action at `index`. The whole edited ledger must stay consistent.
    pub fn replace_action(&mut self, index: usize, action: Action) -> Result<LifecycleDecision, ActionError> {
        self.ensure_open()?;
        if index >= self.actions.len() {
            return Err(ActionError::ActionNotFound(index));
        }
        let mut edited = self.actions.clone();
        edited[index] = action;
        validate_ledger(&edited)?;
        self.actions = edited;
        Ok(self.apply_auto_close())
    }

    /// Remove the action at `index`, returning it with the resulting decision.
    pub fn remove_action(&mut self, index: usize) -> Result<(Action, LifecycleDecision), ActionError> {
        self.ensure_open()?;
        if index >= self.actions.len() {
            return Err(ActionError::ActionNotFound(index));
        }
        let mut edited = self.actions.clone();
        let removed = edited.remove(index);
        validate_ledger(&edited)?;
        self.actions = edited;
        Ok((removed, self.apply_auto_close()))
    }

    /// Close the position explicitly at `closed_at`, at any quantity.
    pub fn close(&mut self, closed_at: DateTime<Utc>) -> Result<CloseOutcome, ActionError> {
        self.ensure_open()?;
        let outcome = evaluate_close(&self.actions, self.plan_stop_loss, self.effective_commission_rate());
        if !outcome.fully_liquidated {
            debug!(
                trade = %self.id,
                residual = outcome.residual_quantity,
                "closing with open units; only realized pnl is counted"
            );
        }
        self.finalize(closed_at, outcome.final_results);
        Ok(outcome)
    }

    /// The stored final results. `None` while OPEN.
    ///
    /// Never recomputed for a CLOSED trade: the stored triple is authoritative.
    pub fn final_results(&self) -> Option<FinalResults> {
        match self.status {
            TradeStatus::Closed => self.final_results,
            TradeStatus::Open => None,
        }
    }

    fn ensure_open(&self) -> Result<(), ActionError> {
        match self.status {
            TradeStatus::Open => Ok(()),
            TradeStatus::Closed => Err(ActionError::PositionClosed),
        }
    }

    fn apply_auto_close(&mut self) -> LifecycleDecision {
        let decision = evaluate_auto_close(&self.actions);
        if let LifecycleDecision::AutoClose { end_date } = decision {
            debug!(trade = %self.id, %end_date, "holdings reached zero; auto-closing");
            let results = compute_final_results(&self.actions, self.plan_stop_loss, self.effective_commission_rate());
            self.finalize(end_date, results);
        }
        decision
    }

    fn finalize(&mut self, end_date: DateTime<Utc>, results: FinalResults) {
        self.status = TradeStatus::Closed;
        self.end_date = Some(end_date);
        if self.final_results.is_none() {
            self.final_results = Some(results);
        }
    }
}
