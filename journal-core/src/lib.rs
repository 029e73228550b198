//! Journal Core — position accounting for a personal trade journal.
//!
//! Turns a time-ordered list of buy/sell actions into:
//! - Pooled weighted-average cost basis and current holdings
//! - Per-sell and aggregate realized PnL, with two-leg commission
//! - Unrealized PnL against a live price
//! - R-multiples against the planned stop-loss, and sell validation
//! - OPEN → CLOSED lifecycle decisions with write-once final results
//!
//! Everything is a pure function of its inputs; nothing here does I/O or holds
//! state between calls.

pub mod accounting;
pub mod domain;
pub mod lifecycle;
pub mod risk;
pub mod summary;

pub use accounting::{CostBasis, RealizedPnl, SellPnl, UnrealizedPnl};
pub use domain::{Action, ActionError, ActionSide, FinalResults, PlanTarget, Trade, TradeId, TradeStatus};
pub use lifecycle::{compute_final_results, evaluate_auto_close, evaluate_close, CloseOutcome, LifecycleDecision};
pub use risk::{can_sell, r_multiple, validate_action, validate_ledger};
pub use summary::{summarize, PositionSummary};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: public records can cross thread boundaries, so
    /// callers may fan summaries out over a thread pool.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Action>();
        require_sync::<Action>();
        require_send::<Trade>();
        require_sync::<Trade>();
        require_send::<CostBasis>();
        require_sync::<CostBasis>();
        require_send::<RealizedPnl>();
        require_sync::<RealizedPnl>();
        require_send::<UnrealizedPnl>();
        require_sync::<UnrealizedPnl>();
        require_send::<PositionSummary>();
        require_sync::<PositionSummary>();
        require_send::<ActionError>();
        require_sync::<ActionError>();
    }
}
