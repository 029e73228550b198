//! Domain types for the trade journal

pub mod action;
pub mod ids;
pub mod trade;

pub use action::{chronological, Action, ActionError, ActionSide};
pub use ids::TradeId;
pub use trade::{holding_days, FinalResults, PlanTarget, Trade, TradeStatus};
