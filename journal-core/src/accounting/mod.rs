//! Accounting: cost basis, realized and unrealized PnL.
//!
//! Every function here is a pure mapping from a ledger (plus plan fields and an
//! optional live price) to a plain record.

pub mod cost_basis;
pub mod realized;
pub mod unrealized;

pub use cost_basis::{compute_cost_basis, current_quantity, CostBasis};
pub use realized::{
    commission_amount, commission_fraction, compute_realized_pnl, roi, sell_pnl, RealizedPnl,
    SellPnl,
};
pub use unrealized::{compute_unrealized_pnl, unrealized_pnl, UnrealizedPnl};
