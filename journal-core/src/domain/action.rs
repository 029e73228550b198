//! Action: one fill event in a position's ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction of a fill. Long-only journal: BUY adds units, SELL removes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionSide {
    Buy,
    Sell,
}

/// A single buy or sell recorded against a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub side: ActionSide,
    /// Execution price per unit.
    pub price: f64,
    /// Units transacted.
    pub quantity: u64,
    pub date: DateTime<Utc>,
    /// Free text, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Action {
    pub fn buy(price: f64, quantity: u64, date: DateTime<Utc>) -> Self {
        Self { side: ActionSide::Buy, price, quantity, date, note: None }
    }

    pub fn sell(price: f64, quantity: u64, date: DateTime<Utc>) -> Self {
        Self { side: ActionSide::Sell, price, quantity, date, note: None }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn is_buy(&self) -> bool {
        self.side == ActionSide::Buy
    }

    pub fn is_sell(&self) -> bool {
        self.side == ActionSide::Sell
    }

    /// price × quantity
    pub fn notional(&self) -> f64 {
        self.price * self.quantity as f64
    }

    /// Signed quantity change this action applies to holdings.
    pub fn quantity_delta(&self) -> i64 {
        match self.side {
            ActionSide::Buy => self.quantity as i64,
            ActionSide::Sell => -(self.quantity as i64),
        }
    }

    /// Checks the per-action shape: positive finite price and non-zero quantity.
    pub fn validate(&self) -> Result<(), ActionError> {
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(ActionError::NonPositivePrice(self.price));
        }
        if self.quantity == 0 {
            return Err(ActionError::ZeroQuantity);
        }
        Ok(())
    }
}

/// Ledger in ascending date order. Ties keep their insertion order.
pub fn chronological(actions: &[Action]) -> Vec<&Action> {
    let mut sorted: Vec<&Action> = actions.iter().collect();
    sorted.sort_by_key(|a| a.date);
    sorted
}

/// Rejections raised at the validation boundary, before a ledger is mutated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("price must be positive, got {0}")]
    NonPositivePrice(f64),
    #[error("quantity must be positive")]
    ZeroQuantity,
    #[error("cannot sell {requested} units, only {held} held")]
    InsufficientHoldings { requested: u64, held: i64 },
    #[error("position is closed; its ledger can no longer change")]
    PositionClosed,
    #[error("no action at index {0}")]
    ActionNotFound(usize),
    #[error("ledger would hold {held} units on {date}")]
    NegativeHoldings { date: DateTime<Utc>, held: i64 },
}
