//! Position and account snapshot types.
//!
//! Both are external, read-only views supplied by the account/position
//! provider before each tick. The engine never fetches them itself and
//! treats them as possibly stale.

use crate::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Position direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
    Short,
    Flat,
}

impl std::fmt::Display for PositionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Long => write!(f, "LONG"),
            Self::Short => write!(f, "SHORT"),
            Self::Flat => write!(f, "FLAT"),
        }
    }
}

/// Net outcome-token position.
///
/// `quantity` is signed: positive = long YES-equivalent tokens, negative =
/// short. The side is derived from the sign and kept consistent by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Signed net quantity in whole tokens.
    pub quantity: i64,
    /// Direction, derived from `quantity`.
    pub side: PositionSide,
    /// Average entry price.
    pub entry_price: Price,
    /// Latest mark/mid price for the instrument.
    pub current_price: Price,
    /// Realized PnL in quote currency.
    pub realized_pnl: Decimal,
    /// Unrealized PnL in quote currency.
    pub unrealized_pnl: Decimal,
}

impl Position {
    /// Create a position; the side is derived from the quantity sign.
    pub fn new(quantity: i64, entry_price: Price, current_price: Price) -> Self {
        Self {
            quantity,
            side: Self::side_of(quantity),
            entry_price,
            current_price,
            realized_pnl: Decimal::ZERO,
            unrealized_pnl: Decimal::ZERO,
        }
    }

    fn side_of(quantity: i64) -> PositionSide {
        match quantity.cmp(&0) {
            std::cmp::Ordering::Greater => PositionSide::Long,
            std::cmp::Ordering::Less => PositionSide::Short,
            std::cmp::Ordering::Equal => PositionSide::Flat,
        }
    }

    /// Absolute quantity.
    pub fn abs_quantity(&self) -> i64 {
        self.quantity.abs()
    }

    /// Notional exposure at the current price.
    pub fn notional(&self) -> Decimal {
        Decimal::from(self.abs_quantity()) * self.current_price.inner()
    }

    pub fn is_long(&self) -> bool {
        self.quantity > 0
    }

    pub fn is_short(&self) -> bool {
        self.quantity < 0
    }
}

/// Account snapshot from the account provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// Balance available for new orders.
    pub free_balance: Decimal,
    /// Total balance including locked collateral.
    pub total_balance: Decimal,
    /// Realized PnL since session start.
    pub realized_pnl: Decimal,
    /// Unrealized PnL across open positions.
    pub unrealized_pnl: Decimal,
}

impl AccountSnapshot {
    pub fn new(free_balance: Decimal, total_balance: Decimal) -> Self {
        Self {
            free_balance,
            total_balance,
            realized_pnl: Decimal::ZERO,
            unrealized_pnl: Decimal::ZERO,
        }
    }

    /// Combined realized + unrealized PnL.
    pub fn total_pnl(&self) -> Decimal {
        self.realized_pnl + self.unrealized_pnl
    }
}
