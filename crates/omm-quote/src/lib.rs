//! Quote parameter engine for the outcome-token market maker.
//!
//! Pure per-tick computation of quoting parameters:
//! - Spread scaled by realized volatility
//! - Inventory skew toward the target position
//! - Order size from aggregate book depth
//! - Hedge decision above the inventory threshold
//!
//! # Architecture
//!
//! ```text
//! Book update → PriceHistory.push(mid)
//!                ├─ compute_spread:  base * (1 + k * volatility), clamped
//!                ├─ compute_skew:    (inventory - target) * factor, clamped
//!                ├─ compute_order_size: top-N depth → thin/normal/deep
//!                └─ need_hedge / hedge_order
//! ```
//!
//! Everything here is synchronous and side-effect free except the history
//! append; the hosting strategy owns throttling and risk gating.

pub mod config;
pub mod engine;
pub mod hedge;
pub mod history;
pub mod volatility;

pub use config::MakerConfig;
pub use engine::{compute_order_size, compute_quote_params, compute_spread, compute_skew, QuoteParams};
pub use hedge::{hedge_order, need_hedge, HedgeOrder};
pub use history::PriceHistory;
pub use volatility::{realized_volatility, volatility_of};
