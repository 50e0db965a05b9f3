//! Quoting tick loop for the outcome-token market maker.
//!
//! Hosts the quote parameter engine and the risk gates behind a single
//! entry point: feed it one order-book snapshot (plus the current
//! position and account snapshots) and it answers with one action:
//! quote both sides, hedge, or skip with a reason.
//!
//! The caller owns all I/O: market data delivery, order submission, and
//! the clock. This crate never blocks, never spawns, and never retries;
//! a returned action is a decision, not an execution.

pub mod config;
pub mod error;
pub mod strategy;

pub use config::StrategyConfig;
pub use error::{StrategyError, StrategyResult};
pub use strategy::{MarketMaker, QuoteInstruction, SkipReason, TickAction};
