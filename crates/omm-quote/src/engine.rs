//! Quote parameter calculation.
//!
//! Computes the per-tick quoting parameters:
//! - Spread: base spread scaled by realized volatility
//! - Skew: inventory distance from target (shift quotes to reduce exposure)
//! - Size: aggregate top-of-book depth on both sides
//!
//! All functions are pure; every output is clamped to its configured
//! bounds. Band clamping against the tradeable price range happens at the
//! strategy layer, which owns the risk limits.

use omm_core::{OrderBook, Position, Price};
use rust_decimal::Decimal;

use crate::config::MakerConfig;
use crate::history::PriceHistory;
use crate::volatility::realized_volatility;

/// Computed quote parameters for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteParams {
    /// Fractional spread applied around mid.
    pub spread: Decimal,
    /// Signed skew. Positive = long inventory, quotes shifted down.
    pub skew: Decimal,
    /// Raw bid price (mid less half-spread, shifted by skew).
    pub bid_price: Price,
    /// Raw ask price (mid plus half-spread, shifted by skew).
    pub ask_price: Price,
    /// Quote size per side in whole tokens.
    pub size: u32,
}

/// Compute the fractional spread for the current tick.
///
/// With dynamic spread disabled this is the clamped base spread. Otherwise
/// the base is scaled up proportionally to realized volatility:
/// `base * (1 + factor * vol)`. An empty or single-sample history has zero
/// volatility and falls back to the base.
pub fn compute_spread(history: &PriceHistory, config: &MakerConfig) -> Decimal {
    let spread = if config.use_dynamic_spread {
        let vol = realized_volatility(history);
        config.base_spread * (Decimal::ONE + config.volatility_spread_factor * vol)
    } else {
        config.base_spread
    };
    spread.max(config.min_spread).min(config.max_spread)
}

/// Compute the signed inventory skew.
///
/// `(quantity - target) * factor`, clamped to `±max_skew`. No position
/// means exactly zero, not a clamped small value.
pub fn compute_skew(position: Option<&Position>, config: &MakerConfig) -> Decimal {
    if !config.use_inventory_skew {
        return Decimal::ZERO;
    }
    let quantity = match position {
        Some(p) => p.quantity,
        None => return Decimal::ZERO,
    };
    let raw = Decimal::from(quantity - config.target_inventory) * config.inventory_skew_factor;
    raw.max(-config.max_skew).min(config.max_skew)
}

/// Compute the quote size from aggregate book depth.
///
/// Sums sizes across the top `depth_levels` levels of both sides (missing
/// levels count as zero). Thin books shrink the quote to the floor, deep
/// books allow the ceiling, anything in between uses the configured size.
pub fn compute_order_size(book: &OrderBook, config: &MakerConfig) -> u32 {
    let depth = book.depth(config.depth_levels).inner();
    let reference = Decimal::from(config.order_size);

    let size = if depth < reference * config.low_depth_multiple {
        config.min_order_size
    } else if depth > reference * config.high_depth_multiple {
        config.max_order_size
    } else {
        config.order_size
    };

    size.max(config.min_order_size).min(config.max_order_size)
}

/// Assemble the full quote parameter set for one tick.
///
/// Returns `None` when the book has no usable mid price; the caller
/// skips the tick rather than quoting on a guess.
pub fn compute_quote_params(
    book: &OrderBook,
    position: Option<&Position>,
    history: &PriceHistory,
    config: &MakerConfig,
) -> Option<QuoteParams> {
    let mid = book.mid_price()?;

    let spread = compute_spread(history, config);
    let skew = compute_skew(position, config);
    let half = spread / Decimal::TWO;

    // Positive skew (long inventory) lowers both quotes: a less aggressive
    // bid and a more aggressive ask both work the position back to target.
    let bid_price = Price::new(mid.inner() * (Decimal::ONE - half) - skew);
    let ask_price = Price::new(mid.inner() * (Decimal::ONE + half) - skew);

    Some(QuoteParams {
        spread,
        skew,
        bid_price,
        ask_price,
        size: compute_order_size(book, config),
    })
}
