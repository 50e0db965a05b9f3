//! Hedge decision.
//!
//! When inventory magnitude exceeds the hedge threshold, the strategy
//! requests an offsetting market order from the execution venue. The
//! decision lives here; the submission lifecycle (retries, fills) is the
//! venue's.

use omm_core::{OrderSide, Position};

use crate::config::MakerConfig;

/// An offsetting market order reducing inventory toward target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HedgeOrder {
    /// Direction that reduces |quantity|.
    pub side: OrderSide,
    /// Size in whole tokens.
    pub size: u32,
}

/// Whether the position warrants a hedge.
///
/// Strictly greater-than: a position sitting exactly at the threshold is
/// not hedged. No position never hedges.
pub fn need_hedge(position: Option<&Position>, config: &MakerConfig) -> bool {
    match position {
        Some(p) => p.abs_quantity() > config.hedge_threshold,
        None => false,
    }
}

/// Build the offsetting order for a position over the threshold.
///
/// Long inventory sells, short inventory buys; the size is capped at the
/// position magnitude so a hedge never flips the sign.
pub fn hedge_order(position: &Position, config: &MakerConfig) -> Option<HedgeOrder> {
    if !need_hedge(Some(position), config) {
        return None;
    }

    let side = if position.is_long() {
        OrderSide::Sell
    } else {
        OrderSide::Buy
    };
    let cap = u32::try_from(position.abs_quantity()).unwrap_or(u32::MAX);

    Some(HedgeOrder {
        side,
        size: config.hedge_size.min(cap),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use omm_core::Price;
    use rust_decimal_macros::dec;

    fn position(quantity: i64) -> Position {
        Position::new(quantity, Price::new(dec!(0.60)), Price::new(dec!(0.60)))
    }

    #[test]
    fn test_no_position_no_hedge() {
        let config = MakerConfig::default();
        assert!(!need_hedge(None, &config));
    }

    #[test]
    fn test_threshold_boundary_strict() {
        let config = MakerConfig::default(); // hedge_threshold = 80
        assert!(!need_hedge(Some(&position(80)), &config));
        assert!(need_hedge(Some(&position(81)), &config));
        assert!(!need_hedge(Some(&position(-80)), &config));
        assert!(need_hedge(Some(&position(-81)), &config));
    }

    #[test]
    fn test_long_position_sells() {
        let config = MakerConfig::default();
        let order = hedge_order(&position(100), &config).unwrap();
        assert_eq!(order.side, OrderSide::Sell);
        assert_eq!(order.size, config.hedge_size);
    }

    #[test]
    fn test_short_position_buys() {
        let config = MakerConfig::default();
        let order = hedge_order(&position(-100), &config).unwrap();
        assert_eq!(order.side, OrderSide::Buy);
        assert_eq!(order.size, config.hedge_size);
    }

    #[test]
    fn test_hedge_size_capped_at_position() {
        let config = MakerConfig {
            hedge_threshold: 10,
            hedge_size: 50,
            ..Default::default()
        };
        let order = hedge_order(&position(12), &config).unwrap();
        assert_eq!(order.size, 12);
    }

    #[test]
    fn test_below_threshold_no_order() {
        let config = MakerConfig::default();
        assert!(hedge_order(&position(50), &config).is_none());
    }
}
