//! Quote engine configuration.

use omm_core::{CoreError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quote engine configuration.
///
/// Immutable per run: constructed once, validated once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakerConfig {
    /// Scale the spread with realized volatility.
    /// When false, `base_spread` is used as-is (still clamped).
    #[serde(default = "default_true")]
    pub use_dynamic_spread: bool,

    /// Base fractional spread around mid.
    #[serde(default = "default_base_spread")]
    pub base_spread: Decimal,

    /// Minimum fractional spread.
    #[serde(default = "default_min_spread")]
    pub min_spread: Decimal,

    /// Maximum fractional spread.
    #[serde(default = "default_max_spread")]
    pub max_spread: Decimal,

    /// Volatility multiplier for dynamic spread:
    /// `spread = base * (1 + factor * volatility)`.
    #[serde(default = "default_volatility_spread_factor")]
    pub volatility_spread_factor: Decimal,

    /// Number of mid-price samples the volatility estimate looks back over.
    #[serde(default = "default_volatility_window")]
    pub volatility_window: usize,

    /// Quote size in whole tokens at normal book depth.
    #[serde(default = "default_order_size")]
    pub order_size: u32,

    /// Quote size floor (used when the book is thin).
    #[serde(default = "default_min_order_size")]
    pub min_order_size: u32,

    /// Quote size ceiling (used when the book is deep).
    #[serde(default = "default_max_order_size")]
    pub max_order_size: u32,

    /// Number of book levels per side inspected for aggregate depth.
    #[serde(default = "default_depth_levels")]
    pub depth_levels: usize,

    /// Depth below `order_size * low_depth_multiple` counts as thin.
    #[serde(default = "default_low_depth_multiple")]
    pub low_depth_multiple: Decimal,

    /// Depth above `order_size * high_depth_multiple` counts as deep.
    #[serde(default = "default_high_depth_multiple")]
    pub high_depth_multiple: Decimal,

    /// Bias quotes against accumulating inventory.
    #[serde(default = "default_true")]
    pub use_inventory_skew: bool,

    /// Skew per token of inventory distance from target.
    #[serde(default = "default_inventory_skew_factor")]
    pub inventory_skew_factor: Decimal,

    /// Absolute cap on the skew.
    #[serde(default = "default_max_skew")]
    pub max_skew: Decimal,

    /// Desired neutral inventory level.
    #[serde(default)]
    pub target_inventory: i64,

    /// Inventory magnitude above which an offsetting hedge is requested.
    #[serde(default = "default_hedge_threshold")]
    pub hedge_threshold: i64,

    /// Hedge order size in whole tokens.
    #[serde(default = "default_hedge_size")]
    pub hedge_size: u32,
}

impl MakerConfig {
    /// Validate ranges. Inverted or nonsensical bounds are rejected here
    /// rather than surfacing mid-computation.
    pub fn validate(&self) -> Result<()> {
        if self.min_spread > self.max_spread {
            return Err(CoreError::InvalidConfig(format!(
                "min_spread {} > max_spread {}",
                self.min_spread, self.max_spread
            )));
        }
        if self.min_spread.is_sign_negative() || self.base_spread.is_sign_negative() {
            return Err(CoreError::InvalidConfig(
                "spreads must be non-negative".to_string(),
            ));
        }
        if self.min_order_size == 0 {
            return Err(CoreError::InvalidConfig(
                "min_order_size must be at least 1".to_string(),
            ));
        }
        if self.min_order_size > self.max_order_size {
            return Err(CoreError::InvalidConfig(format!(
                "min_order_size {} > max_order_size {}",
                self.min_order_size, self.max_order_size
            )));
        }
        if self.volatility_window < 2 {
            return Err(CoreError::InvalidConfig(
                "volatility_window must be at least 2".to_string(),
            ));
        }
        if self.depth_levels == 0 {
            return Err(CoreError::InvalidConfig(
                "depth_levels must be at least 1".to_string(),
            ));
        }
        if self.low_depth_multiple > self.high_depth_multiple {
            return Err(CoreError::InvalidConfig(format!(
                "low_depth_multiple {} > high_depth_multiple {}",
                self.low_depth_multiple, self.high_depth_multiple
            )));
        }
        if self.inventory_skew_factor.is_sign_negative() || self.max_skew.is_sign_negative() {
            return Err(CoreError::InvalidConfig(
                "skew parameters must be non-negative".to_string(),
            ));
        }
        if self.hedge_threshold < 0 {
            return Err(CoreError::InvalidConfig(
                "hedge_threshold must be non-negative".to_string(),
            ));
        }
        if self.hedge_size == 0 {
            return Err(CoreError::InvalidConfig(
                "hedge_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MakerConfig {
    fn default() -> Self {
        Self {
            use_dynamic_spread: true,
            base_spread: default_base_spread(),
            min_spread: default_min_spread(),
            max_spread: default_max_spread(),
            volatility_spread_factor: default_volatility_spread_factor(),
            volatility_window: default_volatility_window(),
            order_size: default_order_size(),
            min_order_size: default_min_order_size(),
            max_order_size: default_max_order_size(),
            depth_levels: default_depth_levels(),
            low_depth_multiple: default_low_depth_multiple(),
            high_depth_multiple: default_high_depth_multiple(),
            use_inventory_skew: true,
            inventory_skew_factor: default_inventory_skew_factor(),
            max_skew: default_max_skew(),
            target_inventory: 0,
            hedge_threshold: default_hedge_threshold(),
            hedge_size: default_hedge_size(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_base_spread() -> Decimal {
    Decimal::new(2, 2) // 0.02 = 2%
}
fn default_min_spread() -> Decimal {
    Decimal::new(5, 3) // 0.005
}
fn default_max_spread() -> Decimal {
    Decimal::new(10, 2) // 0.10
}
fn default_volatility_spread_factor() -> Decimal {
    Decimal::new(4, 0)
}
fn default_volatility_window() -> usize {
    100
}
fn default_order_size() -> u32 {
    20
}
fn default_min_order_size() -> u32 {
    5
}
fn default_max_order_size() -> u32 {
    50
}
fn default_depth_levels() -> usize {
    5
}
fn default_low_depth_multiple() -> Decimal {
    Decimal::new(10, 0)
}
fn default_high_depth_multiple() -> Decimal {
    Decimal::new(100, 0)
}
fn default_inventory_skew_factor() -> Decimal {
    Decimal::new(1, 4) // 0.0001 per token
}
fn default_max_skew() -> Decimal {
    Decimal::new(2, 2) // 0.02
}
fn default_hedge_threshold() -> i64 {
    80
}
fn default_hedge_size() -> u32 {
    20
}
