//! Risk limit configuration.

use omm_core::{CoreError, Price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hard risk limits, immutable per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Lowest mid price at which quoting is allowed.
    #[serde(default = "default_min_price")]
    pub min_price: Decimal,

    /// Highest mid price at which quoting is allowed.
    #[serde(default = "default_max_price")]
    pub max_price: Decimal,

    /// Maximum realized volatility before quoting stops.
    #[serde(default = "default_max_volatility")]
    pub max_volatility: Decimal,

    /// Maximum inventory magnitude in whole tokens.
    #[serde(default = "default_max_inventory")]
    pub max_inventory: i64,

    /// Maximum position notional as a fraction of free balance.
    #[serde(default = "default_max_position_ratio")]
    pub max_position_ratio: Decimal,

    /// Daily loss floor. Negative: quoting stops once combined PnL drops
    /// below this value.
    #[serde(default = "default_max_daily_loss")]
    pub max_daily_loss: Decimal,
}

impl RiskLimits {
    /// Validate ranges at construction time.
    pub fn validate(&self) -> omm_core::Result<()> {
        if self.min_price >= self.max_price {
            return Err(CoreError::InvalidConfig(format!(
                "min_price {} >= max_price {}",
                self.min_price, self.max_price
            )));
        }
        if self.min_price.is_sign_negative() {
            return Err(CoreError::InvalidConfig(
                "min_price must be non-negative".to_string(),
            ));
        }
        if self.max_volatility <= Decimal::ZERO {
            return Err(CoreError::InvalidConfig(
                "max_volatility must be positive".to_string(),
            ));
        }
        if self.max_inventory < 0 {
            return Err(CoreError::InvalidConfig(
                "max_inventory must be non-negative".to_string(),
            ));
        }
        if self.max_position_ratio <= Decimal::ZERO {
            return Err(CoreError::InvalidConfig(
                "max_position_ratio must be positive".to_string(),
            ));
        }
        if self.max_daily_loss > Decimal::ZERO {
            return Err(CoreError::InvalidConfig(
                "max_daily_loss is a loss floor and must be <= 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Price band as typed prices.
    pub fn price_band(&self) -> (Price, Price) {
        (Price::new(self.min_price), Price::new(self.max_price))
    }
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            min_price: default_min_price(),
            max_price: default_max_price(),
            max_volatility: default_max_volatility(),
            max_inventory: default_max_inventory(),
            max_position_ratio: default_max_position_ratio(),
            max_daily_loss: default_max_daily_loss(),
        }
    }
}

fn default_min_price() -> Decimal {
    Decimal::new(5, 2) // 0.05
}
fn default_max_price() -> Decimal {
    Decimal::new(95, 2) // 0.95
}
fn default_max_volatility() -> Decimal {
    Decimal::new(15, 2) // 0.15
}
fn default_max_inventory() -> i64 {
    200
}
fn default_max_position_ratio() -> Decimal {
    Decimal::new(5, 1) // 0.5
}
fn default_max_daily_loss() -> Decimal {
    Decimal::new(-100, 0)
}
