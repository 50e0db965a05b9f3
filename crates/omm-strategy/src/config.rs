//! Strategy configuration.

use crate::error::{StrategyError, StrategyResult};
use omm_core::CoreError;
use omm_quote::MakerConfig;
use omm_risk::RiskLimits;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level strategy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Minimum interval between processed book updates.
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,

    /// Price tick of the instrument. Bids round down, asks round up.
    #[serde(default = "default_tick_size")]
    pub tick_size: Decimal,

    /// Quote engine parameters.
    #[serde(default)]
    pub maker: MakerConfig,

    /// Hard risk limits.
    #[serde(default)]
    pub risk: RiskLimits,
}

fn default_update_interval_ms() -> u64 {
    1000
}

fn default_tick_size() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

impl StrategyConfig {
    /// Load configuration from file.
    ///
    /// Path comes from `OMM_CONFIG` or falls back to `config/default.toml`;
    /// a missing file yields the defaults.
    pub fn load() -> StrategyResult<Self> {
        let config_path =
            std::env::var("OMM_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> StrategyResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StrategyError::Config(format!("Failed to read config: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| StrategyError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all sections.
    pub fn validate(&self) -> StrategyResult<()> {
        self.maker.validate()?;
        self.risk.validate()?;
        if self.tick_size <= Decimal::ZERO {
            return Err(StrategyError::Core(CoreError::InvalidConfig(
                "tick_size must be positive".to_string(),
            )));
        }
        Ok(())
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: default_update_interval_ms(),
            tick_size: default_tick_size(),
            maker: MakerConfig::default(),
            risk: RiskLimits::default(),
        }
    }
}
