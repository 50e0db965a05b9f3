//! Strategy error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] omm_core::CoreError),
}

pub type StrategyResult<T> = Result<T, StrategyError>;
