//! Realized volatility over the mid-price history.
//!
//! Defined as the population standard deviation of the windowed samples
//! divided by their mean: dimensionless, non-negative, and zero for a
//! constant price series. Statistics run in f64 over the decimal inputs;
//! the result feeds spread scaling and a risk cap, not money arithmetic.

use crate::history::PriceHistory;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Realized volatility of the most recent window.
///
/// Fewer than two samples yield zero.
pub fn realized_volatility(history: &PriceHistory) -> Decimal {
    volatility_of(history.window_samples())
}

/// Volatility of an explicit sample slice (oldest first).
pub fn volatility_of(samples: &[Decimal]) -> Decimal {
    if samples.len() < 2 {
        return Decimal::ZERO;
    }

    let vals: Vec<f64> = samples
        .iter()
        .map(|d| d.to_f64().unwrap_or(0.0))
        .collect();
    let n = vals.len() as f64;
    let mean = vals.iter().sum::<f64>() / n;
    if mean <= 0.0 {
        return Decimal::ZERO;
    }

    let variance = vals.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let vol = variance.sqrt() / mean;

    Decimal::from_f64_retain(vol).unwrap_or(Decimal::ZERO)
}
