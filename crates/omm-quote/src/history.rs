//! Rolling mid-price history.
//!
//! Single-writer buffer appended once per book update. Truncation is
//! batched: the buffer may grow to twice the volatility window, then one
//! drain keeps the most recent window. This bounds both memory and the
//! amortized cost of an append.

use omm_core::Price;
use rust_decimal::Decimal;

/// Bounded mid-price history.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    samples: Vec<Decimal>,
    window: usize,
}

impl PriceHistory {
    /// Create an empty history with the given lookback window.
    pub fn new(window: usize) -> Self {
        Self {
            samples: Vec::with_capacity(window.saturating_mul(2)),
            window,
        }
    }

    /// Append a mid-price observation, truncating when the buffer exceeds
    /// twice the window.
    pub fn push(&mut self, price: Price) {
        self.samples.push(price.inner());
        if self.samples.len() > self.window.saturating_mul(2) {
            let excess = self.samples.len() - self.window;
            self.samples.drain(..excess);
        }
    }

    /// The most recent `window` samples (or fewer if history is shorter),
    /// oldest first.
    pub fn window_samples(&self) -> &[Decimal] {
        let start = self.samples.len().saturating_sub(self.window);
        &self.samples[start..]
    }

    /// Configured lookback window.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of samples currently buffered (including truncation slack).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_push_appends() {
        let mut history = PriceHistory::new(10);
        assert!(history.is_empty());
        history.push(Price::new(dec!(0.60)));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_length_never_exceeds_twice_window() {
        let mut history = PriceHistory::new(10);
        for i in 0..200 {
            history.push(Price::new(Decimal::new(i, 2)));
            assert!(history.len() <= 20, "len {} at sample {}", history.len(), i);
        }
    }

    #[test]
    fn test_truncation_keeps_exactly_window() {
        let mut history = PriceHistory::new(10);
        // 21 pushes: the 21st crosses 2x window and triggers truncation
        for i in 0..21 {
            history.push(Price::new(Decimal::new(i, 2)));
        }
        assert_eq!(history.len(), 10);
        // Most recent samples survive
        assert_eq!(*history.window_samples().last().unwrap(), dec!(0.20));
        assert_eq!(history.window_samples()[0], dec!(0.11));
    }

    #[test]
    fn test_window_samples_short_history() {
        let mut history = PriceHistory::new(10);
        history.push(Price::new(dec!(0.60)));
        history.push(Price::new(dec!(0.61)));
        assert_eq!(history.window_samples().len(), 2);
    }

    #[test]
    fn test_window_samples_caps_at_window() {
        let mut history = PriceHistory::new(10);
        for i in 0..15 {
            history.push(Price::new(Decimal::new(i, 2)));
        }
        // 15 samples buffered (below 2x), but the window view is 10
        assert_eq!(history.len(), 15);
        assert_eq!(history.window_samples().len(), 10);
        assert_eq!(history.window_samples()[0], dec!(0.05));
    }

    #[test]
    fn test_clear() {
        let mut history = PriceHistory::new(10);
        history.push(Price::new(dec!(0.60)));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.window_samples().len(), 0);
    }
}
