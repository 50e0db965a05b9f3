//! Order-book snapshot types.
//!
//! The strategy consumes point-in-time snapshots delivered by an external
//! market data feed; it never maintains the book itself. A snapshot carries
//! the top levels of both sides plus a receive timestamp.

use crate::{Price, Size};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Book validity state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookState {
    /// Both sides present and bid < ask.
    Valid,
    /// No bid side (empty or zero-priced).
    NoBid,
    /// No ask side (empty or zero-priced).
    NoAsk,
    /// Both sides missing.
    Empty,
    /// Crossed or otherwise inconsistent (bid >= ask).
    Crossed,
}

impl BookState {
    /// Check if this state allows quoting decisions.
    pub fn is_tradeable(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl std::fmt::Display for BookState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid => write!(f, "VALID"),
            Self::NoBid => write!(f, "NO_BID"),
            Self::NoAsk => write!(f, "NO_ASK"),
            Self::Empty => write!(f, "EMPTY"),
            Self::Crossed => write!(f, "CROSSED"),
        }
    }
}

/// A single price level on one side of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: Price,
    pub size: Size,
}

impl BookLevel {
    pub fn new(price: Price, size: Size) -> Self {
        Self { price, size }
    }
}

/// Order-book snapshot.
///
/// Bids sorted by price descending, asks ascending (best level first on
/// both sides). Either side may be short or empty; consumers must not
/// assume a fixed number of levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    /// Bid levels, best (highest) first.
    pub bids: Vec<BookLevel>,
    /// Ask levels, best (lowest) first.
    pub asks: Vec<BookLevel>,
    /// Timestamp when this snapshot was received.
    pub received_at: DateTime<Utc>,
}

impl OrderBook {
    /// Create a new snapshot stamped with the current time.
    pub fn new(bids: Vec<BookLevel>, asks: Vec<BookLevel>) -> Self {
        Self {
            bids,
            asks,
            received_at: Utc::now(),
        }
    }

    /// Best bid level, if any.
    pub fn best_bid(&self) -> Option<&BookLevel> {
        self.bids.first()
    }

    /// Best ask level, if any.
    pub fn best_ask(&self) -> Option<&BookLevel> {
        self.asks.first()
    }

    /// Get book state.
    ///
    /// Determines if the book is quotable, has a missing side, or is crossed.
    pub fn state(&self) -> BookState {
        let has_bid = self
            .best_bid()
            .map(|l| l.price.is_positive() && l.size.is_positive())
            .unwrap_or(false);
        let has_ask = self
            .best_ask()
            .map(|l| l.price.is_positive() && l.size.is_positive())
            .unwrap_or(false);

        match (has_bid, has_ask) {
            (false, false) => BookState::Empty,
            (true, false) => BookState::NoAsk,
            (false, true) => BookState::NoBid,
            (true, true) => {
                if self.bids[0].price < self.asks[0].price {
                    BookState::Valid
                } else {
                    BookState::Crossed
                }
            }
        }
    }

    /// Calculate mid price: (best bid + best ask) / 2.
    ///
    /// Returns None unless the book state is Valid.
    pub fn mid_price(&self) -> Option<Price> {
        if self.state() != BookState::Valid {
            return None;
        }
        Some(Price::new(
            (self.bids[0].price.inner() + self.asks[0].price.inner()) / Decimal::TWO,
        ))
    }

    /// Calculate spread: best ask - best bid. None unless Valid.
    pub fn spread(&self) -> Option<Price> {
        if self.state() != BookState::Valid {
            return None;
        }
        Some(self.asks[0].price - self.bids[0].price)
    }

    /// Aggregate depth across the top `levels` levels of both sides.
    ///
    /// Books shorter than `levels` contribute what they have; missing
    /// levels count as zero.
    pub fn depth(&self, levels: usize) -> Size {
        let side_depth = |side: &[BookLevel]| -> Decimal {
            side.iter()
                .take(levels)
                .map(|l| l.size.inner())
                .sum::<Decimal>()
        };
        Size::new(side_depth(&self.bids) + side_depth(&self.asks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn level(price: Decimal, size: Decimal) -> BookLevel {
        BookLevel::new(Price::new(price), Size::new(size))
    }

    fn valid_book() -> OrderBook {
        OrderBook::new(
            vec![
                level(dec!(0.59), dec!(100)),
                level(dec!(0.58), dec!(100)),
                level(dec!(0.57), dec!(100)),
            ],
            vec![
                level(dec!(0.61), dec!(100)),
                level(dec!(0.62), dec!(100)),
                level(dec!(0.63), dec!(100)),
            ],
        )
    }

    #[test]
    fn test_mid_price() {
        let book = valid_book();
        assert_eq!(book.state(), BookState::Valid);
        assert_eq!(book.mid_price().unwrap().inner(), dec!(0.60));
    }

    #[test]
    fn test_spread() {
        let book = valid_book();
        assert_eq!(book.spread().unwrap().inner(), dec!(0.02));
    }

    #[test]
    fn test_state_no_bid() {
        let book = OrderBook::new(vec![], vec![level(dec!(0.61), dec!(100))]);
        assert_eq!(book.state(), BookState::NoBid);
        assert!(book.mid_price().is_none());
    }

    #[test]
    fn test_state_no_ask() {
        let book = OrderBook::new(vec![level(dec!(0.59), dec!(100))], vec![]);
        assert_eq!(book.state(), BookState::NoAsk);
        assert!(book.mid_price().is_none());
    }

    #[test]
    fn test_state_empty() {
        let book = OrderBook::new(vec![], vec![]);
        assert_eq!(book.state(), BookState::Empty);
    }

    #[test]
    fn test_state_crossed() {
        let book = OrderBook::new(
            vec![level(dec!(0.62), dec!(100))],
            vec![level(dec!(0.61), dec!(100))],
        );
        assert_eq!(book.state(), BookState::Crossed);
        assert!(book.mid_price().is_none());
    }

    #[test]
    fn test_zero_priced_level_is_missing_side() {
        let book = OrderBook::new(
            vec![level(dec!(0), dec!(0))],
            vec![level(dec!(0.61), dec!(100))],
        );
        assert_eq!(book.state(), BookState::NoBid);
    }

    #[test]
    fn test_depth_sums_both_sides() {
        let book = valid_book();
        // 3 levels x 100 each side = 600
        assert_eq!(book.depth(5).inner(), dec!(600));
        // Top 2 levels only = 400
        assert_eq!(book.depth(2).inner(), dec!(400));
    }

    #[test]
    fn test_depth_short_book() {
        let book = OrderBook::new(
            vec![level(dec!(0.59), dec!(50))],
            vec![level(dec!(0.61), dec!(70))],
        );
        // Asking for 5 levels on a 1-level book must not panic
        assert_eq!(book.depth(5).inner(), dec!(120));
    }

    #[test]
    fn test_depth_empty_book() {
        let book = OrderBook::new(vec![], vec![]);
        assert_eq!(book.depth(5), Size::ZERO);
    }

    #[test]
    fn test_snapshot_serde_round_trip() {
        let book = valid_book();
        let json = serde_json::to_string(&book).unwrap();
        let back: OrderBook = serde_json::from_str(&json).unwrap();
        assert_eq!(book, back);
    }
}
