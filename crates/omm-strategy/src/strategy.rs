//! Per-tick quoting decision.
//!
//! One book update in, one action out:
//!
//! ```text
//! on_book_update()
//!   ├─ throttle (update_interval_ms)
//!   ├─ mid price check → Skip if the book is not quotable
//!   ├─ PriceHistory.push(mid)            ← the only mutation
//!   ├─ RiskGate.check_all → Skip on any block
//!   ├─ need_hedge → Hedge (takes priority over requoting)
//!   └─ quote params → Quote (tick-rounded, band-clamped)
//! ```
//!
//! The caller supplies `now_ms` and the account/position snapshots; this
//! type never reads a clock and never performs I/O. `&mut self` gives the
//! price history its single writer.

use omm_core::{AccountSnapshot, BookState, OrderBook, Position, Price};
use omm_quote::{compute_quote_params, hedge_order, HedgeOrder, PriceHistory, QuoteParams};
use omm_risk::{GateResult, RiskGate};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::StrategyConfig;
use crate::error::StrategyResult;

/// Why a tick produced no order flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Update arrived inside the throttle interval.
    Throttled,
    /// Book has no usable mid price.
    BookNotTradeable(BookState),
    /// A risk gate blocked quoting.
    RiskBlocked { gate: &'static str, reason: String },
}

/// A two-sided limit quote ready for the execution venue.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteInstruction {
    pub bid_price: Price,
    pub ask_price: Price,
    /// Size per side in whole tokens.
    pub size: u32,
    /// Fractional spread used.
    pub spread: Decimal,
    /// Signed inventory skew applied.
    pub skew: Decimal,
}

/// Outcome of one book update.
#[derive(Debug, Clone, PartialEq)]
pub enum TickAction {
    /// Quote both sides.
    Quote(QuoteInstruction),
    /// Submit an offsetting market order instead of quoting.
    Hedge(HedgeOrder),
    /// Do nothing this tick.
    Skip(SkipReason),
}

/// Market-making strategy host.
pub struct MarketMaker {
    config: StrategyConfig,
    gate: RiskGate,
    history: PriceHistory,
    last_update_ms: Option<u64>,
}

impl MarketMaker {
    /// Create a strategy from validated configuration.
    pub fn new(config: StrategyConfig) -> StrategyResult<Self> {
        config.validate()?;
        let history = PriceHistory::new(config.maker.volatility_window);
        let gate = RiskGate::new(config.risk.clone());
        info!(
            base_spread = %config.maker.base_spread,
            order_size = config.maker.order_size,
            max_inventory = config.risk.max_inventory,
            "market maker initialized"
        );
        Ok(Self {
            config,
            gate,
            history,
            last_update_ms: None,
        })
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Number of mid prices currently buffered.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Process one book update.
    ///
    /// `position` and `account` are point-in-time snapshots read by the
    /// caller before the tick; `now_ms` is the caller's clock.
    pub fn on_book_update(
        &mut self,
        book: &OrderBook,
        position: Option<&Position>,
        account: Option<&AccountSnapshot>,
        now_ms: u64,
    ) -> TickAction {
        if let Some(last) = self.last_update_ms {
            if now_ms.saturating_sub(last) < self.config.update_interval_ms {
                return TickAction::Skip(SkipReason::Throttled);
            }
        }

        let state = book.state();
        let mid = match book.mid_price() {
            Some(m) => m,
            None => {
                debug!(state = %state, "tick skipped: book not quotable");
                return TickAction::Skip(SkipReason::BookNotTradeable(state));
            }
        };

        self.last_update_ms = Some(now_ms);
        self.history.push(mid);

        let report = self.gate.check_all(book, position, account, &self.history);
        if let Some(block) = report.first_block() {
            let reason = match &block.result {
                GateResult::Block(r) => r.clone(),
                GateResult::Pass => String::new(),
            };
            return TickAction::Skip(SkipReason::RiskBlocked {
                gate: block.gate,
                reason,
            });
        }

        if let Some(p) = position {
            if let Some(order) = hedge_order(p, &self.config.maker) {
                warn!(
                    quantity = p.quantity,
                    threshold = self.config.maker.hedge_threshold,
                    side = %order.side,
                    size = order.size,
                    "inventory over hedge threshold"
                );
                return TickAction::Hedge(order);
            }
        }

        match compute_quote_params(book, position, &self.history, &self.config.maker) {
            Some(params) => TickAction::Quote(self.build_instruction(params)),
            // mid_price() succeeded above, so this only covers a book that
            // became inconsistent within the same snapshot
            None => TickAction::Skip(SkipReason::BookNotTradeable(state)),
        }
    }

    /// Tick-round and band-clamp the raw engine prices.
    fn build_instruction(&self, params: QuoteParams) -> QuoteInstruction {
        let (min_price, max_price) = self.gate.limits().price_band();
        let tick = Price::new(self.config.tick_size);

        let bid_price = params
            .bid_price
            .round_to_tick(tick)
            .clamp_to(min_price, max_price);
        let ask_price = params
            .ask_price
            .round_to_tick_up(tick)
            .clamp_to(min_price, max_price);

        debug!(
            bid = %bid_price,
            ask = %ask_price,
            size = params.size,
            spread = %params.spread,
            skew = %params.skew,
            "quote computed"
        );

        QuoteInstruction {
            bid_price,
            ask_price,
            size: params.size,
            spread: params.spread,
            skew: params.skew,
        }
    }
}
