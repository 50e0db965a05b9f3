//! Pre-trade risk gates.
//!
//! All gates must pass before the strategy is allowed to quote. The
//! posture is stop-over-trade: anything the gate cannot verify blocks.
//!
//! # Gates
//! - PriceRange: mid price inside the tradeable band
//! - Volatility: realized volatility under the cap
//! - Inventory: position magnitude under the cap
//! - PositionNotional: exposure within the free-balance ratio
//! - DailyLoss: combined PnL above the loss floor
//!
//! Every gate is evaluated on every call (none short-circuits) so each
//! verdict can be asserted independently.

use omm_core::{AccountSnapshot, OrderBook, Position};
use omm_quote::{realized_volatility, PriceHistory};
use tracing::warn;

use crate::limits::RiskLimits;

/// Result of a single gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateResult {
    /// Gate passed.
    Pass,
    /// Gate blocked with reason.
    Block(String),
}

impl GateResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn is_block(&self) -> bool {
        matches!(self, Self::Block(_))
    }
}

/// One named gate verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateCheck {
    pub gate: &'static str,
    pub result: GateResult,
}

/// Verdicts of a full gate evaluation.
#[derive(Debug, Clone)]
pub struct GateReport {
    pub checks: Vec<GateCheck>,
}

impl GateReport {
    /// The aggregate verdict: all gates passed.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.result.is_pass())
    }

    /// First blocking gate, if any.
    pub fn first_block(&self) -> Option<&GateCheck> {
        self.checks.iter().find(|c| c.result.is_block())
    }
}

/// Hard risk gate set.
pub struct RiskGate {
    limits: RiskLimits,
}

impl RiskGate {
    /// Create a gate set over validated limits.
    pub fn new(limits: RiskLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &RiskLimits {
        &self.limits
    }

    /// Evaluate every gate and return the per-gate verdicts.
    ///
    /// The aggregate passes only if all five pass. Blocks are logged here
    /// with the gate name; callers decide whether to cancel quotes.
    pub fn check_all(
        &self,
        book: &OrderBook,
        position: Option<&Position>,
        account: Option<&AccountSnapshot>,
        history: &PriceHistory,
    ) -> GateReport {
        let checks = vec![
            GateCheck {
                gate: "price_range",
                result: self.check_price_range(book),
            },
            GateCheck {
                gate: "volatility",
                result: self.check_volatility(history),
            },
            GateCheck {
                gate: "inventory",
                result: self.check_inventory(position),
            },
            GateCheck {
                gate: "position_notional",
                result: self.check_position_notional(position, account),
            },
            GateCheck {
                gate: "daily_loss",
                result: self.check_daily_loss(account),
            },
        ];

        for check in &checks {
            if let GateResult::Block(reason) = &check.result {
                warn!(gate = check.gate, reason, "risk gate blocked");
            }
        }

        GateReport { checks }
    }

    /// PriceRange: `min_price <= mid <= max_price` (inclusive band).
    ///
    /// A book without a usable mid price blocks: a price that cannot be
    /// read cannot be verified in-range.
    pub fn check_price_range(&self, book: &OrderBook) -> GateResult {
        let mid = match book.mid_price() {
            Some(m) => m.inner(),
            None => {
                return GateResult::Block(format!("no mid price (book {})", book.state()));
            }
        };

        if mid < self.limits.min_price || mid > self.limits.max_price {
            return GateResult::Block(format!(
                "mid {} outside [{}, {}]",
                mid, self.limits.min_price, self.limits.max_price
            ));
        }

        GateResult::Pass
    }

    /// Volatility: realized volatility at or under the cap.
    pub fn check_volatility(&self, history: &PriceHistory) -> GateResult {
        let vol = realized_volatility(history);
        if vol > self.limits.max_volatility {
            return GateResult::Block(format!(
                "volatility {} > {} max",
                vol, self.limits.max_volatility
            ));
        }
        GateResult::Pass
    }

    /// Inventory: `|quantity| <= max_inventory`. No position trivially
    /// passes. The gate signals the violation; it never clamps inventory
    /// reported by the position provider.
    pub fn check_inventory(&self, position: Option<&Position>) -> GateResult {
        let quantity = match position {
            Some(p) => p.abs_quantity(),
            None => return GateResult::Pass,
        };

        if quantity > self.limits.max_inventory {
            return GateResult::Block(format!(
                "inventory {} > {} max",
                quantity, self.limits.max_inventory
            ));
        }
        GateResult::Pass
    }

    /// PositionNotional: `|quantity| * current_price <= free_balance *
    /// max_position_ratio`.
    ///
    /// No position trivially passes. A position without account data
    /// blocks: solvency that cannot be verified is treated as violated.
    pub fn check_position_notional(
        &self,
        position: Option<&Position>,
        account: Option<&AccountSnapshot>,
    ) -> GateResult {
        let position = match position {
            Some(p) => p,
            None => return GateResult::Pass,
        };

        let account = match account {
            Some(a) => a,
            None => {
                return GateResult::Block("account snapshot unavailable".to_string());
            }
        };

        let notional = position.notional();
        let allowed = account.free_balance * self.limits.max_position_ratio;
        if notional > allowed {
            return GateResult::Block(format!(
                "notional {} > {} allowed ({} free x {})",
                notional, allowed, account.free_balance, self.limits.max_position_ratio
            ));
        }
        GateResult::Pass
    }

    /// DailyLoss: `realized + unrealized >= max_daily_loss`. The floor is
    /// negative; breach is PnL below it. Missing account data blocks.
    pub fn check_daily_loss(&self, account: Option<&AccountSnapshot>) -> GateResult {
        let account = match account {
            Some(a) => a,
            None => {
                return GateResult::Block("account snapshot unavailable".to_string());
            }
        };

        let pnl = account.total_pnl();
        if pnl < self.limits.max_daily_loss {
            return GateResult::Block(format!(
                "daily pnl {} below {} floor",
                pnl, self.limits.max_daily_loss
            ));
        }
        GateResult::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omm_core::{BookLevel, Price, Size};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn book_at_mid(mid: Decimal) -> OrderBook {
        let half = dec!(0.01);
        OrderBook::new(
            vec![BookLevel::new(Price::new(mid - half), Size::new(dec!(100)))],
            vec![BookLevel::new(Price::new(mid + half), Size::new(dec!(100)))],
        )
    }

    fn position(quantity: i64, current_price: Decimal) -> Position {
        Position::new(quantity, Price::new(current_price), Price::new(current_price))
    }

    fn account(free: Decimal, realized: Decimal, unrealized: Decimal) -> AccountSnapshot {
        let mut a = AccountSnapshot::new(free, free);
        a.realized_pnl = realized;
        a.unrealized_pnl = unrealized;
        a
    }

    fn quiet_history() -> PriceHistory {
        let mut history = PriceHistory::new(100);
        for _ in 0..100 {
            history.push(Price::new(dec!(0.60)));
        }
        history
    }

    fn turbulent_history() -> PriceHistory {
        // Steep ramp whose dispersion exceeds the default 0.15 cap
        let mut history = PriceHistory::new(100);
        for i in 0..100i64 {
            history.push(Price::new(dec!(0.40) + Decimal::new(i * 3, 3)));
        }
        history
    }

    fn gate() -> RiskGate {
        RiskGate::new(RiskLimits::default())
    }

    #[test]
    fn test_price_range_normal() {
        assert!(gate().check_price_range(&book_at_mid(dec!(0.60))).is_pass());
    }

    #[test]
    fn test_price_range_too_low() {
        assert!(gate().check_price_range(&book_at_mid(dec!(0.03))).is_block());
    }

    #[test]
    fn test_price_range_too_high() {
        assert!(gate().check_price_range(&book_at_mid(dec!(0.97))).is_block());
    }

    #[test]
    fn test_price_range_inclusive_bounds() {
        let g = gate();
        assert!(g.check_price_range(&book_at_mid(dec!(0.05))).is_pass());
        assert!(g.check_price_range(&book_at_mid(dec!(0.95))).is_pass());
    }

    #[test]
    fn test_price_range_no_mid_blocks() {
        let empty = OrderBook::new(vec![], vec![]);
        assert!(gate().check_price_range(&empty).is_block());
    }

    #[test]
    fn test_volatility_quiet_passes() {
        assert!(gate().check_volatility(&quiet_history()).is_pass());
    }

    #[test]
    fn test_volatility_turbulent_blocks() {
        assert!(gate().check_volatility(&turbulent_history()).is_block());
    }

    #[test]
    fn test_volatility_empty_history_passes() {
        let history = PriceHistory::new(100);
        assert!(gate().check_volatility(&history).is_pass());
    }

    #[test]
    fn test_inventory_within_limit() {
        assert!(gate().check_inventory(Some(&position(50, dec!(0.60)))).is_pass());
    }

    #[test]
    fn test_inventory_exceeded() {
        assert!(gate().check_inventory(Some(&position(250, dec!(0.60)))).is_block());
        assert!(gate().check_inventory(Some(&position(-250, dec!(0.60)))).is_block());
    }

    #[test]
    fn test_inventory_no_position_passes() {
        assert!(gate().check_inventory(None).is_pass());
    }

    #[test]
    fn test_notional_within_ratio() {
        // 100 x 0.60 = 60 <= 1000 x 0.5
        let result = gate().check_position_notional(
            Some(&position(100, dec!(0.60))),
            Some(&account(dec!(1000), dec!(0), dec!(0))),
        );
        assert!(result.is_pass());
    }

    #[test]
    fn test_notional_exceeded() {
        // 200 x 0.60 = 120 > 100 x 0.5
        let result = gate().check_position_notional(
            Some(&position(200, dec!(0.60))),
            Some(&account(dec!(100), dec!(0), dec!(0))),
        );
        assert!(result.is_block());
    }

    #[test]
    fn test_notional_missing_account_fails_closed() {
        let result = gate().check_position_notional(Some(&position(10, dec!(0.60))), None);
        assert!(result.is_block());
    }

    #[test]
    fn test_notional_no_position_passes_without_account() {
        assert!(gate().check_position_notional(None, None).is_pass());
    }

    #[test]
    fn test_daily_loss_normal() {
        let result = gate().check_daily_loss(Some(&account(dec!(1000), dec!(10), dec!(5))));
        assert!(result.is_pass());
    }

    #[test]
    fn test_daily_loss_exceeded() {
        // -80 + -30 = -110 < -100
        let result = gate().check_daily_loss(Some(&account(dec!(1000), dec!(-80), dec!(-30))));
        assert!(result.is_block());
    }

    #[test]
    fn test_daily_loss_at_floor_passes() {
        let result = gate().check_daily_loss(Some(&account(dec!(1000), dec!(-100), dec!(0))));
        assert!(result.is_pass());
    }

    #[test]
    fn test_daily_loss_missing_account_fails_closed() {
        assert!(gate().check_daily_loss(None).is_block());
    }

    #[test]
    fn test_check_all_passes() {
        let report = gate().check_all(
            &book_at_mid(dec!(0.60)),
            Some(&position(50, dec!(0.60))),
            Some(&account(dec!(1000), dec!(10), dec!(5))),
            &quiet_history(),
        );
        assert!(report.passed());
        assert_eq!(report.checks.len(), 5);
        assert!(report.first_block().is_none());
    }

    #[test]
    fn test_check_all_reports_every_gate() {
        // Even with a blocking price, the remaining gates are evaluated
        let report = gate().check_all(
            &book_at_mid(dec!(0.03)),
            Some(&position(50, dec!(0.60))),
            Some(&account(dec!(1000), dec!(10), dec!(5))),
            &quiet_history(),
        );
        assert!(!report.passed());
        assert_eq!(report.checks.len(), 5);
        assert_eq!(report.first_block().unwrap().gate, "price_range");
        // Other gates still produced verdicts
        assert!(report.checks[1].result.is_pass());
        assert!(report.checks[2].result.is_pass());
    }

    #[test]
    fn test_check_all_conjunction_each_gate_flips_aggregate() {
        let g = gate();
        let good_book = book_at_mid(dec!(0.60));
        let good_position = position(50, dec!(0.60));
        let good_account = account(dec!(1000), dec!(10), dec!(5));
        let good_history = quiet_history();

        // Baseline passes
        assert!(g
            .check_all(&good_book, Some(&good_position), Some(&good_account), &good_history)
            .passed());

        // Price out of band
        assert!(!g
            .check_all(
                &book_at_mid(dec!(0.03)),
                Some(&good_position),
                Some(&good_account),
                &good_history
            )
            .passed());

        // Volatility over cap
        assert!(!g
            .check_all(
                &good_book,
                Some(&good_position),
                Some(&good_account),
                &turbulent_history()
            )
            .passed());

        // Inventory over cap
        assert!(!g
            .check_all(
                &good_book,
                Some(&position(250, dec!(0.60))),
                Some(&good_account),
                &good_history
            )
            .passed());

        // Notional over ratio
        assert!(!g
            .check_all(
                &good_book,
                Some(&position(200, dec!(0.60))),
                Some(&account(dec!(100), dec!(10), dec!(5))),
                &good_history
            )
            .passed());

        // Daily loss breached
        assert!(!g
            .check_all(
                &good_book,
                Some(&good_position),
                Some(&account(dec!(1000), dec!(-80), dec!(-30))),
                &good_history
            )
            .passed());
    }
}
