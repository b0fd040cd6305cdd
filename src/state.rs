//! Mutable strategy state carried between ticks, plus an informational snapshot for
//! logging/telemetry consumers who don't want to depend on `rust_decimal`.

use crate::active_orders::ActiveOrderManager;
use crate::hanging::HangingOrdersTracker;
use crate::proposal::moving_band::MovingPriceBandState;
use crate::types::HangingOrderRef;
use rust_decimal::Decimal;

#[derive(Debug, Default)]
pub struct StrategyState {
    pub active_orders: ActiveOrderManager,
    pub hanging: HangingOrdersTracker,
    pub moving_band: MovingPriceBandState,

    pub filled_buys_balance: u32,
    pub filled_sells_balance: u32,

    pub last_own_trade_price: Option<Decimal>,
    pub inventory_cost_price: Option<Decimal>,

    /// Timestamp of the most recent fill, used to enforce `filled_order_delay_sec` (P7).
    pub last_fill_ms: Option<i64>,

    pub last_tick_ms: i64,
}

impl StrategyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the ping-pong fill balances once both sides have gone through an equal
    /// number of alternating fills (I3).
    pub fn reset_ping_pong_if_due(&mut self) {
        if crate::proposal::ping_pong::should_reset(
            self.filled_buys_balance,
            self.filled_sells_balance,
        ) {
            self.filled_buys_balance = 0;
            self.filled_sells_balance = 0;
        }
    }

    /// True once `filled_order_delay_sec` has elapsed since the last fill (P7). Always true
    /// if no fill has been recorded yet.
    pub fn placement_allowed(&self, now_ms: i64, filled_order_delay_sec: u64) -> bool {
        match self.last_fill_ms {
            Some(t) => now_ms >= t + (filled_order_delay_sec as i64) * 1000,
            None => true,
        }
    }

    /// Re-seeds active-order and hanging state after a process restart. Restored orders are
    /// only promoted to hanging when hanging orders are enabled in the running configuration
    /// — otherwise they re-enter the refresh/cancel cycle like any freshly placed order.
    pub fn restore_active_orders(
        &mut self,
        orders: Vec<crate::types::ActiveOrder>,
        hanging_entries: Vec<(crate::types::OrderId, HangingOrderRef)>,
        hanging_orders_enabled: bool,
    ) {
        for order in orders {
            self.active_orders.insert(order);
        }
        if hanging_orders_enabled {
            self.hanging.restore(hanging_entries);
        }
    }
}

/// A read-only, float-based view of [`StrategyState`] for logging and external telemetry.
/// Never consulted by the decision path — floating point appears here only.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct StrategySnapshot {
    pub reference_price: f64,
    pub active_buy_count: usize,
    pub active_sell_count: usize,
    pub hanging_count: usize,
    pub filled_buys_balance: u32,
    pub filled_sells_balance: u32,
    pub base_balance: f64,
    pub quote_balance: f64,
}

impl StrategySnapshot {
    pub fn capture(
        state: &StrategyState,
        reference_price: Decimal,
        base_balance: Decimal,
        quote_balance: Decimal,
    ) -> Self {
        use rust_decimal::prelude::ToPrimitive;
        Self {
            reference_price: reference_price.to_f64().unwrap_or(0.0),
            active_buy_count: state
                .active_orders
                .by_side(crate::types::Side::Buy)
                .count(),
            active_sell_count: state
                .active_orders
                .by_side(crate::types::Side::Sell)
                .count(),
            hanging_count: state.hanging.len(),
            filled_buys_balance: state.filled_buys_balance,
            filled_sells_balance: state.filled_sells_balance,
            base_balance: base_balance.to_f64().unwrap_or(0.0),
            quote_balance: quote_balance.to_f64().unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn ping_pong_balances_reset_once_equal() {
        let mut state = StrategyState::new();
        state.filled_buys_balance = 2;
        state.filled_sells_balance = 2;
        state.reset_ping_pong_if_due();
        assert_eq!(state.filled_buys_balance, 0);
        assert_eq!(state.filled_sells_balance, 0);
    }

    #[test]
    fn placement_blocked_until_fill_delay_elapses() {
        let mut state = StrategyState::new();
        state.last_fill_ms = Some(5_000);
        assert!(!state.placement_allowed(6_000, 60));
        assert!(state.placement_allowed(65_000, 60));
    }

    #[test]
    fn placement_allowed_when_no_fill_recorded() {
        let state = StrategyState::new();
        assert!(state.placement_allowed(0, 60));
    }

    #[test]
    fn unequal_balances_are_left_alone() {
        let mut state = StrategyState::new();
        state.filled_buys_balance = 2;
        state.filled_sells_balance = 1;
        state.reset_ping_pong_if_due();
        assert_eq!(state.filled_buys_balance, 2);
    }

    #[test]
    fn restore_skips_hanging_promotion_when_disabled() {
        let mut state = StrategyState::new();
        state.restore_active_orders(
            Vec::new(),
            vec![(
                "s1".to_string(),
                HangingOrderRef {
                    price: dec!(101),
                    side: crate::types::Side::Sell,
                    size: dec!(1),
                },
            )],
            false,
        );
        assert!(!state.hanging.is_hanging("s1"));
    }

    #[test]
    fn restore_promotes_hanging_when_enabled() {
        let mut state = StrategyState::new();
        state.restore_active_orders(
            Vec::new(),
            vec![(
                "s1".to_string(),
                HangingOrderRef {
                    price: dec!(101),
                    side: crate::types::Side::Sell,
                    size: dec!(1),
                },
            )],
            true,
        );
        assert!(state.hanging.is_hanging("s1"));
    }

    #[test]
    fn snapshot_captures_counts_and_balances() {
        let state = StrategyState::new();
        let snap = StrategySnapshot::capture(&state, dec!(100), dec!(1), dec!(100));
        assert_eq!(snap.reference_price, 100.0);
        assert_eq!(snap.active_buy_count, 0);
    }
}
