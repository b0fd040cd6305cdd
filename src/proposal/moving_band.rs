//! Modifier stage 2 — moving (trailing) price band.
//!
//! Re-anchors to the current reference price every `refresh_interval_sec`, then applies
//! the same clear rule as the static band against the recomputed ceiling/floor.

use crate::config::MovingPriceBandConfig;
use crate::types::Proposal;
use rust_decimal::Decimal;

/// Runtime state for the moving price band.
#[derive(Debug, Clone, Default)]
pub struct MovingPriceBandState {
    pub last_anchor_price: Decimal,
    pub last_anchor_timestamp_ms: i64,
    pub current_ceiling: Decimal,
    pub current_floor: Decimal,
    initialized: bool,
}

impl MovingPriceBandState {
    pub fn new() -> Self {
        Self::default()
    }

    fn anchor(&mut self, config: &MovingPriceBandConfig, reference_price: Decimal, now_ms: i64) {
        self.last_anchor_price = reference_price;
        self.last_anchor_timestamp_ms = now_ms;
        if config.ceiling_pct >= Decimal::ZERO {
            self.current_ceiling = reference_price * (Decimal::ONE + config.ceiling_pct);
        }
        if config.floor_pct >= Decimal::ZERO {
            self.current_floor = reference_price * (Decimal::ONE - config.floor_pct);
        }
        self.initialized = true;
    }

    /// Re-anchors if due, then clears buys/sells that have breached the current band.
    /// A no-op entirely when `config.enabled` is false.
    pub fn apply(
        &mut self,
        proposal: &mut Proposal,
        config: &MovingPriceBandConfig,
        reference_price: Decimal,
        now_ms: i64,
    ) {
        if !config.enabled {
            return;
        }

        let due = !self.initialized
            || now_ms - self.last_anchor_timestamp_ms >= (config.refresh_interval_sec as i64) * 1000;
        if due {
            self.anchor(config, reference_price, now_ms);
        }

        if config.ceiling_pct >= Decimal::ZERO && reference_price >= self.current_ceiling {
            proposal.buys.clear();
        }
        if config.floor_pct >= Decimal::ZERO && reference_price <= self.current_floor {
            proposal.sells.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PriceSize;
    use rust_decimal_macros::dec;

    fn sample_proposal() -> Proposal {
        Proposal::new(
            vec![PriceSize::new(dec!(99), dec!(1))],
            vec![PriceSize::new(dec!(101), dec!(1))],
        )
    }

    fn config() -> MovingPriceBandConfig {
        MovingPriceBandConfig {
            enabled: true,
            ceiling_pct: dec!(0.05),
            floor_pct: dec!(0.05),
            refresh_interval_sec: 3600,
        }
    }

    #[test]
    fn disabled_is_a_no_op() {
        let mut state = MovingPriceBandState::new();
        let mut cfg = config();
        cfg.enabled = false;
        let mut p = sample_proposal();
        state.apply(&mut p, &cfg, dec!(1000), 0);
        assert_eq!(p.buys.len(), 1);
        assert_eq!(p.sells.len(), 1);
        assert_eq!(state.last_anchor_price, Decimal::ZERO);
    }

    #[test]
    fn first_tick_anchors_and_computes_bounds() {
        let mut state = MovingPriceBandState::new();
        let cfg = config();
        let mut p = sample_proposal();
        state.apply(&mut p, &cfg, dec!(100), 0);
        assert_eq!(state.last_anchor_price, dec!(100));
        assert_eq!(state.current_ceiling, dec!(105.00));
        assert_eq!(state.current_floor, dec!(95.00));
    }

    #[test]
    fn stays_anchored_until_refresh_interval_elapses() {
        let mut state = MovingPriceBandState::new();
        let cfg = config();
        let mut p = sample_proposal();
        state.apply(&mut p, &cfg, dec!(100), 0);
        // Price drifts but refresh interval (3600s) has not elapsed.
        state.apply(&mut p, &cfg, dec!(103), 1_000);
        assert_eq!(state.last_anchor_price, dec!(100));
    }

    #[test]
    fn reanchors_after_refresh_interval() {
        let mut state = MovingPriceBandState::new();
        let cfg = config();
        let mut p = sample_proposal();
        state.apply(&mut p, &cfg, dec!(100), 0);
        state.apply(&mut p, &cfg, dec!(110), 3_600_000);
        assert_eq!(state.last_anchor_price, dec!(110));
        assert_eq!(state.current_ceiling, dec!(115.50));
    }

    #[test]
    fn breaching_moving_ceiling_clears_buys() {
        let mut state = MovingPriceBandState::new();
        let cfg = config();
        let mut p = sample_proposal();
        state.apply(&mut p, &cfg, dec!(100), 0);
        let mut p2 = sample_proposal();
        state.apply(&mut p2, &cfg, dec!(106), 10);
        assert!(p2.buys.is_empty());
        assert_eq!(p2.sells.len(), 1);
    }
}
