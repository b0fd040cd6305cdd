//! Modifier stage 6 — inventory-based order size skew.
//!
//! Computes a target base-asset holding as `inventory_target_base_pct` of total portfolio
//! value, then a `±range` window around it sized by `inventory_range_multiplier *
//! (order_amount * order_levels)`, itself capped at half the portfolio's total value so a
//! large multiplier or order ladder can't blow the window past what the portfolio could ever
//! hold. Current base balance's position inside that window maps linearly to a `[0, 2]` size
//! ratio for each side: at the low water mark bids double and asks vanish, at the high water
//! mark the reverse, and at the target both sides are neutral (ratio 1). The high water mark
//! is additionally capped at the portfolio's total value expressed in base-asset units, since
//! holding more base than the whole portfolio is worth is not a reachable state.

use crate::types::Proposal;
use rust_decimal::Decimal;

const NEUTRAL: Decimal = Decimal::ONE;
const TWO: Decimal = Decimal::new(2, 0);
const HALF: Decimal = Decimal::new(5, 1);

pub struct InventorySkewInputs {
    pub enabled: bool,
    pub base_balance: Decimal,
    pub quote_balance: Decimal,
    pub price: Decimal,
    pub target_base_pct: Decimal,
    pub order_amount: Decimal,
    pub order_levels: u32,
    pub range_multiplier: Decimal,
}

/// Returns `(bid_size_ratio, ask_size_ratio)`, each in `[0, 2]`. Neutral (1, 1) when total
/// portfolio value or price is non-positive, or when the computed window collapses to a
/// single point.
pub fn ratios(inputs: &InventorySkewInputs) -> (Decimal, Decimal) {
    let total_value = inputs.base_balance * inputs.price + inputs.quote_balance;
    if total_value <= Decimal::ZERO || inputs.price <= Decimal::ZERO {
        return (NEUTRAL, NEUTRAL);
    }

    let target_base_amount = total_value * inputs.target_base_pct / inputs.price;
    let total_order_size = inputs.order_amount * Decimal::from(inputs.order_levels.max(1));
    let max_range = (total_value * HALF) / inputs.price;
    let range = (inputs.range_multiplier * total_order_size).min(max_range);
    let low = (target_base_amount - range).max(Decimal::ZERO);
    let portfolio_value_in_base = total_value / inputs.price;
    let high = (target_base_amount + range).min(portfolio_value_in_base);

    if high <= low {
        return (NEUTRAL, NEUTRAL);
    }

    let ratio = ((inputs.base_balance - low) / (high - low))
        .max(Decimal::ZERO)
        .min(Decimal::ONE);

    let bid_ratio = TWO * (Decimal::ONE - ratio);
    let ask_ratio = TWO * ratio;
    (bid_ratio, ask_ratio)
}

pub fn apply(proposal: &mut Proposal, inputs: &InventorySkewInputs) {
    if !inputs.enabled {
        return;
    }
    let (bid_ratio, ask_ratio) = ratios(inputs);

    for level in proposal.buys.iter_mut() {
        level.size *= bid_ratio;
    }
    for level in proposal.sells.iter_mut() {
        level.size *= ask_ratio;
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

    fn base_inputs() -> InventorySkewInputs {
        InventorySkewInputs {
            enabled: true,
            base_balance: dec!(10),
            quote_balance: dec!(1000),
            price: dec!(100),
            target_base_pct: dec!(0.5),
            order_amount: dec!(1),
            order_levels: 1,
            range_multiplier: dec!(1),
        }
    }

    #[test]
    fn exactly_on_target_is_neutral() {
        // Scenario-style check matching R2: B/V at target yields ratio 1/1.
        let (bid, ask) = ratios(&base_inputs());
        assert_eq!(bid, dec!(1));
        assert_eq!(ask, dec!(1));
    }

    #[test]
    fn extreme_deficit_maxes_bid_and_zeroes_ask() {
        // Scenario S3: B=0, Q=2000, P=100, target=0.5, order_amount=1, range_multiplier=1.
        let inputs = InventorySkewInputs {
            enabled: true,
            base_balance: Decimal::ZERO,
            quote_balance: dec!(2000),
            price: dec!(100),
            target_base_pct: dec!(0.5),
            order_amount: dec!(1),
            order_levels: 1,
            range_multiplier: dec!(1),
        };
        let (bid, ask) = ratios(&inputs);
        assert_eq!(bid, dec!(2));
        assert_eq!(ask, dec!(0));
    }

    #[test]
    fn extreme_surplus_maxes_ask_and_zeroes_bid() {
        let inputs = InventorySkewInputs {
            enabled: true,
            base_balance: dec!(20),
            quote_balance: Decimal::ZERO,
            price: dec!(100),
            target_base_pct: dec!(0.5),
            order_amount: dec!(1),
            order_levels: 1,
            range_multiplier: dec!(1),
        };
        let (bid, ask) = ratios(&inputs);
        assert_eq!(bid, dec!(0));
        assert_eq!(ask, dec!(2));
    }

    #[test]
    fn zero_portfolio_value_is_neutral() {
        let inputs = InventorySkewInputs {
            enabled: true,
            base_balance: Decimal::ZERO,
            quote_balance: Decimal::ZERO,
            price: dec!(100),
            target_base_pct: dec!(0.5),
            order_amount: dec!(1),
            order_levels: 1,
            range_multiplier: dec!(1),
        };
        let (bid, ask) = ratios(&inputs);
        assert_eq!(bid, NEUTRAL);
        assert_eq!(ask, NEUTRAL);
    }

    #[test]
    fn disabled_leaves_sizes_untouched() {
        let mut p = sample_proposal();
        let mut inputs = base_inputs();
        inputs.enabled = false;
        inputs.base_balance = Decimal::ZERO;
        apply(&mut p, &inputs);
        assert_eq!(p.buys[0].size, dec!(1));
        assert_eq!(p.sells[0].size, dec!(1));
    }

    #[test]
    fn range_cap_scales_with_portfolio_value_not_target_amount() {
        // target_base_pct != 0.5 so the range cap (half of total portfolio value) and the
        // old, wrong cap (target_base_amount) diverge; at base_balance = 2 this lands well
        // inside the true window but would have clamped to the extreme bid/ask under the
        // old target_base_amount cap.
        let inputs = InventorySkewInputs {
            enabled: true,
            base_balance: dec!(2),
            quote_balance: dec!(800),
            price: dec!(100),
            target_base_pct: dec!(0.1),
            order_amount: dec!(4),
            order_levels: 1,
            range_multiplier: dec!(1),
        };
        let (bid, ask) = ratios(&inputs);
        assert_eq!(bid, dec!(1.2));
        assert_eq!(ask, dec!(0.8));
    }

    #[test]
    fn deficit_scales_sizes_in_proposal() {
        let mut p = sample_proposal();
        let inputs = InventorySkewInputs {
            enabled: true,
            base_balance: Decimal::ZERO,
            quote_balance: dec!(2000),
            price: dec!(100),
            target_base_pct: dec!(0.5),
            order_amount: dec!(1),
            order_levels: 1,
            range_multiplier: dec!(1),
        };
        apply(&mut p, &inputs);
        assert_eq!(p.buys[0].size, dec!(2));
        assert_eq!(p.sells[0].size, dec!(0));
    }
}
