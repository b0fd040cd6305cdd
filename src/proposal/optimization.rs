//! Modifier stage 4 — order-price optimization.
//!
//! Pulls each side's top level one tick inside the opposite side's top-of-book, then
//! propagates the tightened level-0 price to lower levels multiplicatively. Level scaling
//! here is purely `(1 ∓ level_spread * i)` off the *tightened* level-0 price, a different
//! formula from the builder's `(1 − bid_spread − i * level_spread)` — see DESIGN.md for
//! why the two are kept independent rather than unified.

use crate::types::{Proposal, Side};
use rust_decimal::Decimal;

/// Per-level spread tables for the split-order-levels variant.
#[derive(Debug, Clone, Default)]
pub struct SplitLevelSpreads {
    pub bid_spreads_pct: Vec<Decimal>,
    pub ask_spreads_pct: Vec<Decimal>,
}

pub struct OptimizationParams {
    pub enabled: bool,
    pub order_level_spread: Decimal,
    pub split_enabled: bool,
    pub split: SplitLevelSpreads,
}

/// Computes "one tick above/below the competing top". `competing_top` is already the
/// depth-weighted price the caller queried from the venue at a volume of our own resting
/// size on that side plus the configured optimization depth — walking past our own resting
/// liquidity and the configured depth before reading off a price other participants are
/// actually competing at.
fn competing_top_adjusted(competing_top: Decimal, tick: Decimal, side: Side) -> Decimal {
    match side {
        Side::Buy => competing_top + tick,
        Side::Sell => competing_top - tick,
    }
}

/// Applies order-price optimization to level 0 of `proposal`, then propagates to lower
/// levels. Optimization only ever *tightens* a level-0 price, never loosens it (S5):
/// - buys: `min(proposed_price, price_above_competing_bid)`
/// - sells: `max(proposed_price, price_below_competing_ask)`
///
/// `competing_top_bid`/`competing_top_ask` are depth-weighted prices (see
/// `competing_top_adjusted`), not plain top-of-book.
pub fn apply(
    proposal: &mut Proposal,
    params: &OptimizationParams,
    competing_top_bid: Decimal,
    competing_top_ask: Decimal,
    price_tick: Decimal,
) {
    if !params.enabled || proposal.buys.is_empty() && proposal.sells.is_empty() {
        return;
    }

    if let Some(level0) = proposal.buys.first().copied() {
        let price_above_bid = competing_top_adjusted(competing_top_bid, price_tick, Side::Buy);
        let tightened = level0.price.min(price_above_bid);
        propagate(&mut proposal.buys, tightened, params, Side::Buy);
    }

    if let Some(level0) = proposal.sells.first().copied() {
        let price_below_ask = competing_top_adjusted(competing_top_ask, price_tick, Side::Sell);
        let tightened = level0.price.max(price_below_ask);
        propagate(&mut proposal.sells, tightened, params, Side::Sell);
    }
}

fn propagate(
    levels: &mut [crate::types::PriceSize],
    level0_price: Decimal,
    params: &OptimizationParams,
    side: Side,
) {
    if levels.is_empty() {
        return;
    }
    levels[0].price = level0_price;

    if params.split_enabled {
        let spreads = match side {
            Side::Buy => &params.split.bid_spreads_pct,
            Side::Sell => &params.split.ask_spreads_pct,
        };
        if spreads.is_empty() {
            return;
        }
        let hundred = Decimal::new(100, 0);
        let base = match side {
            Side::Buy => Decimal::ONE - spreads[0] / hundred,
            Side::Sell => Decimal::ONE + spreads[0] / hundred,
        };
        for (i, level) in levels.iter_mut().enumerate().skip(1) {
            let spread_i = spreads.get(i).copied().unwrap_or(spreads[spreads.len() - 1]);
            let factor_i = match side {
                Side::Buy => Decimal::ONE - spread_i / hundred,
                Side::Sell => Decimal::ONE + spread_i / hundred,
            };
            level.price = level0_price * (factor_i / base);
        }
        return;
    }

    for (i, level) in levels.iter_mut().enumerate().skip(1) {
        let i_dec = Decimal::from(i as u64);
        let factor = match side {
            Side::Buy => Decimal::ONE - params.order_level_spread * i_dec,
            Side::Sell => Decimal::ONE + params.order_level_spread * i_dec,
        };
        level.price = level0_price * factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PriceSize;
    use rust_decimal_macros::dec;

    fn base_params() -> OptimizationParams {
        OptimizationParams {
            enabled: true,
            order_level_spread: dec!(0.005),
            split_enabled: false,
            split: SplitLevelSpreads::default(),
        }
    }

    #[test]
    fn optimization_only_tightens_never_loosens_buys() {
        // Depth-weighted competing bid 99.50, our proposed level-0 99.00, tick 0.01.
        let mut p = Proposal::new(vec![PriceSize::new(dec!(99.00), dec!(1))], vec![]);
        apply(&mut p, &base_params(), dec!(99.50), dec!(0), dec!(0.01));
        assert_eq!(p.buys[0].price, dec!(99.00));
    }

    #[test]
    fn optimization_tightens_when_room_exists() {
        // Competing bid far below our proposal: tightened price wins.
        let mut p = Proposal::new(vec![PriceSize::new(dec!(99.00), dec!(1))], vec![]);
        apply(&mut p, &base_params(), dec!(98.90), dec!(0), dec!(0.01));
        assert_eq!(p.buys[0].price, dec!(98.91));
    }

    #[test]
    fn sells_never_loosen_below_competing_ask_adjustment() {
        let mut p = Proposal::new(vec![], vec![PriceSize::new(dec!(101.00), dec!(1))]);
        apply(&mut p, &base_params(), dec!(0), dec!(100.60), dec!(0.01));
        assert_eq!(p.sells[0].price, dec!(101.00));
    }

    #[test]
    fn propagation_is_purely_multiplicative_off_tightened_level0() {
        let mut p = Proposal::new(
            vec![
                PriceSize::new(dec!(99.00), dec!(1)),
                PriceSize::new(dec!(98.00), dec!(1)),
            ],
            vec![],
        );
        apply(&mut p, &base_params(), dec!(98.90), dec!(0), dec!(0.01));
        // level0 tightened to 98.91; level1 = 98.91 * (1 - 0.005*1)
        assert_eq!(p.buys[0].price, dec!(98.91));
        assert_eq!(p.buys[1].price, dec!(98.4155500));
    }

    #[test]
    fn disabled_is_a_no_op() {
        let mut params = base_params();
        params.enabled = false;
        let mut p = Proposal::new(vec![PriceSize::new(dec!(99.00), dec!(1))], vec![]);
        apply(&mut p, &params, dec!(98.90), dec!(0), dec!(0.01));
        assert_eq!(p.buys[0].price, dec!(99.00));
    }

    #[test]
    fn split_mode_derives_level_price_from_level0() {
        let mut params = base_params();
        params.split_enabled = true;
        params.split.bid_spreads_pct = vec![dec!(1), dec!(2)];
        let mut p = Proposal::new(
            vec![
                PriceSize::new(dec!(99.00), dec!(1)),
                PriceSize::new(dec!(98.00), dec!(1)),
            ],
            vec![],
        );
        apply(&mut p, &params, dec!(97.00), dec!(0), dec!(0.01));
        // level0 tightened to min(99.00, 97.01) = 97.01
        assert_eq!(p.buys[0].price, dec!(97.01));
        // level1 = level0 * (1 - 2/100) / (1 - 1/100)
        let expected = dec!(97.01) * (dec!(0.98) / dec!(0.99));
        assert_eq!(p.buys[1].price, expected);
    }

    #[test]
    fn depth_weighted_top_walks_past_own_resting_size_and_configured_depth() {
        // The caller is responsible for querying the venue at a volume of
        // `own_resting_size + depth`; this stage just nudges one tick past whatever price
        // comes back, same as the zero-depth case — it never re-derives depth itself.
        let mut p = Proposal::new(vec![PriceSize::new(dec!(99.00), dec!(1))], vec![]);
        let depth_weighted_competing_bid = dec!(98.80);
        apply(&mut p, &base_params(), depth_weighted_competing_bid, dec!(0), dec!(0.01));
        assert_eq!(p.buys[0].price, dec!(98.81));
    }
}
