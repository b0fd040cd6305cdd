//! Modifier stage 7 — budget constraint.
//!
//! Walks buy levels outward-in, consuming `available_quote_balance` (net of quote already
//! reserved by non-hanging, non-candidate active orders) level by level at
//! `price * size * (1 + fee)`. The first level that doesn't fully fit is shrunk to the
//! affordable amount rather than dropped outright; every level past it is dropped. Sells
//! are constrained the same way against `available_base_balance`, sized in base units so
//! no fee factor applies. Levels are consumed in the order they appear in the proposal
//! (best price first), never reordered.

use crate::types::Proposal;
use rust_decimal::Decimal;

pub fn apply(
    proposal: &mut Proposal,
    available_quote_balance: Decimal,
    available_base_balance: Decimal,
    maker_fee_pct: Decimal,
) {
    let fee_multiplier = Decimal::ONE + maker_fee_pct;

    let mut quote_left = available_quote_balance.max(Decimal::ZERO);
    let mut keep_buys = proposal.buys.len();
    for (i, level) in proposal.buys.iter_mut().enumerate() {
        let notional = level.price * level.size * fee_multiplier;
        if notional <= quote_left {
            quote_left -= notional;
            continue;
        }
        level.size = if level.price.is_zero() || quote_left.is_zero() {
            Decimal::ZERO
        } else {
            quote_left / (level.price * fee_multiplier)
        };
        keep_buys = i + 1;
        break;
    }
    proposal.buys.truncate(keep_buys);

    let mut base_left = available_base_balance.max(Decimal::ZERO);
    let mut keep_sells = proposal.sells.len();
    for (i, level) in proposal.sells.iter_mut().enumerate() {
        if level.size <= base_left {
            base_left -= level.size;
            continue;
        }
        level.size = base_left;
        keep_sells = i + 1;
        break;
    }
    proposal.sells.truncate(keep_sells);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PriceSize;
    use rust_decimal_macros::dec;

    fn multi_level_proposal() -> Proposal {
        Proposal::new(
            vec![
                PriceSize::new(dec!(99), dec!(1)),
                PriceSize::new(dec!(98), dec!(1)),
                PriceSize::new(dec!(97), dec!(1)),
            ],
            vec![
                PriceSize::new(dec!(101), dec!(1)),
                PriceSize::new(dec!(102), dec!(1)),
                PriceSize::new(dec!(103), dec!(1)),
            ],
        )
    }

    #[test]
    fn fully_funded_book_is_unchanged() {
        let mut p = multi_level_proposal();
        apply(&mut p, dec!(1000), dec!(1000), Decimal::ZERO);
        assert_eq!(p.buys.len(), 3);
        assert_eq!(p.sells.len(), 3);
    }

    #[test]
    fn partial_quote_balance_shrinks_boundary_level_and_drops_the_rest() {
        let mut p = multi_level_proposal();
        // Exactly enough for the first level (99) plus half of the second (98 * 0.5 = 49).
        apply(&mut p, dec!(148), dec!(1000), Decimal::ZERO);
        assert_eq!(p.buys.len(), 2);
        assert_eq!(p.buys[0].price, dec!(99));
        assert_eq!(p.buys[0].size, dec!(1));
        assert_eq!(p.buys[1].price, dec!(98));
        assert_eq!(p.buys[1].size, dec!(0.5));
    }

    #[test]
    fn fee_is_applied_to_quote_notional() {
        let mut p = Proposal::new(vec![PriceSize::new(dec!(100), dec!(1))], vec![]);
        // With a 1% fee, notional is 101, not 100; 100 available affords a 0.99... size.
        apply(&mut p, dec!(100), dec!(1000), dec!(0.01));
        assert_eq!(p.buys.len(), 1);
        assert_eq!(p.buys[0].size, dec!(100) / (dec!(100) * dec!(1.01)));
    }

    #[test]
    fn partial_base_balance_shrinks_boundary_sell() {
        let mut p = multi_level_proposal();
        apply(&mut p, dec!(1000), dec!(1.5), Decimal::ZERO);
        assert_eq!(p.sells.len(), 2);
        assert_eq!(p.sells[0].size, dec!(1));
        assert_eq!(p.sells[1].size, dec!(0.5));
    }

    #[test]
    fn zero_balance_clears_side() {
        let mut p = multi_level_proposal();
        apply(&mut p, Decimal::ZERO, dec!(1000), Decimal::ZERO);
        p.drop_zero_sizes();
        assert!(p.buys.is_empty());
        assert_eq!(p.sells.len(), 3);
    }

    #[test]
    fn negative_available_balance_is_treated_as_zero() {
        let mut p = multi_level_proposal();
        apply(&mut p, dec!(-5), dec!(-5), Decimal::ZERO);
        p.drop_zero_sizes();
        assert!(p.buys.is_empty());
        assert!(p.sells.is_empty());
    }
}
