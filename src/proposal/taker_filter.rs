//! Modifier stage 8 — taker filter.
//!
//! Drops any remaining buy level priced at or above the current best ask (it would take
//! instead of make), and symmetrically drops sell levels priced at or below the best bid.
//! Runs last so every earlier stage's price movement is checked against the live book before
//! anything is handed to the executor.

use crate::types::Proposal;
use rust_decimal::Decimal;

pub fn apply(proposal: &mut Proposal, best_bid: Decimal, best_ask: Decimal) {
    proposal.buys.retain(|level| level.price < best_ask);
    proposal.sells.retain(|level| level.price > best_bid);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PriceSize;
    use rust_decimal_macros::dec;

    #[test]
    fn drops_buy_levels_that_would_cross_the_ask() {
        let mut p = Proposal::new(
            vec![
                PriceSize::new(dec!(99), dec!(1)),
                PriceSize::new(dec!(101), dec!(1)),
            ],
            vec![],
        );
        apply(&mut p, dec!(98), dec!(100));
        assert_eq!(p.buys.len(), 1);
        assert_eq!(p.buys[0].price, dec!(99));
    }

    #[test]
    fn drops_sell_levels_that_would_cross_the_bid() {
        let mut p = Proposal::new(
            vec![],
            vec![
                PriceSize::new(dec!(101), dec!(1)),
                PriceSize::new(dec!(99), dec!(1)),
            ],
        );
        apply(&mut p, dec!(100), dec!(102));
        assert_eq!(p.sells.len(), 1);
        assert_eq!(p.sells[0].price, dec!(101));
    }

    #[test]
    fn price_exactly_at_touch_is_filtered() {
        let mut p = Proposal::new(
            vec![PriceSize::new(dec!(100), dec!(1))],
            vec![PriceSize::new(dec!(100), dec!(1))],
        );
        apply(&mut p, dec!(100), dec!(100));
        assert!(p.buys.is_empty());
        assert!(p.sells.is_empty());
    }

    #[test]
    fn well_inside_spread_is_kept() {
        let mut p = Proposal::new(
            vec![PriceSize::new(dec!(99), dec!(1))],
            vec![PriceSize::new(dec!(101), dec!(1))],
        );
        apply(&mut p, dec!(99.5), dec!(100.5));
        assert_eq!(p.buys.len(), 1);
        assert_eq!(p.sells.len(), 1);
    }
}
