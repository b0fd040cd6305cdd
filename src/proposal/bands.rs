//! Modifier stage 1 — static price band.
//!
//! If `price_ceiling > 0` and the reference price has reached or exceeded it, clear buys
//! (we are too deep into the band to keep bidding). Symmetrically for `price_floor` and
//! sells. The disabled sentinel (`-1`) and zero both mean "no band on this side".

use crate::constants::is_disabled;
use crate::types::Proposal;
use rust_decimal::Decimal;

pub fn apply(proposal: &mut Proposal, reference_price: Decimal, ceiling: Decimal, floor: Decimal) {
    let ceiling_active = !is_disabled(ceiling) && ceiling > Decimal::ZERO;
    if ceiling_active && reference_price >= ceiling {
        proposal.buys.clear();
    }

    let floor_active = !is_disabled(floor) && floor > Decimal::ZERO;
    if floor_active && reference_price <= floor {
        proposal.sells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DISABLED;
    use crate::types::PriceSize;
    use rust_decimal_macros::dec;

    fn sample_proposal() -> Proposal {
        Proposal::new(
            vec![PriceSize::new(dec!(99), dec!(1))],
            vec![PriceSize::new(dec!(101), dec!(1))],
        )
    }

    #[test]
    fn ceiling_breach_clears_buys_only() {
        let mut p = sample_proposal();
        apply(&mut p, dec!(106), dec!(105), DISABLED);
        assert!(p.buys.is_empty());
        assert_eq!(p.sells.len(), 1);
    }

    #[test]
    fn floor_breach_clears_sells_only() {
        let mut p = sample_proposal();
        apply(&mut p, dec!(94), DISABLED, dec!(95));
        assert_eq!(p.buys.len(), 1);
        assert!(p.sells.is_empty());
    }

    #[test]
    fn disabled_bands_never_clear() {
        let mut p = sample_proposal();
        apply(&mut p, dec!(1_000_000), DISABLED, DISABLED);
        assert_eq!(p.buys.len(), 1);
        assert_eq!(p.sells.len(), 1);
    }

    #[test]
    fn price_below_ceiling_keeps_buys() {
        let mut p = sample_proposal();
        apply(&mut p, dec!(100), dec!(105), DISABLED);
        assert_eq!(p.buys.len(), 1);
    }
}
