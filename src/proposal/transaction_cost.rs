//! Modifier stage 5 — transaction cost adjustment.
//!
//! Widens each level outward by the venue's maker fee so the quoted price still nets the
//! intended spread after fees: buys move down, sells move up, by `price * fee_pct`.

use crate::types::Proposal;
use rust_decimal::Decimal;

pub fn apply(proposal: &mut Proposal, enabled: bool, maker_fee_pct: Decimal) {
    if !enabled || maker_fee_pct.is_zero() {
        return;
    }

    for level in proposal.buys.iter_mut() {
        level.price -= level.price * maker_fee_pct;
    }
    for level in proposal.sells.iter_mut() {
        level.price += level.price * maker_fee_pct;
    }
}
