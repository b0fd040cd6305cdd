//! Modifier stage 3 — ping-pong (fill-alternation).
//!
//! Drops the first `min(b, len(buys))` buy levels and `min(s, len(sells))` sell levels,
//! where `b`/`s` are the filled-buy/sell balances. When the balances are equal, the caller
//! resets both to zero on the *next* tick (not here — the reset decision needs to see the
//! balances as they were going into this tick, per I3).

use crate::types::Proposal;

pub fn apply(proposal: &mut Proposal, filled_buys_balance: u32, filled_sells_balance: u32) {
    let drop_buys = (filled_buys_balance as usize).min(proposal.buys.len());
    proposal.buys.drain(0..drop_buys);

    let drop_sells = (filled_sells_balance as usize).min(proposal.sells.len());
    proposal.sells.drain(0..drop_sells);
}

/// True if both balances are equal and thus should be reset to zero on the next tick (I3).
pub fn should_reset(filled_buys_balance: u32, filled_sells_balance: u32) -> bool {
    filled_buys_balance == filled_sells_balance
}
