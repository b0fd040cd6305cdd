//! C5 — Hanging-Orders Tracker.
//!
//! When a [`CreatedOrderPair`] is placed, both ids are registered as partners. Once one side
//! of a pair leaves the active set (filled or cancelled), its partner — if still active — is
//! the hanging candidate: the lone surviving order of a pair whose other side completed. The
//! caller ([`crate::strategy::MarketMakingStrategy`]) decides whether to actually promote it
//! (only when `hanging_orders_enabled`) and calls [`HangingOrdersTracker::promote`].

use crate::types::{ActiveOrder, CreatedOrderPair, HangingOrderRef, OrderId};
use rust_decimal::Decimal;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct HangingOrdersTracker {
    hanging: HashMap<OrderId, HangingOrderRef>,
    partner_of: HashMap<OrderId, OrderId>,
}

impl HangingOrdersTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_pair(&mut self, pair: &CreatedOrderPair) {
        self.partner_of
            .insert(pair.buy_id.clone(), pair.sell_id.clone());
        self.partner_of
            .insert(pair.sell_id.clone(), pair.buy_id.clone());
    }

    /// Call when `id` leaves the active set. Returns its registered partner, if any, and
    /// forgets the pairing either way — a pair resolves at most once.
    pub fn take_partner(&mut self, id: &str) -> Option<OrderId> {
        let partner = self.partner_of.remove(id)?;
        self.partner_of.remove(&partner);
        Some(partner)
    }

    pub fn promote(&mut self, order: &ActiveOrder) {
        self.hanging.insert(
            order.id.clone(),
            HangingOrderRef {
                price: order.price,
                side: order.side,
                size: order.size,
            },
        );
    }

    pub fn is_hanging(&self, id: &str) -> bool {
        self.hanging.contains_key(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<HangingOrderRef> {
        self.hanging.remove(id)
    }

    pub fn len(&self) -> usize {
        self.hanging.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hanging.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &OrderId> {
        self.hanging.keys()
    }

    /// Hanging orders whose price has drifted from `reference_price` by at least
    /// `cancel_pct` (a fraction, not a percentage point) — due for cancellation.
    pub fn due_for_cancel(&self, reference_price: Decimal, cancel_pct: Decimal) -> Vec<OrderId> {
        if reference_price.is_zero() {
            return Vec::new();
        }
        self.hanging
            .iter()
            .filter(|(_, r)| {
                let drift = (r.price - reference_price).abs() / reference_price;
                drift >= cancel_pct
            })
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Re-seeds hanging state after a restart, as produced by
    /// [`crate::strategy::MarketMakingStrategy::restore_active_orders`].
    pub fn restore(&mut self, entries: Vec<(OrderId, HangingOrderRef)>) {
        self.hanging.extend(entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;
    use rust_decimal_macros::dec;

    fn order(id: &str, side: Side, price: Decimal) -> ActiveOrder {
        ActiveOrder {
            id: id.to_string(),
            side,
            price,
            size: dec!(1),
            created_at_ms: 0,
        }
    }

    #[test]
    fn filled_sides_surface_surviving_partner() {
        let mut tracker = HangingOrdersTracker::new();
        tracker.register_pair(&CreatedOrderPair {
            buy_id: "b1".into(),
            sell_id: "s1".into(),
        });
        let partner = tracker.take_partner("b1");
        assert_eq!(partner, Some("s1".to_string()));
    }

    #[test]
    fn pair_resolves_only_once() {
        let mut tracker = HangingOrdersTracker::new();
        tracker.register_pair(&CreatedOrderPair {
            buy_id: "b1".into(),
            sell_id: "s1".into(),
        });
        tracker.take_partner("b1");
        assert_eq!(tracker.take_partner("s1"), None);
    }

    #[test]
    fn promoted_order_is_reported_hanging() {
        let mut tracker = HangingOrdersTracker::new();
        tracker.promote(&order("s1", Side::Sell, dec!(101)));
        assert!(tracker.is_hanging("s1"));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn cancellation_triggers_past_drift_threshold() {
        let mut tracker = HangingOrdersTracker::new();
        tracker.promote(&order("s1", Side::Sell, dec!(110)));
        let due = tracker.due_for_cancel(dec!(100), dec!(0.05));
        assert_eq!(due, vec!["s1".to_string()]);
    }

    #[test]
    fn no_cancellation_within_tolerance() {
        let mut tracker = HangingOrdersTracker::new();
        tracker.promote(&order("s1", Side::Sell, dec!(101)));
        let due = tracker.due_for_cancel(dec!(100), dec!(0.05));
        assert!(due.is_empty());
    }

    #[test]
    fn restore_seeds_hanging_state() {
        let mut tracker = HangingOrdersTracker::new();
        tracker.restore(vec![(
            "s1".to_string(),
            HangingOrderRef {
                price: dec!(101),
                side: Side::Sell,
                size: dec!(1),
            },
        )]);
        assert!(tracker.is_hanging("s1"));
    }
}
