//! C6 — Active-Order Manager: the live-order book of everything this strategy currently has
//! resting at the venue, indexed by id.

use crate::hanging::HangingOrdersTracker;
use crate::types::{ActiveOrder, OrderId, Side};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct ActiveOrderManager {
    orders: HashMap<OrderId, ActiveOrder>,
}

impl ActiveOrderManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, order: ActiveOrder) {
        self.orders.insert(order.id.clone(), order);
    }

    pub fn remove(&mut self, id: &str) -> Option<ActiveOrder> {
        self.orders.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&ActiveOrder> {
        self.orders.get(id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveOrder> {
        self.orders.values()
    }

    pub fn by_side(&self, side: Side) -> impl Iterator<Item = &ActiveOrder> {
        self.orders.values().filter(move |o| o.side == side)
    }

    pub fn hanging<'a>(
        &'a self,
        hanging: &'a HangingOrdersTracker,
    ) -> impl Iterator<Item = &'a ActiveOrder> {
        self.orders.values().filter(move |o| hanging.is_hanging(&o.id))
    }

    pub fn non_hanging<'a>(
        &'a self,
        hanging: &'a HangingOrdersTracker,
    ) -> impl Iterator<Item = &'a ActiveOrder> {
        self.orders
            .values()
            .filter(move |o| !hanging.is_hanging(&o.id))
    }

    /// Quote/base notional locked up by orders on `side` that are neither hanging nor in
    /// `exclude_ids`. These orders are about to be superseded by this tick's proposal, so
    /// their reserved capital is added back to the venue-reported available balance before
    /// the budget stage runs — otherwise a resting order would count against the new
    /// proposal's budget twice.
    pub fn reserved_notional(
        &self,
        side: Side,
        hanging: &HangingOrdersTracker,
        exclude_ids: &HashSet<OrderId>,
    ) -> Decimal {
        self.orders
            .values()
            .filter(|o| o.side == side)
            .filter(|o| !hanging.is_hanging(&o.id))
            .filter(|o| !exclude_ids.contains(&o.id))
            .map(|o| match side {
                Side::Buy => o.price * o.size,
                Side::Sell => o.size,
            })
            .sum()
    }

    pub fn orders_older_than(&self, now_ms: i64, max_age: std::time::Duration) -> Vec<OrderId> {
        self.orders
            .values()
            .filter(|o| o.age(now_ms) >= max_age)
            .map(|o| o.id.clone())
            .collect()
    }
}
