//! C7 — Refresh/Cancel Controller.
//!
//! Decides, once per tick, which currently active (non-hanging) orders must be cancelled:
//! because they've aged past `max_order_age_sec`, because their spread from the reference
//! price has fallen under `minimum_spread`, or because `order_refresh_time_sec` has elapsed
//! and the fresh proposal no longer matches what's resting within `order_refresh_tolerance_pct`.
//! Hanging orders are cancelled separately by [`crate::hanging::HangingOrdersTracker::due_for_cancel`]
//! and never appear here.

use crate::active_orders::ActiveOrderManager;
use crate::config::StrategyConfig;
use crate::constants::is_disabled;
use crate::hanging::HangingOrdersTracker;
use crate::types::{OrderId, Proposal, Side};
use rust_decimal::Decimal;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct RefreshDecision {
    pub max_age_cancel_ids: Vec<OrderId>,
    pub min_spread_cancel_ids: Vec<OrderId>,
    pub refresh_cancel_ids: Vec<OrderId>,
}

impl RefreshDecision {
    pub fn all_cancel_ids(&self) -> Vec<OrderId> {
        let mut ids = self.max_age_cancel_ids.clone();
        ids.extend(self.min_spread_cancel_ids.clone());
        ids.extend(self.refresh_cancel_ids.clone());
        ids.sort();
        ids.dedup();
        ids
    }
}

fn spread_from_reference(reference_price: Decimal, price: Decimal, side: Side) -> Decimal {
    if reference_price.is_zero() {
        return Decimal::ZERO;
    }
    match side {
        Side::Buy => (reference_price - price) / reference_price,
        Side::Sell => (price - reference_price) / reference_price,
    }
}

pub fn decide(
    active: &ActiveOrderManager,
    hanging: &HangingOrdersTracker,
    proposal: &Proposal,
    config: &StrategyConfig,
    reference_price: Decimal,
    now_ms: i64,
) -> RefreshDecision {
    let mut decision = RefreshDecision::default();
    let max_age = Duration::from_secs(config.max_order_age_sec);
    let min_spread_enabled = !is_disabled(config.minimum_spread);
    let refresh_age = Duration::from_secs(config.order_refresh_time_sec);
    let tolerance_disabled = is_disabled(config.order_refresh_tolerance_pct);

    for side in [Side::Buy, Side::Sell] {
        let mut orders: Vec<_> = active
            .non_hanging(hanging)
            .filter(|o| o.side == side)
            .collect();
        orders.sort_by(|a, b| match side {
            Side::Buy => b.price.cmp(&a.price),
            Side::Sell => a.price.cmp(&b.price),
        });

        // Max-age and min-spread cancels are decided per order; whatever survives both
        // goes on to the refresh/tolerance check below, which is all-or-nothing per side.
        let mut surviving = Vec::new();
        let mut refresh_due = false;
        for order in orders {
            if order.age(now_ms) >= max_age {
                decision.max_age_cancel_ids.push(order.id.clone());
                continue;
            }

            if min_spread_enabled {
                let spread = spread_from_reference(reference_price, order.price, side);
                if spread < config.minimum_spread {
                    decision.min_spread_cancel_ids.push(order.id.clone());
                    continue;
                }
            }

            if order.age(now_ms) >= refresh_age {
                refresh_due = true;
            }
            surviving.push(order);
        }

        if !refresh_due {
            continue;
        }

        let levels = proposal.side(side);
        let all_within_tolerance = !tolerance_disabled
            && surviving.len() == levels.len()
            && surviving.iter().zip(levels.iter()).all(|(order, level)| {
                if order.price.is_zero() {
                    false
                } else {
                    let diff = (level.price - order.price).abs() / order.price;
                    diff <= config.order_refresh_tolerance_pct
                }
            });

        if !all_within_tolerance {
            decision
                .refresh_cancel_ids
                .extend(surviving.iter().map(|o| o.id.clone()));
        }
    }

    decision
}
