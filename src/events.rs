//! Outbound events and the lifecycle sink the core emits them through.
//!
//! Event messages are a closed union with a discriminating tag (`StrategyEvent`) rather
//! than a dynamically-typed payload. Transport is adapter-defined: the host's
//! [`OrderLifecycleSink`] implementation decides whether to log, publish, or both.

use crate::types::{OrderId, Side};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPlacedEvent {
    pub side: Side,
    pub price: Decimal,
    pub size: Decimal,
    pub id: OrderId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCancelledEvent {
    pub id: OrderId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFilledEvent {
    pub id: OrderId,
    pub price: Decimal,
    pub size: Decimal,
    pub fee: Decimal,
    pub side: Side,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCompletedEvent {
    pub id: OrderId,
    pub side: Side,
    pub avg_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxAgeCancelEvent {
    pub id: OrderId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinSpreadCancelEvent {
    pub id: OrderId,
    pub spread: Decimal,
    pub threshold: Decimal,
}

/// The closed union of events the core can emit in a single tick or in response to an
/// inbound fill/cancel notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StrategyEvent {
    OrderPlaced(OrderPlacedEvent),
    OrderCancelled(OrderCancelledEvent),
    OrderFilled(OrderFilledEvent),
    OrderCompleted(OrderCompletedEvent),
    MaxAgeCancel(MaxAgeCancelEvent),
    MinSpreadCancel(MinSpreadCancelEvent),
}

/// Host-implemented sink for strategy events.
///
/// A default `emit` dispatches to the per-variant hooks, so a host can override just
/// `emit` for a single transport, or override individual hooks to route events to
/// different channels (e.g. fills to a ledger, cancels to a metrics counter).
pub trait OrderLifecycleSink: Send + Sync {
    fn emit(&self, event: StrategyEvent) {
        match event {
            StrategyEvent::OrderPlaced(e) => self.on_order_placed(e),
            StrategyEvent::OrderCancelled(e) => self.on_order_cancelled(e),
            StrategyEvent::OrderFilled(e) => self.on_order_filled(e),
            StrategyEvent::OrderCompleted(e) => self.on_order_completed(e),
            StrategyEvent::MaxAgeCancel(e) => self.on_max_age_cancel(e),
            StrategyEvent::MinSpreadCancel(e) => self.on_min_spread_cancel(e),
        }
    }

    fn on_order_placed(&self, _event: OrderPlacedEvent) {}
    fn on_order_cancelled(&self, _event: OrderCancelledEvent) {}
    fn on_order_filled(&self, _event: OrderFilledEvent) {}
    fn on_order_completed(&self, _event: OrderCompletedEvent) {}
    fn on_max_age_cancel(&self, _event: MaxAgeCancelEvent) {}
    fn on_min_spread_cancel(&self, _event: MinSpreadCancelEvent) {}
}

/// A sink that only records events in memory, for tests and for hosts that poll rather
/// than react.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: std::sync::Mutex<Vec<StrategyEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<StrategyEvent> {
        let mut events = self.events.lock().expect("recording sink mutex poisoned");
        std::mem::take(&mut events)
    }
}

impl OrderLifecycleSink for RecordingSink {
    fn emit(&self, event: StrategyEvent) {
        self.events
            .lock()
            .expect("recording sink mutex poisoned")
            .push(event);
    }
}
