//! C8 — Executor: turns a finished [`Proposal`] and a list of cancel ids into venue calls,
//! enforcing placement preconditions (quantization, minimums) and emitting lifecycle events.

use crate::adapter::VenueAdapter;
use crate::error::VenueError;
use crate::events::{
    OrderCancelledEvent, OrderLifecycleSink, OrderPlacedEvent, StrategyEvent,
};
use crate::quantizer::Quantizer;
use crate::types::{ActiveOrder, CreatedOrderPair, OrderType, Proposal, Side};
use rust_decimal::Decimal;
use tracing::{debug, warn};

pub struct Executor<'a, A: VenueAdapter> {
    adapter: &'a A,
    pair: &'a str,
    quantizer: Quantizer<'a, A>,
}

impl<'a, A: VenueAdapter> Executor<'a, A> {
    pub fn new(adapter: &'a A, pair: &'a str) -> Self {
        Self {
            adapter,
            pair,
            quantizer: Quantizer::new(adapter),
        }
    }

    pub async fn cancel(
        &self,
        id: &str,
        sink: &dyn OrderLifecycleSink,
    ) -> Result<(), VenueError> {
        self.adapter.cancel_order(self.pair, &id.to_string()).await?;
        debug!(pair = %self.pair, id, "order cancelled");
        sink.emit(StrategyEvent::OrderCancelled(OrderCancelledEvent {
            id: id.to_string(),
        }));
        Ok(())
    }

    /// Quantizes and places every level of `proposal`, skipping levels that fail minimums
    /// after quantization (I5). Buy/sell levels that share an index are recorded as a
    /// [`CreatedOrderPair`] so the hanging-orders tracker can register them.
    pub async fn place_proposal(
        &self,
        proposal: &Proposal,
        order_type: OrderType,
        now_ms: i64,
        sink: &dyn OrderLifecycleSink,
    ) -> Result<(Vec<ActiveOrder>, Vec<CreatedOrderPair>), VenueError> {
        let levels = proposal.buys.len().max(proposal.sells.len());
        let mut placed = Vec::new();
        let mut pairs = Vec::new();

        for i in 0..levels {
            let buy_id = if let Some(level) = proposal.buys.get(i) {
                self.place_one(Side::Buy, level.price, level.size, order_type, now_ms, sink)
                    .await?
                    .map(|order| {
                        let id = order.id.clone();
                        placed.push(order);
                        id
                    })
            } else {
                None
            };

            let sell_id = if let Some(level) = proposal.sells.get(i) {
                self.place_one(Side::Sell, level.price, level.size, order_type, now_ms, sink)
                    .await?
                    .map(|order| {
                        let id = order.id.clone();
                        placed.push(order);
                        id
                    })
            } else {
                None
            };

            if let (Some(buy_id), Some(sell_id)) = (buy_id, sell_id) {
                pairs.push(CreatedOrderPair { buy_id, sell_id });
            }
        }

        Ok((placed, pairs))
    }

    async fn place_one(
        &self,
        side: Side,
        price: Decimal,
        size: Decimal,
        order_type: OrderType,
        now_ms: i64,
        sink: &dyn OrderLifecycleSink,
    ) -> Result<Option<ActiveOrder>, VenueError> {
        let price = self.quantizer.quantize_price(self.pair, price);
        let size = self.quantizer.quantize_size(self.pair, size, Some(price));

        if !self.quantizer.meets_minimums(self.pair, size, price) {
            warn!(pair = %self.pair, ?side, %price, %size, "level below venue minimums, skipped");
            return Ok(None);
        }

        let id = self
            .adapter
            .place_limit_order(self.pair, side, size, price, order_type)
            .await?;
        debug!(pair = %self.pair, id, ?side, %price, %size, "order placed");

        sink.emit(StrategyEvent::OrderPlaced(OrderPlacedEvent {
            side,
            price,
            size,
            id: id.clone(),
        }));

        Ok(Some(ActiveOrder {
            id,
            side,
            price,
            size,
            created_at_ms: now_ms,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingSink;
    use crate::mock::MockVenueAdapter;
    use crate::types::PriceSize;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn places_every_level_and_pairs_matching_indices() {
        let venue = MockVenueAdapter::new();
        let executor = Executor::new(&venue, "BTC-USDT");
        let sink = RecordingSink::new();
        let proposal = Proposal::new(
            vec![PriceSize::new(dec!(99), dec!(1))],
            vec![PriceSize::new(dec!(101), dec!(1))],
        );

        let (placed, pairs) = executor
            .place_proposal(&proposal, OrderType::Limit, 0, &sink)
            .await
            .unwrap();

        assert_eq!(placed.len(), 2);
        assert_eq!(pairs.len(), 1);
        assert_eq!(sink.drain().len(), 2);
    }

    #[tokio::test]
    async fn level_below_minimums_is_skipped_without_pairing() {
        let mut venue = MockVenueAdapter::new();
        venue.min_notional = dec!(1000);
        let executor = Executor::new(&venue, "BTC-USDT");
        let sink = RecordingSink::new();
        let proposal = Proposal::new(
            vec![PriceSize::new(dec!(99), dec!(1))],
            vec![PriceSize::new(dec!(101), dec!(1))],
        );

        let (placed, pairs) = executor
            .place_proposal(&proposal, OrderType::Limit, 0, &sink)
            .await
            .unwrap();

        assert!(placed.is_empty());
        assert!(pairs.is_empty());
    }

    #[tokio::test]
    async fn cancel_emits_cancelled_event() {
        let venue = MockVenueAdapter::new();
        let executor = Executor::new(&venue, "BTC-USDT");
        let sink = RecordingSink::new();
        executor.cancel("mock-1", &sink).await.unwrap();
        let events = sink.drain();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], StrategyEvent::OrderCancelled(_)));
    }

    #[tokio::test]
    async fn placement_failure_propagates_as_venue_error() {
        let venue = MockVenueAdapter::new();
        *venue.fail_placement.lock().unwrap() = true;
        let executor = Executor::new(&venue, "BTC-USDT");
        let sink = RecordingSink::new();
        let proposal = Proposal::new(vec![PriceSize::new(dec!(99), dec!(1))], vec![]);
        let result = executor
            .place_proposal(&proposal, OrderType::Limit, 0, &sink)
            .await;
        assert!(result.is_err());
    }
}
