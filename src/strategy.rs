//! C9 — top-level orchestrator. [`MarketMakingStrategy::tick`] is the single entry point
//! that ties the pricer, builder, modifier pipeline, refresh controller, hanging tracker,
//! and executor into one control loop per invocation.

use crate::adapter::{AssetPriceDelegate, InventoryCostDelegate, VenueAdapter};
use crate::config::StrategyConfig;
use crate::error::{ConfigError, TickError, VenueError};
use crate::events::{
    OrderCompletedEvent, OrderFilledEvent, OrderLifecycleSink, StrategyEvent,
};
use crate::executor::Executor;
use crate::pricer::ReferencePricer;
use crate::proposal::{self, builder::ProposalBuilder};
use crate::state::StrategyState;
use crate::types::{ActiveOrder, HangingOrderRef, OrderId, PriceType, Side};
use chrono::TimeZone;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

fn format_tick_time(now_ms: i64) -> String {
    chrono::Utc
        .timestamp_millis_opt(now_ms)
        .single()
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| now_ms.to_string())
}

/// What a single [`MarketMakingStrategy::tick`] did, for the caller to log or assert on.
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    pub reference_price: Decimal,
    pub placed: Vec<ActiveOrder>,
    pub cancelled: Vec<OrderId>,
}

pub struct MarketMakingStrategy<A: VenueAdapter> {
    pub adapter: A,
    pub pair: String,
    pub config: StrategyConfig,
    pub state: StrategyState,
    pub sink: Box<dyn OrderLifecycleSink>,
}

impl<A: VenueAdapter> MarketMakingStrategy<A> {
    pub fn new(
        adapter: A,
        config: StrategyConfig,
        sink: Box<dyn OrderLifecycleSink>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let pair = config.trading_pair.clone();
        Ok(Self {
            adapter,
            pair,
            config,
            state: StrategyState::new(),
            sink,
        })
    }

    /// Re-seeds active-order state after a restart. See
    /// [`StrategyState::restore_active_orders`] for the hanging-promotion rule.
    pub fn restore_active_orders(
        &mut self,
        orders: Vec<ActiveOrder>,
        hanging_entries: Vec<(OrderId, HangingOrderRef)>,
    ) {
        self.state.restore_active_orders(
            orders,
            hanging_entries,
            self.config.hanging_orders_enabled,
        );
    }

    /// Runs one full tick: price, propose, modify, reconcile, execute.
    pub async fn tick(
        &mut self,
        now_ms: i64,
        delegate: Option<&(impl AssetPriceDelegate + Sync)>,
        inventory_cost_delegate: Option<&(impl InventoryCostDelegate + Sync)>,
    ) -> Result<TickOutcome, TickError> {
        debug!(pair = %self.pair, at = %format_tick_time(now_ms), "tick start");
        self.state.reset_ping_pong_if_due();

        let inventory_cost_price = match &inventory_cost_delegate {
            Some(icd) => icd.get_price().await,
            None => None,
        };
        self.state.inventory_cost_price = inventory_cost_price;

        let pricer = ReferencePricer::new(&self.adapter, &self.pair);
        let reference_price = match pricer
            .price(
                self.config.price_type,
                self.state.last_own_trade_price,
                inventory_cost_price,
                delegate,
            )
            .await
        {
            Ok(price) => price,
            Err(VenueError::NotReady(reason)) => {
                warn!(pair = %self.pair, %reason, "venue not ready, tick skipped");
                return Err(TickError::VenueNotReady(reason));
            }
            Err(e) => return Err(TickError::from(e)),
        };

        let base_balance = self.adapter.get_balance(&self.config.base_asset).await?;
        if self.config.price_type == PriceType::InventoryCost
            && !base_balance.is_zero()
            && inventory_cost_price.is_none()
        {
            return Err(TickError::MissingInventoryCost);
        }

        let quote_balance = self.adapter.get_balance(&self.config.quote_asset).await?;
        let no_exclusions = std::collections::HashSet::new();
        let available_quote_balance = self
            .adapter
            .get_available_balance(&self.config.quote_asset)
            .await?
            + self.state.active_orders.reserved_notional(
                Side::Buy,
                &self.state.hanging,
                &no_exclusions,
            );
        let available_base_balance = self
            .adapter
            .get_available_balance(&self.config.base_asset)
            .await?
            + self.state.active_orders.reserved_notional(
                Side::Sell,
                &self.state.hanging,
                &no_exclusions,
            );

        let best_bid = self.adapter.get_price(&self.pair, true).await?;
        let best_ask = self.adapter.get_price(&self.pair, false).await?;

        let ask_reference = match inventory_cost_price {
            Some(cost) => cost.max(reference_price),
            None => reference_price,
        };

        let builder = ProposalBuilder::new(&self.config);
        let mut proposal = builder.build(reference_price, ask_reference);

        let maker_order_type = self.adapter.get_maker_order_type();
        let maker_fee = self
            .adapter
            .get_fee(
                &self.config.base_asset,
                &self.config.quote_asset,
                maker_order_type,
                Side::Buy,
                Decimal::ONE,
                reference_price,
            )
            .await?;

        let own_bid_top_size: Decimal = self
            .state
            .active_orders
            .non_hanging(&self.state.hanging)
            .filter(|o| o.side == Side::Buy)
            .map(|o| o.size)
            .sum();
        let own_ask_top_size: Decimal = self
            .state
            .active_orders
            .non_hanging(&self.state.hanging)
            .filter(|o| o.side == Side::Sell)
            .map(|o| o.size)
            .sum();

        // Order-price optimization reads the competing top from a volume-weighted book
        // query, not plain top-of-book: walk past our own resting size on that side plus
        // the configured depth before reading off a price other participants compete at.
        let (competing_top_bid, competing_top_ask) = if self.config.order_optimization_enabled {
            let bid_volume = own_bid_top_size + self.config.bid_order_optimization_depth;
            let ask_volume = own_ask_top_size + self.config.ask_order_optimization_depth;
            (
                self.adapter
                    .get_price_for_volume(&self.pair, true, bid_volume)
                    .await?,
                self.adapter
                    .get_price_for_volume(&self.pair, false, ask_volume)
                    .await?,
            )
        } else {
            (best_bid, best_ask)
        };

        let pipeline_inputs = proposal::PipelineInputs {
            reference_price,
            now_ms,
            filled_buys_balance: self.state.filled_buys_balance,
            filled_sells_balance: self.state.filled_sells_balance,
            best_bid,
            best_ask,
            competing_top_bid,
            competing_top_ask,
            price_tick: self.adapter.price_tick(&self.pair),
            maker_fee_pct: maker_fee.percent,
            base_balance,
            quote_balance,
            available_quote_balance,
            available_base_balance,
        };

        proposal::run(
            &mut proposal,
            &self.config,
            &mut self.state.moving_band,
            &pipeline_inputs,
        );

        let refresh_decision = crate::refresh::decide(
            &self.state.active_orders,
            &self.state.hanging,
            &proposal,
            &self.config,
            reference_price,
            now_ms,
        );

        let hanging_cancel_ids = self
            .state
            .hanging
            .due_for_cancel(reference_price, self.config.hanging_orders_cancel_pct);

        let had_buys = self
            .state
            .active_orders
            .non_hanging(&self.state.hanging)
            .any(|o| o.side == Side::Buy);
        let had_sells = self
            .state
            .active_orders
            .non_hanging(&self.state.hanging)
            .any(|o| o.side == Side::Sell);

        let executor = Executor::new(&self.adapter, &self.pair);

        let hanging_orders_enabled = self.config.hanging_orders_enabled;
        let mut cancelled = Vec::new();
        let mut cancelled_buy = false;
        let mut cancelled_sell = false;
        for id in refresh_decision.all_cancel_ids() {
            if let Some(order) = self.state.active_orders.get(&id) {
                match order.side {
                    Side::Buy => cancelled_buy = true,
                    Side::Sell => cancelled_sell = true,
                }
            }
            executor.cancel(&id, self.sink.as_ref()).await?;
            Self::remove_order(&mut self.state, hanging_orders_enabled, &id);
            cancelled.push(id);
        }
        for id in hanging_cancel_ids {
            executor.cancel(&id, self.sink.as_ref()).await?;
            Self::remove_order(&mut self.state, hanging_orders_enabled, &id);
            cancelled.push(id);
        }

        // Only (re)place a side if this tick cancelled something resting on it, or nothing
        // was resting there to begin with. An untouched, still-valid side keeps its live
        // orders rather than being re-quoted every tick (P4).
        if !(cancelled_buy || !had_buys) {
            proposal.buys.clear();
        }
        if !(cancelled_sell || !had_sells) {
            proposal.sells.clear();
        }

        let (placed, pairs) = if self
            .state
            .placement_allowed(now_ms, self.config.filled_order_delay_sec)
        {
            executor
                .place_proposal(&proposal, maker_order_type, now_ms, self.sink.as_ref())
                .await?
        } else {
            debug!(pair = %self.pair, "placement suppressed by fill delay");
            (Vec::new(), Vec::new())
        };

        for order in &placed {
            self.state.active_orders.insert(order.clone());
        }
        for pair in pairs {
            self.state.hanging.register_pair(&pair);
        }

        self.state.last_tick_ms = now_ms;

        info!(
            pair = %self.pair,
            reference_price = %reference_price,
            placed = placed.len(),
            cancelled = cancelled.len(),
            "tick complete"
        );

        Ok(TickOutcome {
            reference_price,
            placed,
            cancelled,
        })
    }

    /// Processes an out-of-band fill notification. A fill on a hanging order is logged
    /// and otherwise ignored — it must not touch the ping-pong counters or the fill-delay
    /// gate. Any other fill records the fill, advances the ping-pong balance, forwards to
    /// the inventory-cost delegate, and promotes a surviving pair partner to hanging when
    /// enabled.
    pub async fn on_fill(
        &mut self,
        id: &str,
        fill_price: Decimal,
        fill_size: Decimal,
        fee_amount: Decimal,
        now_ms: i64,
        inventory_cost_delegate: Option<&(impl InventoryCostDelegate + Sync)>,
    ) {
        let Some(order) = self.state.active_orders.remove(id) else {
            warn!(id, "fill reported for unknown order, ignoring");
            return;
        };

        if self.state.hanging.is_hanging(id) {
            self.state.hanging.remove(id);
            info!(id, side = ?order.side, price = %fill_price, size = %fill_size, "hanging order filled");
            return;
        }

        info!(id, side = ?order.side, price = %fill_price, size = %fill_size, "order filled");

        self.state.last_own_trade_price = Some(fill_price);
        self.state.last_fill_ms = Some(now_ms);
        match order.side {
            Side::Buy => self.state.filled_buys_balance += 1,
            Side::Sell => self.state.filled_sells_balance += 1,
        }

        let fill_event = OrderFilledEvent {
            id: id.to_string(),
            price: fill_price,
            size: fill_size,
            fee: fee_amount,
            side: order.side,
        };
        self.sink
            .emit(StrategyEvent::OrderFilled(fill_event.clone()));
        self.sink.emit(StrategyEvent::OrderCompleted(OrderCompletedEvent {
            id: id.to_string(),
            side: order.side,
            avg_price: fill_price,
        }));

        if let Some(icd) = inventory_cost_delegate {
            icd.process_order_fill_event(&fill_event).await;
        }

        Self::promote_surviving_partner(&mut self.state, self.config.hanging_orders_enabled, id);
    }

    fn remove_order(state: &mut StrategyState, hanging_orders_enabled: bool, id: &str) {
        state.active_orders.remove(id);
        state.hanging.remove(id);
        Self::promote_surviving_partner(state, hanging_orders_enabled, id);
    }

    fn promote_surviving_partner(
        state: &mut StrategyState,
        hanging_orders_enabled: bool,
        removed_id: &str,
    ) {
        if let Some(partner_id) = state.hanging.take_partner(removed_id) {
            if hanging_orders_enabled {
                if let Some(partner_order) = state.active_orders.get(&partner_id).cloned() {
                    state.hanging.promote(&partner_order);
                }
            }
        }
    }
}
