//! C4 — Proposal Modifiers: a fixed-order pipeline of eight stages applied to the proposal
//! emitted by the [`builder`]. The order below is load-bearing and must never be permuted
//! by a caller: static band, moving band, ping-pong, order-price optimization, transaction
//! cost, inventory skew, budget, taker filter.

pub mod bands;
pub mod budget;
pub mod builder;
pub mod inventory_skew;
pub mod moving_band;
pub mod optimization;
pub mod ping_pong;
pub mod taker_filter;
pub mod transaction_cost;

use crate::config::StrategyConfig;
use crate::types::Proposal;
use moving_band::MovingPriceBandState;
use optimization::{OptimizationParams, SplitLevelSpreads};
use rust_decimal::Decimal;

/// Everything the pipeline needs that isn't already in [`StrategyConfig`]: current market
/// state and balances, gathered by the caller (normally [`crate::strategy::MarketMakingStrategy::tick`])
/// before modifiers run.
pub struct PipelineInputs {
    pub reference_price: Decimal,
    pub now_ms: i64,

    pub filled_buys_balance: u32,
    pub filled_sells_balance: u32,

    pub best_bid: Decimal,
    pub best_ask: Decimal,
    /// Depth-weighted price the caller queried from the venue at a volume of its own
    /// resting bid size plus the configured optimization depth — not plain top-of-book.
    pub competing_top_bid: Decimal,
    /// Same as `competing_top_bid`, for the ask side.
    pub competing_top_ask: Decimal,
    pub price_tick: Decimal,

    pub maker_fee_pct: Decimal,

    pub base_balance: Decimal,
    pub quote_balance: Decimal,
    pub available_quote_balance: Decimal,
    pub available_base_balance: Decimal,
}

/// Runs all eight modifier stages over `proposal` in the fixed required order, mutating it
/// in place. `band_state` carries the moving-band's cross-tick anchor.
pub fn run(
    proposal: &mut Proposal,
    config: &StrategyConfig,
    band_state: &mut MovingPriceBandState,
    inputs: &PipelineInputs,
) {
    bands::apply(
        proposal,
        inputs.reference_price,
        config.price_ceiling,
        config.price_floor,
    );

    band_state.apply(
        proposal,
        &config.moving_price_band,
        inputs.reference_price,
        inputs.now_ms,
    );

    if config.ping_pong_enabled {
        ping_pong::apply(
            proposal,
            inputs.filled_buys_balance,
            inputs.filled_sells_balance,
        );
    }

    let optimization_params = OptimizationParams {
        enabled: config.order_optimization_enabled,
        order_level_spread: config.order_level_spread,
        split_enabled: config.split_order_levels_enabled,
        split: SplitLevelSpreads {
            bid_spreads_pct: config.bid_order_level_spreads.clone(),
            ask_spreads_pct: config.ask_order_level_spreads.clone(),
        },
    };
    optimization::apply(
        proposal,
        &optimization_params,
        inputs.competing_top_bid,
        inputs.competing_top_ask,
        inputs.price_tick,
    );

    transaction_cost::apply(
        proposal,
        config.add_transaction_costs_to_orders,
        inputs.maker_fee_pct,
    );

    let skew_inputs = inventory_skew::InventorySkewInputs {
        enabled: config.inventory_skew_enabled,
        base_balance: inputs.base_balance,
        quote_balance: inputs.quote_balance,
        price: inputs.reference_price,
        target_base_pct: config.inventory_target_base_pct,
        order_amount: config.order_amount,
        order_levels: config.order_levels,
        range_multiplier: config.inventory_range_multiplier,
    };
    inventory_skew::apply(proposal, &skew_inputs);
    proposal.drop_zero_sizes();

    budget::apply(
        proposal,
        inputs.available_quote_balance,
        inputs.available_base_balance,
        inputs.maker_fee_pct,
    );

    if !config.take_if_crossed {
        taker_filter::apply(proposal, inputs.best_bid, inputs.best_ask);
    }

    proposal.drop_zero_sizes();
}
