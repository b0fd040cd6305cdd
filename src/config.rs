//! Strategy configuration.
//!
//! One field per row of the configuration table; validated once at construction via
//! [`StrategyConfig::validate`], matching the "Configuration error" entry in the error
//! taxonomy: invariants are checked before the engine is allowed to start, never mid-run.

use crate::constants::{is_disabled, DISABLED};
use crate::error::ConfigError;
use crate::types::{OrderOverride, PriceType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingPriceBandConfig {
    pub enabled: bool,
    pub ceiling_pct: Decimal,
    pub floor_pct: Decimal,
    pub refresh_interval_sec: u64,
}

impl Default for MovingPriceBandConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ceiling_pct: Decimal::ZERO,
            floor_pct: Decimal::ZERO,
            refresh_interval_sec: 3600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub trading_pair: String,
    pub base_asset: String,
    pub quote_asset: String,

    pub bid_spread: Decimal,
    pub ask_spread: Decimal,
    pub order_amount: Decimal,
    pub order_levels: u32,
    pub order_level_spread: Decimal,
    pub order_level_amount: Decimal,

    pub order_refresh_time_sec: u64,
    pub max_order_age_sec: u64,
    /// `-1` (the disabled sentinel) disables the refresh-tolerance keep-alive entirely.
    pub order_refresh_tolerance_pct: Decimal,
    pub filled_order_delay_sec: u64,

    pub inventory_skew_enabled: bool,
    pub inventory_target_base_pct: Decimal,
    pub inventory_range_multiplier: Decimal,

    pub hanging_orders_enabled: bool,
    pub hanging_orders_cancel_pct: Decimal,

    pub order_optimization_enabled: bool,
    pub bid_order_optimization_depth: Decimal,
    pub ask_order_optimization_depth: Decimal,

    pub add_transaction_costs_to_orders: bool,

    pub price_type: PriceType,
    pub take_if_crossed: bool,

    /// `-1` (the disabled sentinel) disables the static price band on that side.
    pub price_ceiling: Decimal,
    pub price_floor: Decimal,

    pub ping_pong_enabled: bool,
    pub minimum_spread: Decimal,

    pub order_override: HashMap<String, OrderOverride>,

    pub split_order_levels_enabled: bool,
    pub bid_order_level_spreads: Vec<Decimal>,
    pub ask_order_level_spreads: Vec<Decimal>,

    pub should_wait_order_cancel_confirmation: bool,

    pub moving_price_band: MovingPriceBandConfig,
}

impl StrategyConfig {
    /// Validates configuration invariants that must hold before the engine is allowed to
    /// run. Mirrors `ConfigError`'s variants one-to-one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.order_levels == 0 {
            return Err(ConfigError::NoLevels(self.order_levels));
        }

        let non_negative = [
            ("bid_spread", self.bid_spread),
            ("ask_spread", self.ask_spread),
            ("order_amount", self.order_amount),
            ("order_level_spread", self.order_level_spread),
            ("order_level_amount", self.order_level_amount),
            ("inventory_range_multiplier", self.inventory_range_multiplier),
            ("minimum_spread", self.minimum_spread),
        ];
        for (field, value) in non_negative {
            if value.is_sign_negative() {
                return Err(ConfigError::NegativeValue {
                    field,
                    value: value.to_string(),
                });
            }
        }

        if self.inventory_target_base_pct.is_sign_negative()
            || self.inventory_target_base_pct > Decimal::ONE
        {
            return Err(ConfigError::TargetOutOfRange(
                self.inventory_target_base_pct.to_string(),
            ));
        }

        if !is_disabled(self.order_refresh_tolerance_pct)
            && self.order_refresh_tolerance_pct.is_sign_negative()
        {
            return Err(ConfigError::InvalidTolerance(
                self.order_refresh_tolerance_pct.to_string(),
            ));
        }

        if self.hanging_orders_enabled && self.hanging_orders_cancel_pct.is_sign_negative() {
            return Err(ConfigError::InvalidHangingCancelPct(
                self.hanging_orders_cancel_pct.to_string(),
            ));
        }

        let ceiling_enabled = !is_disabled(self.price_ceiling) && self.price_ceiling > Decimal::ZERO;
        let floor_enabled = !is_disabled(self.price_floor) && self.price_floor > Decimal::ZERO;
        if ceiling_enabled && floor_enabled && self.price_ceiling < self.price_floor {
            return Err(ConfigError::CeilingBelowFloor {
                ceiling: self.price_ceiling.to_string(),
                floor: self.price_floor.to_string(),
            });
        }

        Ok(())
    }
}

impl Default for StrategyConfig {
    /// A minimal, valid configuration: single-level symmetric quoting, every optional
    /// modifier disabled. Intended as a base for tests and examples to override fields on.
    fn default() -> Self {
        Self {
            trading_pair: "BTC-USDT".to_string(),
            base_asset: "BTC".to_string(),
            quote_asset: "USDT".to_string(),
            bid_spread: Decimal::new(1, 2),
            ask_spread: Decimal::new(1, 2),
            order_amount: Decimal::ONE,
            order_levels: 1,
            order_level_spread: Decimal::ZERO,
            order_level_amount: Decimal::ZERO,
            order_refresh_time_sec: 30,
            max_order_age_sec: 1800,
            order_refresh_tolerance_pct: DISABLED,
            filled_order_delay_sec: 60,
            inventory_skew_enabled: false,
            inventory_target_base_pct: Decimal::new(5, 1),
            inventory_range_multiplier: Decimal::ONE,
            hanging_orders_enabled: false,
            hanging_orders_cancel_pct: Decimal::new(10, 2),
            order_optimization_enabled: false,
            bid_order_optimization_depth: Decimal::ZERO,
            ask_order_optimization_depth: Decimal::ZERO,
            add_transaction_costs_to_orders: false,
            price_type: PriceType::Mid,
            take_if_crossed: false,
            price_ceiling: DISABLED,
            price_floor: DISABLED,
            ping_pong_enabled: false,
            minimum_spread: DISABLED,
            order_override: HashMap::new(),
            split_order_levels_enabled: false,
            bid_order_level_spreads: Vec::new(),
            ask_order_level_spreads: Vec::new(),
            should_wait_order_cancel_confirmation: true,
            moving_price_band: MovingPriceBandConfig::default(),
        }
    }
}
