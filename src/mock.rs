//! An in-memory [`VenueAdapter`] for tests and examples.
//!
//! Mirrors the shape of the grounding crate's mock-friendly `BinanceClient` (constructible
//! with explicit, deterministic settings rather than live credentials) but implements the
//! strategy core's adapter trait instead of an HTTP client. Not gated behind `cfg(test)`
//! so integration tests and downstream examples can depend on it directly.

use crate::adapter::VenueAdapter;
use crate::error::VenueError;
use crate::types::{Fee, OrderId, OrderType, Side};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub pair: String,
    pub side: Side,
    pub size: Decimal,
    pub price: Decimal,
}

/// A deterministic, single-symbol mock venue. Best bid/ask, balances, tick/lot, and fee
/// are all set directly by the test; `place_limit_order` records the call and hands back a
/// sequential id instead of talking to anything.
pub struct MockVenueAdapter {
    pub best_bid: Mutex<Decimal>,
    pub best_ask: Mutex<Decimal>,
    pub balances: Mutex<HashMap<String, Decimal>>,
    pub available_balances: Mutex<HashMap<String, Decimal>>,
    pub price_tick: Decimal,
    pub lot_step: Decimal,
    pub min_order_size: Decimal,
    pub min_notional: Decimal,
    pub fee: Fee,
    pub maker_order_type: OrderType,
    pub placed: Mutex<Vec<PlacedOrder>>,
    pub cancelled: Mutex<Vec<OrderId>>,
    pub next_id: Mutex<u64>,
    pub fail_placement: Mutex<bool>,
    pub ready: Mutex<bool>,
}

impl Default for MockVenueAdapter {
    fn default() -> Self {
        Self {
            best_bid: Mutex::new(Decimal::new(9999, 2)),
            best_ask: Mutex::new(Decimal::new(10001, 2)),
            balances: Mutex::new(HashMap::new()),
            available_balances: Mutex::new(HashMap::new()),
            price_tick: Decimal::new(1, 2),
            lot_step: Decimal::new(1, 4),
            min_order_size: Decimal::new(1, 4),
            min_notional: Decimal::ZERO,
            fee: Fee::zero(),
            maker_order_type: OrderType::Limit,
            placed: Mutex::new(Vec::new()),
            cancelled: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
            fail_placement: Mutex::new(false),
            ready: Mutex::new(true),
        }
    }
}

impl MockVenueAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mid(mid: Decimal, spread: Decimal) -> Self {
        let half = spread / Decimal::new(2, 0);
        let mock = Self::default();
        *mock.best_bid.lock().unwrap() = mid - half;
        *mock.best_ask.lock().unwrap() = mid + half;
        mock
    }

    pub fn set_balance(&self, asset: &str, total: Decimal, available: Decimal) {
        self.balances
            .lock()
            .unwrap()
            .insert(asset.to_string(), total);
        self.available_balances
            .lock()
            .unwrap()
            .insert(asset.to_string(), available);
    }

    pub fn set_not_ready(&self) {
        *self.ready.lock().unwrap() = false;
    }

    pub fn placed_orders(&self) -> Vec<PlacedOrder> {
        self.placed.lock().unwrap().clone()
    }
}

fn round_half_even(value: Decimal, tick: Decimal) -> Decimal {
    if tick.is_zero() {
        return value;
    }
    (value / tick).round() * tick
}

fn floor_to_step(value: Decimal, step: Decimal) -> Decimal {
    if step.is_zero() {
        return value;
    }
    (value / step).floor() * step
}

impl VenueAdapter for MockVenueAdapter {
    async fn get_price(&self, _pair: &str, is_buy: bool) -> Result<Decimal, VenueError> {
        if !*self.ready.lock().unwrap() {
            return Err(VenueError::NotReady("mock venue not ready".to_string()));
        }
        Ok(if is_buy {
            *self.best_bid.lock().unwrap()
        } else {
            *self.best_ask.lock().unwrap()
        })
    }

    async fn get_price_for_volume(
        &self,
        pair: &str,
        is_buy: bool,
        _volume: Decimal,
    ) -> Result<Decimal, VenueError> {
        self.get_price(pair, is_buy).await
    }

    async fn get_balance(&self, asset: &str) -> Result<Decimal, VenueError> {
        Ok(*self
            .balances
            .lock()
            .unwrap()
            .get(asset)
            .unwrap_or(&Decimal::ZERO))
    }

    async fn get_available_balance(&self, asset: &str) -> Result<Decimal, VenueError> {
        Ok(*self
            .available_balances
            .lock()
            .unwrap()
            .get(asset)
            .unwrap_or(&Decimal::ZERO))
    }

    async fn get_mid_price(&self, _pair: &str) -> Result<Decimal, VenueError> {
        if !*self.ready.lock().unwrap() {
            return Err(VenueError::NotReady("mock venue not ready".to_string()));
        }
        let bid = *self.best_bid.lock().unwrap();
        let ask = *self.best_ask.lock().unwrap();
        Ok((bid + ask) / Decimal::new(2, 0))
    }

    fn get_maker_order_type(&self) -> OrderType {
        self.maker_order_type
    }

    fn quantize_order_price(&self, _pair: &str, price: Decimal) -> Decimal {
        round_half_even(price, self.price_tick)
    }

    fn quantize_order_amount(
        &self,
        _pair: &str,
        amount: Decimal,
        _price: Option<Decimal>,
    ) -> Decimal {
        floor_to_step(amount, self.lot_step)
    }

    fn min_order_size(&self, _pair: &str) -> Decimal {
        self.min_order_size
    }

    fn min_notional(&self, _pair: &str) -> Decimal {
        self.min_notional
    }

    fn price_tick(&self, _pair: &str) -> Decimal {
        self.price_tick
    }

    async fn get_fee(
        &self,
        _base: &str,
        _quote: &str,
        _order_type: OrderType,
        _side: Side,
        _size: Decimal,
        _price: Decimal,
    ) -> Result<Fee, VenueError> {
        Ok(self.fee)
    }

    async fn place_limit_order(
        &self,
        pair: &str,
        side: Side,
        size: Decimal,
        price: Decimal,
        _order_type: OrderType,
    ) -> Result<OrderId, VenueError> {
        if *self.fail_placement.lock().unwrap() {
            return Err(VenueError::PlacementRejected("mock placement failure".to_string()));
        }
        self.placed.lock().unwrap().push(PlacedOrder {
            pair: pair.to_string(),
            side,
            size,
            price,
        });
        let mut next_id = self.next_id.lock().unwrap();
        let id = format!("mock-{next_id}");
        *next_id += 1;
        Ok(id)
    }

    async fn cancel_order(&self, _pair: &str, id: &OrderId) -> Result<(), VenueError> {
        self.cancelled.lock().unwrap().push(id.clone());
        Ok(())
    }
}
