//! Core data model: sides, price types, price/size pairs, proposals, and order records.
//!
//! All prices, sizes, spreads, ratios, and balances are `rust_decimal::Decimal`.
//! Floating point never appears here — only in the informational
//! [`crate::state::StrategySnapshot`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which side of the book an order or quote level belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// The type of limit order the venue should place, as reported by
/// [`crate::adapter::VenueAdapter::get_maker_order_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Limit,
    LimitMaker,
}

/// Selects which source the [`crate::pricer::ReferencePricer`] reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceType {
    Mid,
    BestBid,
    BestAsk,
    LastTrade,
    LastOwnTrade,
    InventoryCost,
    Custom,
}

/// A single quote level: a non-negative price paired with a non-negative size.
///
/// Both fields are zero-representable; a `PriceSize` with `size == 0` is meaningful
/// mid-pipeline (it marks a level the budget or inventory-skew stage starved) but must
/// not survive to the end of the modifier pipeline (invariant I5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSize {
    pub price: Decimal,
    pub size: Decimal,
}

impl PriceSize {
    pub fn new(price: Decimal, size: Decimal) -> Self {
        Self { price, size }
    }

    pub fn is_zero_size(&self) -> bool {
        self.size.is_zero() || self.size.is_sign_negative()
    }

    pub fn notional(&self) -> Decimal {
        self.price * self.size
    }
}

/// A symmetric multi-level quote ladder: buys ordered nearest-to-reference first
/// (monotonically non-increasing in price), sells likewise (monotonically
/// non-decreasing).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub buys: Vec<PriceSize>,
    pub sells: Vec<PriceSize>,
}

impl Proposal {
    pub fn new(buys: Vec<PriceSize>, sells: Vec<PriceSize>) -> Self {
        Self { buys, sells }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buys.is_empty() && self.sells.is_empty()
    }

    /// Drops every level with non-positive size, preserving relative order. Called at the
    /// tail of every modifier stage that can produce zero-size levels.
    pub fn drop_zero_sizes(&mut self) {
        self.buys.retain(|ps| !ps.is_zero_size());
        self.sells.retain(|ps| !ps.is_zero_size());
    }

    pub fn side(&self, side: Side) -> &[PriceSize] {
        match side {
            Side::Buy => &self.buys,
            Side::Sell => &self.sells,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut Vec<PriceSize> {
        match side {
            Side::Buy => &mut self.buys,
            Side::Sell => &mut self.sells,
        }
    }
}

/// An order override supplied for a single level id, fully replacing symmetric
/// construction for that level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderOverride {
    pub side: Side,
    pub spread_pct: Decimal,
    pub size: Decimal,
}

/// A unique identifier for a live order, as returned by
/// [`crate::adapter::VenueAdapter::place_limit_order`].
pub type OrderId = String;

/// A live order tracked by the [`crate::active_orders::ActiveOrderManager`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveOrder {
    pub id: OrderId,
    pub side: Side,
    pub price: Decimal,
    pub size: Decimal,
    pub created_at_ms: i64,
}

impl ActiveOrder {
    /// Age of this order relative to `now_ms`, saturating at zero for clock skew.
    pub fn age(&self, now_ms: i64) -> Duration {
        let millis = (now_ms - self.created_at_ms).max(0) as u64;
        Duration::from_millis(millis)
    }
}

/// A reference to an order carried in the [`crate::hanging::HangingOrdersTracker`].
///
/// Deliberately does not borrow the `ActiveOrder` itself: hanging state is identified by
/// id, so the tracker never needs a back-pointer into the active-order store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HangingOrderRef {
    pub price: Decimal,
    pub side: Side,
    pub size: Decimal,
}

/// Captured when a level's two sides (buy and sell) are placed together, so that when one
/// side fills, the unfilled partner can be promoted to hanging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedOrderPair {
    pub buy_id: OrderId,
    pub sell_id: OrderId,
}

/// An additive fee expressed as a fraction of notional plus flat components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    pub percent: Decimal,
    pub flat: Decimal,
}

impl Fee {
    pub fn zero() -> Self {
        Self {
            percent: Decimal::ZERO,
            flat: Decimal::ZERO,
        }
    }

    /// Total fee owed on a fill of `size` at `price`.
    pub fn amount(&self, size: Decimal, price: Decimal) -> Decimal {
        size * price * self.percent + self.flat
    }
}
