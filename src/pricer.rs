//! C2 — Reference Pricer: produces a single decimal reference price per tick.
//!
//! Falls back to mid when `LastOwnTrade` is unset or `InventoryCost` is absent. A
//! pluggable [`AssetPriceDelegate`] may replace the local book as source for any price
//! type, checked first when present and ready.

use crate::adapter::{AssetPriceDelegate, VenueAdapter};
use crate::error::VenueError;
use crate::types::PriceType;
use rust_decimal::Decimal;

pub struct ReferencePricer<'a, A: VenueAdapter> {
    adapter: &'a A,
    pair: &'a str,
}

impl<'a, A: VenueAdapter> ReferencePricer<'a, A> {
    pub fn new(adapter: &'a A, pair: &'a str) -> Self {
        Self { adapter, pair }
    }

    /// Computes the reference price for `price_type`.
    ///
    /// `last_own_trade_price` and `inventory_cost_price` are read from
    /// [`crate::state::StrategyState`] / the inventory-cost delegate respectively by the
    /// caller, since the pricer itself holds no mutable state.
    pub async fn price(
        &self,
        price_type: PriceType,
        last_own_trade_price: Option<Decimal>,
        inventory_cost_price: Option<Decimal>,
        delegate: Option<&(impl AssetPriceDelegate + Sync)>,
    ) -> Result<Decimal, VenueError> {
        if let Some(delegate) = delegate {
            if delegate.ready() {
                if let Some(price) = delegate.get_price_by_type(price_type).await {
                    return Ok(price);
                }
            }
        }

        match price_type {
            PriceType::Mid => self.adapter.get_mid_price(self.pair).await,
            PriceType::BestBid => self.adapter.get_price(self.pair, true).await,
            PriceType::BestAsk => self.adapter.get_price(self.pair, false).await,
            PriceType::LastTrade => self.adapter.get_mid_price(self.pair).await,
            PriceType::LastOwnTrade => match last_own_trade_price {
                Some(price) if !price.is_zero() => Ok(price),
                _ => self.adapter.get_mid_price(self.pair).await,
            },
            PriceType::InventoryCost => match inventory_cost_price {
                Some(price) => Ok(price),
                None => self.adapter.get_mid_price(self.pair).await,
            },
            PriceType::Custom => self.adapter.get_mid_price(self.pair).await,
        }
    }
}
