//! C1 — Quantizer: rounds prices/sizes to venue tick/lot and exposes fee queries.
//!
//! A thin wrapper over [`crate::adapter::VenueAdapter`] so the rest of the core never
//! calls the adapter's quantization methods directly; illegal inputs clamp to zero rather
//! than erroring, so callers never have to handle a quantization failure.

use crate::adapter::VenueAdapter;
use crate::error::VenueError;
use crate::types::{Fee, OrderType, Side};
use rust_decimal::Decimal;

pub struct Quantizer<'a, A: VenueAdapter> {
    adapter: &'a A,
}

impl<'a, A: VenueAdapter> Quantizer<'a, A> {
    pub fn new(adapter: &'a A) -> Self {
        Self { adapter }
    }

    /// Rounds `price` to the venue's price tick. Negative inputs clamp to zero.
    pub fn quantize_price(&self, pair: &str, price: Decimal) -> Decimal {
        if price.is_sign_negative() {
            return Decimal::ZERO;
        }
        self.adapter.quantize_order_price(pair, price)
    }

    /// Floors `size` to the venue's lot step. Negative inputs clamp to zero.
    pub fn quantize_size(&self, pair: &str, size: Decimal, price: Option<Decimal>) -> Decimal {
        if size.is_sign_negative() {
            return Decimal::ZERO;
        }
        self.adapter.quantize_order_amount(pair, size, price)
    }

    pub fn min_order_size(&self, pair: &str) -> Decimal {
        self.adapter.min_order_size(pair)
    }

    pub fn min_notional(&self, pair: &str) -> Decimal {
        self.adapter.min_notional(pair)
    }

    pub fn price_tick(&self, pair: &str) -> Decimal {
        self.adapter.price_tick(pair)
    }

    pub async fn fee(
        &self,
        base: &str,
        quote: &str,
        order_type: OrderType,
        side: Side,
        size: Decimal,
        price: Decimal,
    ) -> Result<Fee, VenueError> {
        self.adapter
            .get_fee(base, quote, order_type, side, size, price)
            .await
    }

    /// True if `size` after quantization still meets the venue's minimum order size and
    /// minimum notional at `price` (invariant I5).
    pub fn meets_minimums(&self, pair: &str, size: Decimal, price: Decimal) -> bool {
        if size < self.min_order_size(pair) {
            return false;
        }
        let min_notional = self.min_notional(pair);
        min_notional.is_zero() || size * price >= min_notional
    }
}
