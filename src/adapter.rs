//! External collaborator contracts.
//!
//! The core never talks to a venue, order book, or ledger directly — it is generic over
//! an injected [`VenueAdapter`] and two optional delegates. This favors composition over
//! a deep base-class hierarchy: the engine owns a `Box<dyn VenueAdapter>` (or any concrete
//! type, since the trait is object-safe minus its generic-free async fns, which are
//! dispatched statically in practice) and a sink for outbound events.

use crate::error::VenueError;
use crate::types::{Fee, OrderId, OrderType, Side};
use rust_decimal::Decimal;

/// The venue connectivity surface the core depends on. Implemented by the host using
/// whatever REST/WS transport it likes; the core only ever calls these methods.
pub trait VenueAdapter: Send + Sync {
    /// Top-of-book price for `pair` on the given side (`is_buy = true` for best bid).
    fn get_price(
        &self,
        pair: &str,
        is_buy: bool,
    ) -> impl std::future::Future<Output = Result<Decimal, VenueError>> + Send;

    /// Depth-weighted price to fill `volume` on the given side.
    fn get_price_for_volume(
        &self,
        pair: &str,
        is_buy: bool,
        volume: Decimal,
    ) -> impl std::future::Future<Output = Result<Decimal, VenueError>> + Send;

    /// Total balance of `asset` (may include funds tied up in open orders).
    fn get_balance(
        &self,
        asset: &str,
    ) -> impl std::future::Future<Output = Result<Decimal, VenueError>> + Send;

    /// Balance of `asset` available for new orders.
    fn get_available_balance(
        &self,
        asset: &str,
    ) -> impl std::future::Future<Output = Result<Decimal, VenueError>> + Send;

    /// Mid price for `pair` ((best bid + best ask) / 2).
    fn get_mid_price(
        &self,
        pair: &str,
    ) -> impl std::future::Future<Output = Result<Decimal, VenueError>> + Send;

    /// The order type the venue expects for passive (maker) orders.
    fn get_maker_order_type(&self) -> OrderType;

    /// Round `price` to the venue's price tick (half-even).
    fn quantize_order_price(&self, pair: &str, price: Decimal) -> Decimal;

    /// Round `amount` down to the venue's lot step. `price`, if supplied, lets the venue
    /// apply notional-dependent lot rules.
    fn quantize_order_amount(&self, pair: &str, amount: Decimal, price: Option<Decimal>) -> Decimal;

    /// The smallest order size the venue will accept for `pair`.
    fn min_order_size(&self, pair: &str) -> Decimal;

    /// The smallest `price * size` the venue will accept for `pair`. Zero if unconstrained.
    fn min_notional(&self, pair: &str) -> Decimal;

    /// The price tick (minimum price increment) for `pair`.
    fn price_tick(&self, pair: &str) -> Decimal;

    /// Fee for a maker/taker order of `size` at `price` on `side`.
    fn get_fee(
        &self,
        base: &str,
        quote: &str,
        order_type: OrderType,
        side: Side,
        size: Decimal,
        price: Decimal,
    ) -> impl std::future::Future<Output = Result<Fee, VenueError>> + Send;

    /// Place a passive limit order. May be asynchronous on the venue side; the returned
    /// id is considered live from this call onward regardless of ack timing.
    fn place_limit_order(
        &self,
        pair: &str,
        side: Side,
        size: Decimal,
        price: Decimal,
        order_type: OrderType,
    ) -> impl std::future::Future<Output = Result<OrderId, VenueError>> + Send;

    /// Request cancellation of a live order. Fire-and-forget from the core's perspective.
    fn cancel_order(
        &self,
        pair: &str,
        id: &OrderId,
    ) -> impl std::future::Future<Output = Result<(), VenueError>> + Send;
}

/// An optional alternate source of reference prices (e.g. a correlated instrument's book).
/// When present and ready, it replaces the local venue book as the pricer's source,
/// regardless of which [`crate::types::PriceType`] is requested.
pub trait AssetPriceDelegate: Send + Sync {
    fn get_price_by_type(
        &self,
        price_type: crate::types::PriceType,
    ) -> impl std::future::Future<Output = Option<Decimal>> + Send;

    fn ready(&self) -> bool;
}

/// An optional external ledger that tracks the cost basis of the base asset inventory.
/// Treated as a price oracle: the core asks it for a price and forwards fill events to it,
/// but never mutates its state directly.
pub trait InventoryCostDelegate: Send + Sync {
    fn get_price(&self) -> impl std::future::Future<Output = Option<Decimal>> + Send;

    fn process_order_fill_event(
        &self,
        event: &crate::events::OrderFilledEvent,
    ) -> impl std::future::Future<Output = ()> + Send;
}
