//! Error taxonomy for the strategy core.
//!
//! Configuration errors are fatal and returned from the constructor. Per-tick errors are
//! either absorbed within the modifier pipeline (the offending level is dropped and a
//! warning logged) or surfaced to the host as a `TickError`, matching the propagation
//! policy: venue errors never crash the tick.

use thiserror::Error;

/// Errors that can occur while constructing a [`crate::strategy::MarketMakingStrategy`]
/// from a [`crate::config::StrategyConfig`]. All are fatal: the engine refuses to start.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("price_ceiling ({ceiling}) must be >= price_floor ({floor}) when both are enabled")]
    CeilingBelowFloor { ceiling: String, floor: String },

    #[error("order_levels must be >= 1, got {0}")]
    NoLevels(u32),

    #[error("{field} must be non-negative, got {value}")]
    NegativeValue { field: &'static str, value: String },

    #[error("inventory_target_base_pct must be in [0, 1], got {0}")]
    TargetOutOfRange(String),

    #[error("order_refresh_tolerance_pct must be -1 (disabled) or >= 0, got {0}")]
    InvalidTolerance(String),

    #[error(
        "hanging_orders_cancel_pct must be non-negative when hanging orders are enabled, got {0}"
    )]
    InvalidHangingCancelPct(String),
}

/// Errors raised by the venue adapter, asset-price delegate, or inventory-cost delegate.
///
/// These are the core's view of "adapter said no" — recoverable in every case except when
/// the adapter itself is clearly misbehaving (handled the same way: the tick is skipped).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VenueError {
    #[error("venue not ready: {0}")]
    NotReady(String),

    #[error("venue reported a non-finite or missing price for {0}")]
    PriceUnavailable(String),

    #[error("order placement rejected: {0}")]
    PlacementRejected(String),

    #[error("cancel rejected for order {0}: {1}")]
    CancelRejected(String, String),

    #[error("insufficient balance for {asset}: requested {requested}, available {available}")]
    InsufficientBalance {
        asset: String,
        requested: String,
        available: String,
    },
}

/// Errors surfaced from a single `tick(now)` call.
///
/// Per the design's error-handling section: `InvalidQuantizedResult` and
/// `PlacementRejected` are absorbed inside the pipeline/executor and never reach this
/// type — they are logged and the affected level or order is dropped. Only conditions the
/// host must act on propagate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TickError {
    #[error("venue not ready, tick skipped: {0}")]
    VenueNotReady(String),

    #[error(
        "price_type is InventoryCost, base balance is non-zero, but no inventory cost \
         delegate value is available"
    )]
    MissingInventoryCost,

    #[error("venue error during tick: {0}")]
    Venue(#[from] VenueError),
}
