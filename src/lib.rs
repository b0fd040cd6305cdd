//! Core tick loop for a pure market-making strategy.
//!
//! This crate is the strategy brain only: a single-threaded, synchronous `tick(now)`
//! control loop that turns a reference price into a symmetric quote ladder, runs it
//! through an ordered modifier pipeline (price bands, ping-pong, order optimization,
//! transaction costs, inventory skew, budget, taker filter), and reconciles the result
//! against live orders. Venue connectivity, order book maintenance, persistence, and
//! CLI/config-file parsing are external collaborators; see [`adapter`] for their
//! contracts with the core.

pub mod active_orders;
pub mod adapter;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod executor;
pub mod hanging;
pub mod mock;
pub mod pricer;
pub mod proposal;
pub mod quantizer;
pub mod refresh;
pub mod state;
pub mod strategy;
pub mod types;

pub use error::{ConfigError, TickError};
pub use strategy::{MarketMakingStrategy, TickOutcome};
