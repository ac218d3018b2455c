//! Chain access layer.
//!
//! This module handles:
//! - Static contract interface bindings
//! - The provider-backed client for typed reads and snapshot fetches
//! - Mock client for testing

pub mod client;
pub mod contracts;
pub mod mock;

pub use client::ChainClient;
pub use contracts::{parse_address, IBetCoin, IPredictionMarket};
pub use mock::{MockChainClient, MockChainConfig, MockMarketBuilder};
