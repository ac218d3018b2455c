//! Market domain model.
//!
//! This module handles:
//! - Market and share-balance types read off contract tuples
//! - Display-bucket classification (active / pending / resolved)
//! - Snapshot assembly consumed by the renderer and the status API

pub mod snapshot;
pub mod status;
pub mod types;

pub use snapshot::{BucketCounts, LoadFailure, MarketView, Snapshot};
pub use status::{classify, MarketStatus};
pub use types::{Market, Outcome, SharesBalance};
