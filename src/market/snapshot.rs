//! Assembled dashboard state.
//!
//! A snapshot is everything one refresh cycle produced: the market list,
//! the caller's balances, and whatever failed to load. Rendering and the
//! status API both consume snapshots and never refetch on their own.

use alloy::primitives::{Address, U256};
use serde::Serialize;

use super::status::MarketStatus;
use super::types::{Market, SharesBalance};

/// One market plus the connected wallet's stake in it.
#[derive(Debug, Clone)]
pub struct MarketView {
    /// The market snapshot.
    pub market: Market,
    /// The wallet's share balances, when a wallet is connected.
    pub shares: Option<SharesBalance>,
}

/// A market that failed to load during a refresh.
#[derive(Debug, Clone)]
pub struct LoadFailure {
    /// Id of the market that failed.
    pub market_id: u64,
    /// Stringified reason, surfaced on the dashboard.
    pub reason: String,
}

/// Per-bucket market counts.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct BucketCounts {
    /// Markets still open for buying.
    pub active: usize,
    /// Expired markets awaiting resolution.
    pub pending: usize,
    /// Resolved markets.
    pub resolved: usize,
}

/// Everything one refresh produced.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Block number the refresh observed.
    pub block_number: u64,
    /// Unix timestamp the snapshot was taken at.
    pub taken_at: i64,
    /// Connected wallet, if any.
    pub wallet: Option<Address>,
    /// Wallet's token balance, when a wallet is connected and the read
    /// succeeded.
    pub token_balance: Option<U256>,
    /// Markets that loaded, in id order.
    pub markets: Vec<MarketView>,
    /// Markets that did not load.
    pub failures: Vec<LoadFailure>,
}

impl Snapshot {
    /// Markets falling under the given tab at the snapshot's own clock.
    pub fn in_bucket(&self, status: MarketStatus) -> impl Iterator<Item = &MarketView> {
        let now = self.taken_at;
        self.markets
            .iter()
            .filter(move |view| view.market.status_at(now) == status)
    }

    /// Count markets per bucket.
    pub fn bucket_counts(&self) -> BucketCounts {
        let mut counts = BucketCounts::default();
        for view in &self.markets {
            match view.market.status_at(self.taken_at) {
                MarketStatus::Active => counts.active += 1,
                MarketStatus::Pending => counts.pending += 1,
                MarketStatus::Resolved => counts.resolved += 1,
            }
        }
        counts
    }

    /// Total markets that loaded.
    pub fn market_count(&self) -> usize {
        self.markets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::types::Outcome;

    fn market(id: u64, end_time: i64, resolved: bool) -> MarketView {
        MarketView {
            market: Market {
                id,
                question: format!("Question {}?", id),
                option_a: "Yes".to_string(),
                option_b: "No".to_string(),
                end_time,
                outcome: Outcome::OptionA,
                total_option_a_shares: U256::from(1u64),
                total_option_b_shares: U256::from(1u64),
                resolved,
            },
            shares: None,
        }
    }

    #[test]
    fn buckets_partition_the_snapshot() {
        let now = 1_000_000;
        let snapshot = Snapshot {
            taken_at: now,
            markets: vec![
                market(0, now + 100, false),
                market(1, now - 100, false),
                market(2, now - 100, true),
                market(3, now + 50, false),
            ],
            ..Default::default()
        };

        let counts = snapshot.bucket_counts();
        assert_eq!(
            counts,
            BucketCounts {
                active: 2,
                pending: 1,
                resolved: 1
            }
        );

        let total: usize = MarketStatus::ALL
            .iter()
            .map(|s| snapshot.in_bucket(*s).count())
            .sum();
        assert_eq!(total, snapshot.market_count());
    }

    #[test]
    fn in_bucket_filters_by_snapshot_clock() {
        let now = 1_000_000;
        let snapshot = Snapshot {
            taken_at: now,
            markets: vec![market(0, now - 1, true)],
            ..Default::default()
        };

        assert_eq!(snapshot.in_bucket(MarketStatus::Resolved).count(), 1);
        assert_eq!(snapshot.in_bucket(MarketStatus::Active).count(), 0);
    }

    #[test]
    fn empty_snapshot_counts_are_zero() {
        let snapshot = Snapshot::default();
        assert_eq!(snapshot.bucket_counts(), BucketCounts::default());
        assert_eq!(snapshot.market_count(), 0);
    }
}
