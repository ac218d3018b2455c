//! Display-bucket classification.
//!
//! The one piece of derivation logic this client owns: mapping a market's
//! resolved flag and expiry against the observer's clock onto exactly one
//! display bucket.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;

use super::types::Market;

/// Display bucket of a market. Derived, never stored.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MarketStatus {
    /// Expiry is still in the future.
    Active,
    /// Expired, outcome not yet fixed by the contract.
    Pending,
    /// Expired and resolved; claims are payable.
    Resolved,
}

impl MarketStatus {
    /// All buckets, in tab order.
    pub const ALL: [MarketStatus; 3] =
        [MarketStatus::Active, MarketStatus::Pending, MarketStatus::Resolved];

    /// Human-facing tab title.
    pub fn title(&self) -> &'static str {
        match self {
            MarketStatus::Active => "Active",
            MarketStatus::Pending => "Pending Resolution",
            MarketStatus::Resolved => "Resolved",
        }
    }
}

/// Classify a market into its display bucket.
///
/// Total over its inputs:
/// - `Active` when `now < end_time`;
/// - `Pending` when `now >= end_time` and not resolved;
/// - `Resolved` when `now >= end_time` and resolved.
///
/// Expiry is checked first, so a market the contract reports as resolved
/// ahead of its own expiry still renders as active until the clock
/// catches up.
pub fn classify(resolved: bool, end_time: i64, now: i64) -> MarketStatus {
    if now < end_time {
        MarketStatus::Active
    } else if resolved {
        MarketStatus::Resolved
    } else {
        MarketStatus::Pending
    }
}

impl Market {
    /// The market's display bucket at the given time.
    pub fn status_at(&self, now: i64) -> MarketStatus {
        classify(self.resolved, self.end_time, now)
    }

    /// The market's display bucket right now.
    pub fn status(&self) -> MarketStatus {
        self.status_at(OffsetDateTime::now_utc().unix_timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const T: i64 = 1_800_000_000;

    #[test]
    fn future_expiry_is_active() {
        assert_eq!(classify(false, T, T - 1), MarketStatus::Active);
    }

    #[test]
    fn past_expiry_unresolved_is_pending() {
        assert_eq!(classify(false, T, T + 1), MarketStatus::Pending);
    }

    #[test]
    fn past_expiry_resolved_is_resolved() {
        assert_eq!(classify(true, T, T + 1), MarketStatus::Resolved);
    }

    #[test]
    fn expiry_instant_counts_as_expired() {
        assert_eq!(classify(false, T, T), MarketStatus::Pending);
        assert_eq!(classify(true, T, T), MarketStatus::Resolved);
    }

    #[test]
    fn early_resolution_flag_does_not_beat_the_clock() {
        assert_eq!(classify(true, T, T - 1), MarketStatus::Active);
    }

    #[test]
    fn exactly_one_bucket_per_input() {
        for resolved in [false, true] {
            for now in [T - 100, T - 1, T, T + 1, T + 100] {
                let status = classify(resolved, T, now);
                let matches = MarketStatus::ALL
                    .iter()
                    .filter(|s| **s == status)
                    .count();
                assert_eq!(matches, 1);
                // Pure function: same inputs, same bucket.
                assert_eq!(status, classify(resolved, T, now));
            }
        }
    }

    #[test]
    fn status_parses_from_tab_names() {
        assert_eq!(MarketStatus::from_str("active").unwrap(), MarketStatus::Active);
        assert_eq!(MarketStatus::from_str("pending").unwrap(), MarketStatus::Pending);
        assert_eq!(MarketStatus::from_str("resolved").unwrap(), MarketStatus::Resolved);
        assert!(MarketStatus::from_str("closed").is_err());
    }

    #[test]
    fn titles_match_tabs() {
        assert_eq!(MarketStatus::Active.title(), "Active");
        assert_eq!(MarketStatus::Pending.title(), "Pending Resolution");
        assert_eq!(MarketStatus::Resolved.title(), "Resolved");
    }
}
