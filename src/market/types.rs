//! Market domain types read off the prediction-market contract.

use alloy::primitives::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;

/// One side of a binary market.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// First outcome (contract index 0).
    #[strum(serialize = "a", serialize = "A", serialize = "option-a")]
    #[default]
    OptionA,
    /// Second outcome (contract index 1).
    #[strum(serialize = "b", serialize = "B", serialize = "option-b")]
    OptionB,
}

impl Outcome {
    /// Get the opposite outcome.
    pub fn opposite(&self) -> Self {
        match self {
            Outcome::OptionA => Outcome::OptionB,
            Outcome::OptionB => Outcome::OptionA,
        }
    }

    /// The contract's index for this outcome.
    pub fn index(&self) -> u8 {
        match self {
            Outcome::OptionA => 0,
            Outcome::OptionB => 1,
        }
    }

    /// Map a contract outcome index back to an outcome.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Outcome::OptionA),
            1 => Some(Outcome::OptionB),
            _ => None,
        }
    }
}

/// A market snapshot as returned by `getMarketInfo`.
///
/// Markets are created and mutated exclusively by the contract; this type
/// only ever holds a read snapshot.
#[derive(Debug, Clone)]
pub struct Market {
    /// Market id (position in the contract's market list).
    pub id: u64,
    /// Market question text.
    pub question: String,
    /// Label of outcome A.
    pub option_a: String,
    /// Label of outcome B.
    pub option_b: String,
    /// Unix timestamp when the market expires.
    pub end_time: i64,
    /// Winning outcome. Meaningful only when `resolved` is set.
    pub outcome: Outcome,
    /// Total shares staked on outcome A.
    pub total_option_a_shares: U256,
    /// Total shares staked on outcome B.
    pub total_option_b_shares: U256,
    /// Whether the contract has fixed the winning outcome.
    pub resolved: bool,
}

impl Market {
    /// Get the display label for an outcome.
    pub fn label(&self, outcome: Outcome) -> &str {
        match outcome {
            Outcome::OptionA => &self.option_a,
            Outcome::OptionB => &self.option_b,
        }
    }

    /// The winning outcome, if the market is resolved.
    pub fn winner(&self) -> Option<Outcome> {
        self.resolved.then_some(self.outcome)
    }

    /// The winning outcome's label, if the market is resolved.
    pub fn winning_label(&self) -> Option<&str> {
        self.winner().map(|w| self.label(w))
    }

    /// Check if the market has expired at the given time.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.end_time
    }

    /// Check if the market has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(OffsetDateTime::now_utc().unix_timestamp())
    }

    /// Get remaining time until expiry, if any.
    pub fn time_remaining(&self) -> Option<std::time::Duration> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let remaining = self.end_time - now;
        if remaining <= 0 {
            None
        } else {
            Some(std::time::Duration::from_secs(remaining as u64))
        }
    }

    /// Total shares staked across both outcomes.
    pub fn total_shares(&self) -> U256 {
        self.total_option_a_shares
            .saturating_add(self.total_option_b_shares)
    }

    /// Percentage split of the share pools, as (option A, option B).
    ///
    /// An empty pool reports an even split. Computed in integer basis
    /// points so arbitrarily large pools never overflow.
    pub fn share_split(&self) -> (Decimal, Decimal) {
        let total = self.total_shares();
        if total.is_zero() {
            let half = Decimal::new(50, 0);
            return (half, half);
        }

        let bps = self
            .total_option_a_shares
            .saturating_mul(U256::from(10_000u64))
            / total;
        let pct_a = Decimal::new(bps.to::<u64>() as i64, 2).normalize();
        (pct_a, (Decimal::new(100, 0) - pct_a).normalize())
    }
}

/// Shares held by one wallet in one market, per outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SharesBalance {
    /// Shares held in outcome A.
    pub option_a_shares: U256,
    /// Shares held in outcome B.
    pub option_b_shares: U256,
}

impl SharesBalance {
    /// Shares held in the given outcome.
    pub fn for_outcome(&self, outcome: Outcome) -> U256 {
        match outcome {
            Outcome::OptionA => self.option_a_shares,
            Outcome::OptionB => self.option_b_shares,
        }
    }

    /// Whether the wallet holds no shares in this market.
    pub fn is_empty(&self) -> bool {
        self.option_a_shares.is_zero() && self.option_b_shares.is_zero()
    }
}
