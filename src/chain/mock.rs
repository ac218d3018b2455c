//! Mock chain client for unit testing.
//!
//! This module provides a mock client that can be used in tests
//! without a chain node behind it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, U256};
use alloy::transports::TransportErrorKind;
use time::OffsetDateTime;

use crate::error::ChainError;
use crate::market::{LoadFailure, Market, MarketView, Outcome, SharesBalance, Snapshot};

/// Configuration for mock client behavior.
#[derive(Debug, Clone, Default)]
pub struct MockChainConfig {
    /// Whether market reads should fail.
    pub fail_markets: bool,
    /// Whether balance reads should fail.
    pub fail_balances: bool,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

/// Mock chain client for testing.
#[derive(Debug, Clone)]
pub struct MockChainClient {
    /// Mock configuration.
    config: MockChainConfig,
    /// Seeded markets by id.
    markets: Arc<Mutex<HashMap<u64, Market>>>,
    /// Seeded share balances by (market id, wallet).
    shares: Arc<Mutex<HashMap<(u64, Address), SharesBalance>>>,
    /// Seeded token balances by wallet.
    token_balances: Arc<Mutex<HashMap<Address, U256>>>,
    /// Current block number.
    block: Arc<Mutex<u64>>,
}

impl MockChainClient {
    /// Create a new mock client with default configuration.
    pub fn new() -> Self {
        Self::with_config(MockChainConfig::default())
    }

    /// Create a mock client with custom configuration.
    pub fn with_config(config: MockChainConfig) -> Self {
        Self {
            config,
            markets: Arc::new(Mutex::new(HashMap::new())),
            shares: Arc::new(Mutex::new(HashMap::new())),
            token_balances: Arc::new(Mutex::new(HashMap::new())),
            block: Arc::new(Mutex::new(1)),
        }
    }

    /// Seed a market.
    pub fn set_market(&self, market: Market) {
        self.markets.lock().unwrap().insert(market.id, market);
    }

    /// Seed a wallet's share balance in a market.
    pub fn set_shares(&self, market_id: u64, wallet: Address, balance: SharesBalance) {
        self.shares.lock().unwrap().insert((market_id, wallet), balance);
    }

    /// Seed a wallet's token balance.
    pub fn set_token_balance(&self, wallet: Address, balance: U256) {
        self.token_balances.lock().unwrap().insert(wallet, balance);
    }

    /// Bump the mock block number.
    pub fn advance_block(&self) {
        *self.block.lock().unwrap() += 1;
    }

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }
    }

    /// Current mock block number.
    pub async fn block_number(&self) -> Result<u64, ChainError> {
        Ok(*self.block.lock().unwrap())
    }

    /// Number of seeded markets.
    pub async fn market_count(&self) -> Result<u64, ChainError> {
        self.simulate_latency().await;
        if self.config.fail_markets {
            return Err(ChainError::Rpc(TransportErrorKind::custom_str(
                "mock market failure",
            )));
        }
        Ok(self.markets.lock().unwrap().len() as u64)
    }

    /// Fetch a seeded market.
    pub async fn market(&self, market_id: u64) -> Result<Market, ChainError> {
        self.simulate_latency().await;
        if self.config.fail_markets {
            return Err(ChainError::Rpc(TransportErrorKind::custom_str(
                "mock market failure",
            )));
        }
        let markets = self.markets.lock().unwrap();
        markets
            .get(&market_id)
            .cloned()
            .ok_or(ChainError::MarketOutOfRange {
                market_id,
                count: markets.len() as u64,
            })
    }

    /// Fetch a seeded share balance (zero when unseeded).
    pub async fn shares_balance(
        &self,
        market_id: u64,
        wallet: Address,
    ) -> Result<SharesBalance, ChainError> {
        self.simulate_latency().await;
        if self.config.fail_balances {
            return Err(ChainError::Rpc(TransportErrorKind::custom_str(
                "mock balance failure",
            )));
        }
        Ok(self
            .shares
            .lock()
            .unwrap()
            .get(&(market_id, wallet))
            .copied()
            .unwrap_or_default())
    }

    /// Fetch a seeded token balance (zero when unseeded).
    pub async fn token_balance(&self, wallet: Address) -> Result<U256, ChainError> {
        self.simulate_latency().await;
        if self.config.fail_balances {
            return Err(ChainError::Rpc(TransportErrorKind::custom_str(
                "mock balance failure",
            )));
        }
        Ok(self
            .token_balances
            .lock()
            .unwrap()
            .get(&wallet)
            .copied()
            .unwrap_or(U256::ZERO))
    }

    /// Assemble a snapshot from the seeded state, the way the real client
    /// does from chain reads.
    pub async fn fetch_snapshot(&self, wallet: Option<Address>) -> Result<Snapshot, ChainError> {
        let taken_at = OffsetDateTime::now_utc().unix_timestamp();
        let block_number = self.block_number().await?;
        let count = self.market_count().await?;

        let token_balance = match wallet {
            Some(account) => self.token_balance(account).await.ok(),
            None => None,
        };

        let mut markets = Vec::new();
        let mut failures = Vec::new();
        for market_id in 0..count {
            match self.market(market_id).await {
                Ok(market) => {
                    let shares = match wallet {
                        Some(account) => Some(self.shares_balance(market_id, account).await?),
                        None => None,
                    };
                    markets.push(MarketView { market, shares });
                }
                Err(e) => failures.push(LoadFailure {
                    market_id,
                    reason: e.to_string(),
                }),
            }
        }

        Ok(Snapshot {
            block_number,
            taken_at,
            wallet,
            token_balance,
            markets,
            failures,
        })
    }
}

impl Default for MockChainClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for seeding markets with common shapes.
pub struct MockMarketBuilder {
    market: Market,
}

impl MockMarketBuilder {
    /// Start a market with the given id and question.
    pub fn new(id: u64, question: impl Into<String>) -> Self {
        Self {
            market: Market {
                id,
                question: question.into(),
                option_a: "Yes".to_string(),
                option_b: "No".to_string(),
                end_time: OffsetDateTime::now_utc().unix_timestamp() + 3600,
                outcome: Outcome::OptionA,
                total_option_a_shares: U256::ZERO,
                total_option_b_shares: U256::ZERO,
                resolved: false,
            },
        }
    }

    /// Set the outcome labels.
    pub fn options(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.market.option_a = a.into();
        self.market.option_b = b.into();
        self
    }

    /// Set the expiry timestamp.
    pub fn ends_at(mut self, end_time: i64) -> Self {
        self.market.end_time = end_time;
        self
    }

    /// Set the staked pools.
    pub fn pools(mut self, option_a: u64, option_b: u64) -> Self {
        self.market.total_option_a_shares = U256::from(option_a);
        self.market.total_option_b_shares = U256::from(option_b);
        self
    }

    /// Mark the market resolved with the given winner.
    pub fn resolved(mut self, winner: Outcome) -> Self {
        self.market.resolved = true;
        self.market.outcome = winner;
        self
    }

    /// Build the market.
    pub fn build(self) -> Market {
        self.market
    }
}
