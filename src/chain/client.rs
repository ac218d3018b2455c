//! Provider wrapper for contract reads.

use std::time::{Duration, Instant};

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::client::RpcClient;
use alloy::transports::http::Http;
use time::OffsetDateTime;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::Config;
use crate::error::{ChainError, Result};
use crate::market::{LoadFailure, Market, MarketView, Outcome, SharesBalance, Snapshot};
use crate::metrics;
use crate::wallet::{self, Session};

use super::contracts::{parse_address, IBetCoin, IPredictionMarket};

/// Clamp a contract timestamp into the i64 range used by the classifier.
fn timestamp_from_u256(value: U256) -> i64 {
    value.min(U256::from(i64::MAX as u64)).to::<u64>() as i64
}

/// Chain client wrapping the wallet provider with typed contract reads.
///
/// Every read is an independent, idempotent `eth_call`; nonce, gas and
/// signing for writes are the provider's business, not ours.
#[derive(Debug, Clone)]
pub struct ChainClient {
    /// The provider stack (HTTP transport, fillers, optional wallet).
    provider: DynProvider,
    /// Market contract address.
    market_address: Address,
    /// Betting token contract address.
    token_address: Address,
    /// Signing capability of this session.
    session: Session,
}

impl ChainClient {
    /// Create a new chain client from config with optimized HTTP settings.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            // Configurable timeout (default 2s, down from 30s)
            .timeout(Duration::from_millis(config.http_timeout_ms))
            // Fast connection establishment
            .connect_timeout(Duration::from_millis(500))
            // TCP_NODELAY for low-latency (disable Nagle's algorithm)
            .tcp_nodelay(true)
            // Keep connections alive for reuse
            .tcp_keepalive(Duration::from_secs(30))
            // Connection pool per host (default 10)
            .pool_max_idle_per_host(config.http_pool_size)
            // Keep idle connections for 90 seconds
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .expect("failed to create HTTP client");

        let url: Url = config
            .sight_rpc_url
            .parse()
            .map_err(|e| ChainError::InvalidRpcUrl(format!("{}: {}", config.sight_rpc_url, e)))?;
        let rpc = RpcClient::new(Http::with_client(http, url), false);

        let session = Session::from_config(config)?;
        let provider = match &config.sight_private_key {
            Some(key) => {
                let signer = wallet::create_signer(key)?;
                ProviderBuilder::new()
                    .wallet(EthereumWallet::from(signer))
                    .connect_client(rpc)
                    .erased()
            }
            None => ProviderBuilder::new().connect_client(rpc).erased(),
        };

        Ok(Self {
            provider,
            market_address: parse_address("market", &config.sight_market_address)?,
            token_address: parse_address("token", &config.sight_token_address)?,
            session,
        })
    }

    /// The market contract instance.
    pub(crate) fn market_contract(
        &self,
    ) -> IPredictionMarket::IPredictionMarketInstance<DynProvider> {
        IPredictionMarket::new(self.market_address, self.provider.clone())
    }

    /// The token contract instance.
    pub(crate) fn token_contract(&self) -> IBetCoin::IBetCoinInstance<DynProvider> {
        IBetCoin::new(self.token_address, self.provider.clone())
    }

    /// The market contract address.
    pub fn market_address(&self) -> Address {
        self.market_address
    }

    /// The token contract address.
    pub fn token_address(&self) -> Address {
        self.token_address
    }

    /// This session's signing capability.
    pub fn session(&self) -> Session {
        self.session
    }

    /// The connected wallet address, if any.
    pub fn wallet_address(&self) -> Option<Address> {
        self.session.address()
    }

    /// The chain id reported by the node.
    pub async fn chain_id(&self) -> std::result::Result<u64, ChainError> {
        Ok(self.provider.get_chain_id().await?)
    }

    /// The latest block number.
    pub async fn block_number(&self) -> std::result::Result<u64, ChainError> {
        Ok(self.provider.get_block_number().await?)
    }

    /// Number of markets the contract has created.
    #[instrument(skip(self))]
    pub async fn market_count(&self) -> std::result::Result<u64, ChainError> {
        let start = Instant::now();
        let count = self.market_contract().marketCount().call().await?;
        metrics::record_read_latency(start, "market_count");
        Ok(count.min(U256::from(u64::MAX)).to::<u64>())
    }

    /// Fetch one market's info tuple and map it onto the domain type.
    #[instrument(skip(self))]
    pub async fn market(&self, market_id: u64) -> std::result::Result<Market, ChainError> {
        let start = Instant::now();
        let info = self
            .market_contract()
            .getMarketInfo(U256::from(market_id))
            .call()
            .await?;
        metrics::record_read_latency(start, "get_market_info");

        let outcome = Outcome::from_index(info.outcome).ok_or(ChainError::InvalidOutcome {
            market_id,
            value: info.outcome,
        })?;

        Ok(Market {
            id: market_id,
            question: info.question,
            option_a: info.optionA,
            option_b: info.optionB,
            end_time: timestamp_from_u256(info.endTime),
            outcome,
            total_option_a_shares: info.totalOptionAShares,
            total_option_b_shares: info.totalOptionBShares,
            resolved: info.resolved,
        })
    }

    /// Fetch one wallet's share balances in one market.
    #[instrument(skip(self), fields(user = %user))]
    pub async fn shares_balance(
        &self,
        market_id: u64,
        user: Address,
    ) -> std::result::Result<SharesBalance, ChainError> {
        let start = Instant::now();
        let balance = self
            .market_contract()
            .getSharesBalance(U256::from(market_id), user)
            .call()
            .await?;
        metrics::record_read_latency(start, "get_shares_balance");

        Ok(SharesBalance {
            option_a_shares: balance.optionAShares,
            option_b_shares: balance.optionBShares,
        })
    }

    /// Fetch a wallet's token balance.
    #[instrument(skip(self), fields(account = %account))]
    pub async fn token_balance(
        &self,
        account: Address,
    ) -> std::result::Result<U256, ChainError> {
        let start = Instant::now();
        let balance = self.token_contract().balanceOf(account).call().await?;
        metrics::record_read_latency(start, "balance_of");
        Ok(balance)
    }

    /// Fetch the token allowance granted to the market contract.
    #[instrument(skip(self), fields(owner = %owner))]
    pub async fn token_allowance(
        &self,
        owner: Address,
    ) -> std::result::Result<U256, ChainError> {
        let start = Instant::now();
        let allowance = self
            .token_contract()
            .allowance(owner, self.market_address)
            .call()
            .await?;
        metrics::record_read_latency(start, "allowance");
        Ok(allowance)
    }

    /// Error unless the contract knows the given market id.
    pub async fn ensure_market_exists(
        &self,
        market_id: u64,
    ) -> std::result::Result<(), ChainError> {
        let count = self.market_count().await?;
        if market_id >= count {
            return Err(ChainError::MarketOutOfRange { market_id, count });
        }
        Ok(())
    }

    /// Fetch everything one dashboard refresh needs.
    ///
    /// Per-market reads fan out concurrently. A market that fails to load
    /// is logged and recorded as a failure; the snapshot carries on with
    /// the rest. A failed token-balance read degrades to `None` the same
    /// way.
    #[instrument(skip(self))]
    pub async fn fetch_snapshot(&self) -> std::result::Result<Snapshot, ChainError> {
        let start = Instant::now();
        let taken_at = OffsetDateTime::now_utc().unix_timestamp();

        let block_number = self.block_number().await?;
        let count = self.market_count().await?;
        let wallet = self.session.address();

        let token_balance = match wallet {
            Some(account) => match self.token_balance(account).await {
                Ok(balance) => Some(balance),
                Err(e) => {
                    warn!(error = %e, "token balance read failed");
                    None
                }
            },
            None => None,
        };

        let fetches = (0..count).map(|market_id| async move {
            let market = self.market(market_id).await?;
            let shares = match wallet {
                Some(account) => Some(self.shares_balance(market_id, account).await?),
                None => None,
            };
            Ok::<MarketView, ChainError>(MarketView { market, shares })
        });
        let results = futures::future::join_all(fetches).await;

        let mut markets = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (market_id, result) in (0..count).zip(results) {
            match result {
                Ok(view) => markets.push(view),
                Err(e) => {
                    warn!(market_id, error = %e, "market failed to load");
                    failures.push(LoadFailure {
                        market_id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        metrics::record_refresh_latency(start);
        metrics::inc_refreshes();
        debug!(
            block_number,
            loaded = markets.len(),
            failed = failures.len(),
            "snapshot fetched"
        );

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

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            sight_rpc_url: "http://127.0.0.1:8545".to_string(),
            sight_chain_id: 84532,
            sight_market_address: "0x1111111111111111111111111111111111111111".to_string(),
            sight_token_address: "0x2222222222222222222222222222222222222222".to_string(),
            sight_private_key: None,
            sight_poll_interval_secs: 5,
            token_symbol: "BETC".to_string(),
            token_decimals: 18,
            http_timeout_ms: 2000,
            http_pool_size: 10,
            port: 8080,
            metrics_enabled: false,
            metrics_port: 9090,
            rust_log: "info".to_string(),
            verbose: false,
        }
    }

    #[test]
    fn client_creation_works_read_only() {
        let client = ChainClient::new(&test_config()).unwrap();
        assert!(!client.session().is_connected());
        assert_eq!(client.wallet_address(), None);
    }

    #[test]
    fn client_creation_works_with_key() {
        let mut config = test_config();
        config.sight_private_key = Some(
            "0x0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef".to_string(),
        );
        let client = ChainClient::new(&config).unwrap();
        assert!(client.session().is_connected());
        assert!(client.wallet_address().is_some());
    }

    #[test]
    fn client_creation_rejects_bad_address() {
        let mut config = test_config();
        config.sight_market_address = "0xnope".to_string();
        assert!(ChainClient::new(&config).is_err());
    }

    #[test]
    fn timestamp_clamps_instead_of_panicking() {
        assert_eq!(timestamp_from_u256(U256::from(1234u64)), 1234);
        assert_eq!(timestamp_from_u256(U256::MAX), i64::MAX);
    }
}
