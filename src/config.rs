//! Application configuration loaded from environment variables.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Chain Connection ===
    /// JSON-RPC endpoint of the chain node.
    #[serde(default = "default_rpc_url")]
    pub sight_rpc_url: String,

    /// Chain id the contracts are deployed on.
    #[serde(default = "default_chain_id")]
    pub sight_chain_id: u64,

    /// Prediction market contract address (hex, starts with 0x).
    pub sight_market_address: String,

    /// Betting token (ERC-20) contract address.
    pub sight_token_address: String,

    // === Wallet ===
    /// Wallet private key (hex). Omit for a read-only session.
    #[serde(default)]
    pub sight_private_key: Option<String>,

    // === Refresh ===
    /// Seconds between block-number polls in watch mode.
    #[serde(default = "default_poll_interval")]
    pub sight_poll_interval_secs: u64,

    // === Token Display ===
    /// Ticker symbol used when rendering token amounts.
    #[serde(default = "default_token_symbol")]
    pub token_symbol: String,

    /// Decimals of the betting token.
    #[serde(default = "default_token_decimals")]
    pub token_decimals: u8,

    // === HTTP Transport ===
    /// Request timeout for RPC calls, in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    /// Connection pool size per host.
    #[serde(default = "default_http_pool_size")]
    pub http_pool_size: usize,

    // === Server Configuration ===
    /// HTTP server port for health/status endpoints.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable the Prometheus metrics exporter.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Port the metrics exporter listens on.
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_rpc_url() -> String {
    "http://127.0.0.1:8545".to_string()
}

fn default_chain_id() -> u64 {
    84532 // Base Sepolia
}

fn default_poll_interval() -> u64 {
    5
}

fn default_token_symbol() -> String {
    "BETC".to_string()
}

fn default_token_decimals() -> u8 {
    18
}

fn default_http_timeout_ms() -> u64 {
    2000
}

fn default_http_pool_size() -> usize {
    10
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_metrics_port() -> u16 {
    9090
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Check that a string looks like a 20-byte hex address.
fn is_hex_address(value: &str) -> bool {
    value
        .strip_prefix("0x")
        .map(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false)
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        let url = url::Url::parse(&self.sight_rpc_url)
            .map_err(|e| format!("SIGHT_RPC_URL is not a valid URL: {}", e))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!(
                "SIGHT_RPC_URL must be http(s), got {}",
                url.scheme()
            ));
        }

        if !is_hex_address(&self.sight_market_address) {
            return Err("SIGHT_MARKET_ADDRESS must be a 0x-prefixed 20-byte hex address".to_string());
        }

        if !is_hex_address(&self.sight_token_address) {
            return Err("SIGHT_TOKEN_ADDRESS must be a 0x-prefixed 20-byte hex address".to_string());
        }

        if let Some(key) = &self.sight_private_key {
            let hex = key.strip_prefix("0x").unwrap_or(key);
            if hex.len() != 64 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err("SIGHT_PRIVATE_KEY must be a 32-byte hex key".to_string());
            }
        }

        if self.sight_poll_interval_secs == 0 {
            return Err("SIGHT_POLL_INTERVAL_SECS must be at least 1".to_string());
        }

        if self.token_decimals > 36 {
            return Err("TOKEN_DECIMALS must be at most 36".to_string());
        }

        Ok(())
    }

    /// Check if a signing key is configured.
    pub fn has_wallet(&self) -> bool {
        self.sight_private_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            sight_rpc_url: default_rpc_url(),
            sight_chain_id: default_chain_id(),
            sight_market_address: "0x1111111111111111111111111111111111111111".to_string(),
            sight_token_address: "0x2222222222222222222222222222222222222222".to_string(),
            sight_private_key: None,
            sight_poll_interval_secs: default_poll_interval(),
            token_symbol: default_token_symbol(),
            token_decimals: default_token_decimals(),
            http_timeout_ms: default_http_timeout_ms(),
            http_pool_size: default_http_pool_size(),
            port: default_port(),
            metrics_enabled: true,
            metrics_port: default_metrics_port(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }

    #[test]
    fn default_values_are_sensible() {
        assert_eq!(default_chain_id(), 84532);
        assert_eq!(default_token_decimals(), 18);
        assert_eq!(default_poll_interval(), 5);
        assert!(default_true());
    }

    #[test]
    fn validate_accepts_read_only_config() {
        let config = test_config();
        assert!(config.validate().is_ok());
        assert!(!config.has_wallet());
    }

    #[test]
    fn validate_rejects_malformed_market_address() {
        let mut config = test_config();
        config.sight_market_address = "0x1234".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_address_without_prefix() {
        let mut config = test_config();
        config.sight_token_address =
            "2222222222222222222222222222222222222222".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_short_private_key() {
        let mut config = test_config();
        config.sight_private_key = Some("0x1234".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_valid_private_key() {
        let mut config = test_config();
        config.sight_private_key = Some(
            "0x0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef".to_string(),
        );
        assert!(config.validate().is_ok());
        assert!(config.has_wallet());
    }

    #[test]
    fn validate_rejects_non_http_rpc_url() {
        let mut config = test_config();
        config.sight_rpc_url = "ws://127.0.0.1:8545".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_poll_interval() {
        let mut config = test_config();
        config.sight_poll_interval_secs = 0;
        assert!(config.validate().is_err());
    }
}
