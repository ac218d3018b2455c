//! Unified error types for the dashboard.

use rust_decimal::Decimal;
use thiserror::Error;

/// Unified error type for the dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Chain read/connection error.
    #[error("chain error: {0}")]
    Chain(#[from] ChainError),

    /// Wallet/session error.
    #[error("wallet error: {0}")]
    Wallet(#[from] WalletError),

    /// Transaction action error.
    #[error("action error: {0}")]
    Action(#[from] ActionError),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Contract read and provider errors.
#[derive(Error, Debug)]
pub enum ChainError {
    /// JSON-RPC transport failure.
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::TransportError),

    /// Contract call failed (revert, decode failure, bad address).
    #[error("contract call failed: {0}")]
    Contract(#[from] alloy::contract::Error),

    /// The configured RPC URL failed to parse.
    #[error("invalid rpc url: {0}")]
    InvalidRpcUrl(String),

    /// A configured address failed to parse.
    #[error("invalid {field} address: {value}")]
    InvalidAddress {
        /// Which config field held the bad value.
        field: &'static str,
        /// The value that failed to parse.
        value: String,
    },

    /// Requested market id is past the contract's market count.
    #[error("market {market_id} out of range (count is {count})")]
    MarketOutOfRange {
        /// The requested market id.
        market_id: u64,
        /// The contract's current market count.
        count: u64,
    },

    /// The contract reported an outcome index other than 0 or 1.
    #[error("market {market_id} has invalid outcome index {value}")]
    InvalidOutcome {
        /// The market id carrying the bad index.
        market_id: u64,
        /// The index as returned by the contract.
        value: u8,
    },
}

/// Wallet and session errors.
#[derive(Error, Debug)]
pub enum WalletError {
    /// An action needing a signer was attempted in read-only mode.
    #[error("no wallet connected: set SIGHT_PRIVATE_KEY to sign transactions")]
    NotConnected,

    /// The configured private key could not be parsed.
    #[error("invalid private key: {0}")]
    InvalidKey(String),
}

/// Transaction submission and confirmation errors.
#[derive(Error, Debug)]
pub enum ActionError {
    /// The provider rejected the submission.
    #[error("submission failed: {0}")]
    SubmissionFailed(#[from] alloy::contract::Error),

    /// Waiting for the receipt failed.
    #[error("receipt error: {0}")]
    Receipt(#[from] alloy::providers::PendingTransactionError),

    /// The transaction was mined but reverted.
    #[error("transaction {tx_hash} reverted")]
    Reverted {
        /// Hash of the reverted transaction.
        tx_hash: String,
    },

    /// Token balance too low for the requested buy.
    #[error("insufficient balance: need {required}, have {available}")]
    InsufficientBalance {
        /// Required token amount.
        required: Decimal,
        /// Available token amount.
        available: Decimal,
    },

    /// Invalid action parameters.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// A chain read ahead of the submission failed.
    #[error("chain error: {0}")]
    Chain(#[from] ChainError),

    /// A signer is required for this action.
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, DashboardError>;
