//! Transaction actions against the market and token contracts.
//!
//! Thin pass-throughs: each action submits one fixed-shape call through the
//! provider and surfaces the provider's own status. No local retry; a failed
//! submission is logged and handed back for manual retry.

use alloy::network::Ethereum;
use alloy::primitives::{Address, U256};
use alloy::providers::PendingTransactionBuilder;
use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::Display;
use tracing::{debug, error, info, instrument};

use crate::chain::ChainClient;
use crate::error::{ActionError, WalletError};
use crate::market::Outcome;
use crate::metrics;
use crate::ui::format::token_amount_decimal;

/// Terminal status of a submitted transaction, as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TxStatus {
    /// Mined and successful.
    Confirmed,
    /// Mined but reverted.
    Reverted,
}

/// Receipt record surfaced to the user after an action.
#[derive(Debug, Clone, Serialize)]
pub struct ActionReceipt {
    /// Which action was submitted.
    pub action: &'static str,
    /// Transaction hash.
    pub tx_hash: String,
    /// Provider-reported status.
    pub status: TxStatus,
    /// Block the transaction landed in.
    pub block_number: Option<u64>,
    /// Gas used by the transaction.
    pub gas_used: u64,
    /// When the submission left this process.
    pub submitted_at: DateTime<Utc>,
}

/// The connected wallet address, or fail fast in read-only mode.
fn require_wallet(client: &ChainClient) -> Result<Address, ActionError> {
    client
        .wallet_address()
        .ok_or_else(|| WalletError::NotConnected.into())
}

/// Wait out a pending transaction and fold the receipt into an
/// [`ActionReceipt`], counting the outcome in metrics.
async fn confirm(
    action: &'static str,
    pending: PendingTransactionBuilder<Ethereum>,
    submitted_at: DateTime<Utc>,
) -> Result<ActionReceipt, ActionError> {
    let tx_hash = pending.tx_hash().to_string();
    debug!(action, tx_hash = %tx_hash, "transaction submitted");

    let receipt = pending.get_receipt().await?;
    if receipt.status() {
        metrics::inc_tx_confirmed();
        info!(
            action,
            tx_hash = %tx_hash,
            block = ?receipt.block_number,
            "transaction confirmed"
        );
        Ok(ActionReceipt {
            action,
            tx_hash,
            status: TxStatus::Confirmed,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            submitted_at,
        })
    } else {
        metrics::inc_tx_reverted();
        error!(action, tx_hash = %tx_hash, "transaction reverted");
        Err(ActionError::Reverted { tx_hash })
    }
}

/// Claim winnings from a resolved market.
#[instrument(skip(client))]
pub async fn claim_winnings(
    client: &ChainClient,
    market_id: u64,
) -> Result<ActionReceipt, ActionError> {
    require_wallet(client)?;
    client.ensure_market_exists(market_id).await?;

    let submitted_at = Utc::now();
    let pending = client
        .market_contract()
        .claimWinnings(U256::from(market_id))
        .send()
        .await?;
    metrics::inc_tx_submitted();

    confirm("claim_winnings", pending, submitted_at).await
}

/// Claim the token faucet's fixed amount.
#[instrument(skip(client))]
pub async fn claim_faucet(client: &ChainClient) -> Result<ActionReceipt, ActionError> {
    require_wallet(client)?;

    let submitted_at = Utc::now();
    let pending = client.token_contract().claim().send().await?;
    metrics::inc_tx_submitted();

    confirm("claim_faucet", pending, submitted_at).await
}

/// Buy shares in an open market.
///
/// Checks balance up front and approves the market contract for the exact
/// purchase amount when the current allowance is short. The approve is
/// confirmed before the buy goes out.
#[instrument(skip(client), fields(outcome = %outcome))]
pub async fn buy_shares(
    client: &ChainClient,
    market_id: u64,
    outcome: Outcome,
    amount: U256,
    token_decimals: u8,
) -> Result<ActionReceipt, ActionError> {
    let wallet = require_wallet(client)?;

    if amount.is_zero() {
        return Err(ActionError::InvalidParams(
            "amount must be positive".to_string(),
        ));
    }

    client.ensure_market_exists(market_id).await?;

    let market = client.market(market_id).await?;
    if market.is_expired() {
        return Err(ActionError::InvalidParams(format!(
            "market {} has expired",
            market_id
        )));
    }

    let balance = client.token_balance(wallet).await?;
    if balance < amount {
        return Err(ActionError::InsufficientBalance {
            required: token_amount_decimal(amount, token_decimals),
            available: token_amount_decimal(balance, token_decimals),
        });
    }

    let allowance = client.token_allowance(wallet).await?;
    if allowance < amount {
        debug!(market_id, "allowance short, approving purchase amount");
        let pending = client
            .token_contract()
            .approve(client.market_address(), amount)
            .send()
            .await?;
        metrics::inc_tx_submitted();
        confirm("approve", pending, Utc::now()).await?;
    }

    let submitted_at = Utc::now();
    let pending = client
        .market_contract()
        .buyShares(U256::from(market_id), outcome == Outcome::OptionA, amount)
        .send()
        .await?;
    metrics::inc_tx_submitted();

    confirm("buy_shares", pending, submitted_at).await
}
