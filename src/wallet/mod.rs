//! Wallet session handling.
//!
//! This module provides utilities for:
//! - Creating signers from private keys
//! - Computing wallet addresses
//! - Tracking whether the session can sign transactions

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::config::Config;
use crate::error::WalletError;

/// Create a signer from a hex-encoded private key.
///
/// The private key can be with or without the "0x" prefix.
pub fn create_signer(private_key: &str) -> Result<PrivateKeySigner, WalletError> {
    let key = private_key.strip_prefix("0x").unwrap_or(private_key);
    let bytes = hex::decode(key)
        .map_err(|e| WalletError::InvalidKey(format!("invalid hex: {}", e)))?;

    if bytes.len() != 32 {
        return Err(WalletError::InvalidKey(format!(
            "private key must be 32 bytes, got {}",
            bytes.len()
        )));
    }

    let mut key_bytes = [0u8; 32];
    key_bytes.copy_from_slice(&bytes);

    PrivateKeySigner::from_bytes(&key_bytes.into())
        .map_err(|e| WalletError::InvalidKey(format!("failed to create signer: {}", e)))
}

/// Get the wallet address from a private key.
pub fn address_from_private_key(private_key: &str) -> Result<Address, WalletError> {
    Ok(create_signer(private_key)?.address())
}

/// The session's signing capability, derived from configuration.
///
/// A read-only session can fetch and render everything; share balances and
/// actions require a connected wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    /// No key configured; reads only.
    ReadOnly,
    /// A signer is available for the given address.
    Connected {
        /// Address derived from the configured key.
        address: Address,
    },
}

impl Session {
    /// Build the session from configuration.
    pub fn from_config(config: &Config) -> Result<Self, WalletError> {
        match &config.sight_private_key {
            Some(key) => Ok(Session::Connected {
                address: address_from_private_key(key)?,
            }),
            None => Ok(Session::ReadOnly),
        }
    }

    /// The connected address, if any.
    pub fn address(&self) -> Option<Address> {
        match self {
            Session::Connected { address } => Some(*address),
            Session::ReadOnly => None,
        }
    }

    /// Whether the session can sign transactions.
    pub fn is_connected(&self) -> bool {
        matches!(self, Session::Connected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str =
        "0x0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn create_signer_valid_key() {
        assert!(create_signer(TEST_KEY).is_ok());
    }

    #[test]
    fn create_signer_without_prefix() {
        let key = TEST_KEY.strip_prefix("0x").unwrap();
        assert!(create_signer(key).is_ok());
    }

    #[test]
    fn create_signer_invalid_hex() {
        assert!(create_signer("0xnot_valid_hex").is_err());
    }

    #[test]
    fn create_signer_wrong_length() {
        assert!(create_signer("0x1234").is_err());
    }

    #[test]
    fn address_is_deterministic() {
        let a = address_from_private_key(TEST_KEY).unwrap();
        let b = address_from_private_key(TEST_KEY).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn session_without_key_is_read_only() {
        let session = Session::ReadOnly;
        assert!(!session.is_connected());
        assert_eq!(session.address(), None);
    }

    #[test]
    fn session_with_key_is_connected() {
        let address = address_from_private_key(TEST_KEY).unwrap();
        let session = Session::Connected { address };
        assert!(session.is_connected());
        assert_eq!(session.address(), Some(address));
    }
}
