//! Static contract interface bindings.
//!
//! The entire ABI surface this client depends on. Addresses are
//! configuration; everything behind these interfaces lives on chain.

use std::str::FromStr;

use alloy::primitives::Address;
use alloy::sol;

use crate::error::ChainError;

sol! {
    /// Binary prediction-market contract.
    #[sol(rpc)]
    interface IPredictionMarket {
        function marketCount() external view returns (uint256);

        function getMarketInfo(uint256 marketId)
            external
            view
            returns (
                string memory question,
                string memory optionA,
                string memory optionB,
                uint256 endTime,
                uint8 outcome,
                uint256 totalOptionAShares,
                uint256 totalOptionBShares,
                bool resolved
            );

        function getSharesBalance(uint256 marketId, address user)
            external
            view
            returns (uint256 optionAShares, uint256 optionBShares);

        function buyShares(uint256 marketId, bool isOptionA, uint256 amount) external;

        function claimWinnings(uint256 marketId) external;
    }

    /// Betting token with a fixed-amount faucet.
    #[sol(rpc)]
    interface IBetCoin {
        function balanceOf(address account) external view returns (uint256);

        function allowance(address owner, address spender) external view returns (uint256);

        function approve(address spender, uint256 amount) external returns (bool);

        function claim() external;
    }
}

/// Parse a configured contract address, naming the field on failure.
pub fn parse_address(field: &'static str, value: &str) -> Result<Address, ChainError> {
    Address::from_str(value).map_err(|_| ChainError::InvalidAddress {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_address_accepts_checksummed_hex() {
        let parsed = parse_address("market", "0x1111111111111111111111111111111111111111");
        assert!(parsed.is_ok());
    }

    #[test]
    fn parse_address_names_the_field() {
        let err = parse_address("token", "not-an-address").unwrap_err();
        assert!(err.to_string().contains("token"));
    }
}
