//! Owner domain — controller lookup and ownership transfer.

#[cfg(feature = "ws-native")]
pub mod client;
pub mod wire;

use crate::error::SdkError;
use crate::signer::to_checksum_address;

/// Check that `address` is a 20-byte hex address and return it EIP-55 encoded.
pub fn parse_owner_address(address: &str) -> Result<String, SdkError> {
    to_checksum_address(address).ok_or_else(|| SdkError::InvalidAddress(address.to_string()))
}
