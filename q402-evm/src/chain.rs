//! EVM chain primitives and input validation.
//!
//! Caller-supplied addresses and chain ids arrive as loosely typed wire
//! values. The helpers here turn them into alloy types or report the matching
//! [`PayloadError`] variant.

use alloy_primitives::Address;
use q402::PayloadError;

/// An EIP-155 chain ID (e.g., 56 for BSC, 97 for BSC testnet).
pub type ChainId = u64;

/// Largest chain id permitted by EIP-2294: `floor(MAX_UINT64 / 2) - 36`.
pub const MAX_CHAIN_ID: ChainId = u64::MAX / 2 - 36;

/// Formats a chain ID as a CAIP-2 identifier.
///
/// Example: `caip2(97)` returns `"eip155:97"`.
#[must_use]
pub fn caip2(chain_id: ChainId) -> String {
    format!("eip155:{chain_id}")
}

/// Checks that a chain id is positive and within the EIP-2294 range.
///
/// # Errors
///
/// Returns [`PayloadError::InvalidChainId`] otherwise.
pub fn validate_chain_id(chain_id: u64) -> Result<ChainId, PayloadError> {
    if chain_id == 0 || chain_id > MAX_CHAIN_ID {
        return Err(PayloadError::InvalidChainId(chain_id));
    }
    Ok(chain_id)
}

/// Parses a `0x`-prefixed 20-byte hex address.
///
/// All-lowercase and all-uppercase inputs are accepted as is. Mixed-case
/// inputs must carry a valid EIP-55 checksum.
///
/// # Errors
///
/// Returns [`PayloadError::InvalidAddress`] naming `field` if the value is
/// not a well-formed address.
pub fn parse_address(field: &'static str, value: &str) -> Result<Address, PayloadError> {
    let invalid = || PayloadError::invalid_address(field, value);
    let hex = value.strip_prefix("0x").ok_or_else(invalid)?;
    if hex.len() != 40 {
        return Err(invalid());
    }
    let has_lower = hex.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = hex.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        Address::parse_checksummed(value, None).map_err(|_| invalid())
    } else {
        value.parse::<Address>().map_err(|_| invalid())
    }
}
