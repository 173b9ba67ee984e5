//! Witness signing domain derivation.

use q402::PayloadError;

use super::types::WitnessSigningDomain;
use crate::chain::{parse_address, validate_chain_id};

/// Derives the q402 witness domain from a chain id and verifying contract.
///
/// Name and version are the fixed protocol constants `"q402"` and `"1"`.
///
/// # Errors
///
/// Returns [`PayloadError::InvalidChainId`] for a chain id outside the
/// EIP-2294 range and [`PayloadError::InvalidAddress`] for a malformed
/// verifying contract.
pub fn build_domain(
    chain_id: u64,
    verifying_contract: &str,
) -> Result<WitnessSigningDomain, PayloadError> {
    let chain_id = validate_chain_id(chain_id)?;
    let verifying_contract = parse_address("authorization.address", verifying_contract)?;
    Ok(WitnessSigningDomain {
        chain_id,
        verifying_contract,
    })
}
