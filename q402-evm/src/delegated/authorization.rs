//! EIP-7702 delegation tuple derivation.

use q402::PayloadError;

use super::types::UnsignedAuthorization;
use crate::chain::{parse_address, validate_chain_id};

/// Derives the unsigned delegation tuple.
///
/// Pass-through apart from validation: the returned tuple has the same
/// chain id, implementation and nonce the caller supplied.
///
/// # Errors
///
/// Returns [`PayloadError::InvalidChainId`], [`PayloadError::InvalidAddress`]
/// or [`PayloadError::InvalidNonce`] for the corresponding malformed input.
pub fn build_authorization(
    chain_id: u64,
    implementation_address: &str,
    nonce: i64,
) -> Result<UnsignedAuthorization, PayloadError> {
    let chain_id = validate_chain_id(chain_id)?;
    let implementation_address = parse_address("implementationContract", implementation_address)?;
    let nonce = u64::try_from(nonce).map_err(|_| PayloadError::InvalidNonce(nonce))?;
    Ok(UnsignedAuthorization {
        chain_id,
        implementation_address,
        nonce,
    })
}
