//! Wire types for q402 payments.
//!
//! Payment construction is two-phase, and each phase has its own type:
//!
//! - [`PaymentDetails`] is what a caller supplies. It carries no witness; any
//!   `witness` key present in incoming JSON is ignored.
//! - [`SignedPaymentDetails`] is what the assembler emits inside a
//!   [`SignedPaymentPayload`]. Its `witness` holds the full EIP-712 typed-data
//!   descriptor that was signed.
//!
//! Input types keep addresses and amounts as the caller wrote them so that
//! validation can report precise errors. Output types are fully typed and
//! canonical: checksummed addresses and decimal-string integers.
//!
//! # Wire Format
//!
//! All types serialize to JSON using camelCase field names.

use serde::{Deserialize, Serialize};

use crate::scheme::PaymentScheme;

mod payload;
mod witness;

pub use payload::*;
pub use witness::*;

/// Input parameters for a delegated payment.
///
/// # JSON Format
///
/// ```json
/// {
///   "scheme": "evm/eip7702-delegated-payment",
///   "networkId": "bsc-testnet",
///   "token": "0x337610d27c682e347c9cd60bd4b3b107c9d34ddd",
///   "amount": "1000000000000000000",
///   "to": "0x073C02ff48F6E81E6eFeE81B2a826B811bEaC855",
///   "implementationContract": "0x8aB283419554Fa7f7B332118F1815829B5C353DE",
///   "authorization": {
///     "chainId": 97,
///     "address": "0x8aB283419554Fa7f7B332118F1815829B5C353DE",
///     "nonce": 0
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    /// Authorization mechanism.
    pub scheme: PaymentScheme,

    /// Human-readable network id (e.g., `"bsc-testnet"`).
    pub network_id: String,

    /// Token contract address.
    pub token: String,

    /// Amount in the token's smallest unit, as a decimal string.
    pub amount: String,

    /// Recipient address.
    pub to: String,

    /// Delegation implementation contract. Must be whitelisted by the
    /// facilitator.
    pub implementation_contract: String,

    /// Chain-level delegation parameters.
    pub authorization: PaymentAuthorization,
}

/// Caller-supplied delegation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAuthorization {
    /// EIP-155 chain id.
    pub chain_id: u64,

    /// Verifying contract for the witness domain.
    pub address: String,

    /// Account nonce the delegation is bound to.
    ///
    /// Signed so that a negative value coming from a loosely typed caller is
    /// reported as an invalid nonce rather than a decoding failure.
    pub nonce: i64,
}
