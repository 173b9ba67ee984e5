use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};

use super::WitnessTypedData;
use crate::encoding::{self, Base64JsonError, DecimalU256, serialize_checksummed};
use crate::error::PayloadError;
use crate::scheme::PaymentScheme;

/// The final artifact shipped to a q402 facilitator.
///
/// Immutable once assembled: all fields are private and only readable.
///
/// # JSON Format
///
/// ```json
/// {
///   "witnessSignature": "0x...",
///   "authorization": { "chainId": 97, "implementationAddress": "0x...", "nonce": 0, "signature": "0x..." },
///   "paymentDetails": { "scheme": "evm/eip7702-delegated-payment", ..., "witness": { ... } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedPaymentPayload {
    witness_signature: Bytes,
    authorization: SignedAuthorizationData,
    payment_details: SignedPaymentDetails,
}

impl SignedPaymentPayload {
    /// Creates a payload from its three signed parts.
    #[must_use]
    pub const fn new(
        witness_signature: Bytes,
        authorization: SignedAuthorizationData,
        payment_details: SignedPaymentDetails,
    ) -> Self {
        Self {
            witness_signature,
            authorization,
            payment_details,
        }
    }

    /// EIP-712 signature over the embedded witness.
    #[must_use]
    pub const fn witness_signature(&self) -> &Bytes {
        &self.witness_signature
    }

    /// Signed EIP-7702 delegation tuple.
    #[must_use]
    pub const fn authorization(&self) -> &SignedAuthorizationData {
        &self.authorization
    }

    /// Normalized payment details with the embedded witness descriptor.
    #[must_use]
    pub const fn payment_details(&self) -> &SignedPaymentDetails {
        &self.payment_details
    }

    /// Renders the payload as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Serialization`] if JSON rendering fails.
    pub fn to_json_pretty(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Renders the payload as base64-encoded JSON for an HTTP header.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Serialization`] if JSON rendering fails.
    pub fn to_header_value(&self) -> Result<String, PayloadError> {
        Ok(encoding::encode_base64_json(self)?)
    }

    /// Parses a payload from a base64-encoded JSON header value.
    ///
    /// # Errors
    ///
    /// Returns [`Base64JsonError`] if the value is not a base64 payload.
    pub fn from_header_value(value: &str) -> Result<Self, Base64JsonError> {
        encoding::decode_base64_json(value)
    }
}

/// A signed EIP-7702 delegation tuple in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedAuthorizationData {
    /// EIP-155 chain id the delegation is valid on.
    pub chain_id: u64,
    /// Contract the payer's account delegates to.
    #[serde(serialize_with = "serialize_checksummed")]
    pub implementation_address: Address,
    /// Account nonce the delegation is bound to.
    pub nonce: u64,
    /// 65-byte `r || s || v` signature.
    pub signature: Bytes,
}

/// Payment details as emitted in a signed payload.
///
/// Mirrors [`PaymentDetails`](super::PaymentDetails) with validated, canonical
/// values and the populated witness descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedPaymentDetails {
    /// Authorization mechanism.
    pub scheme: PaymentScheme,
    /// Human-readable network id.
    pub network_id: String,
    /// Token contract address.
    #[serde(serialize_with = "serialize_checksummed")]
    pub token: Address,
    /// Amount in the token's smallest unit.
    pub amount: DecimalU256,
    /// Recipient address.
    #[serde(serialize_with = "serialize_checksummed")]
    pub to: Address,
    /// Delegation implementation contract.
    #[serde(serialize_with = "serialize_checksummed")]
    pub implementation_contract: Address,
    /// Validated delegation parameters.
    pub authorization: AuthorizationContext,
    /// The typed-data descriptor that `witnessSignature` signs.
    pub witness: WitnessTypedData,
}

/// Validated delegation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationContext {
    /// EIP-155 chain id.
    pub chain_id: u64,
    /// Verifying contract of the witness domain.
    #[serde(serialize_with = "serialize_checksummed")]
    pub address: Address,
    /// Account nonce.
    pub nonce: u64,
}
