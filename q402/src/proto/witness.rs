use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::encoding::{DecimalU256, serialize_checksummed};

/// EIP-712 domain name of the q402 witness.
pub const WITNESS_DOMAIN_NAME: &str = "q402";

/// EIP-712 domain version of the q402 witness.
pub const WITNESS_DOMAIN_VERSION: &str = "1";

/// EIP-712 primary type of the q402 witness.
pub const WITNESS_PRIMARY_TYPE: &str = "Witness";

/// Field `(name, type)` pairs of the `Witness` struct, in signing order.
///
/// This schema is fixed per protocol version. Reordering or renaming a field
/// changes the EIP-712 type hash and invalidates every signature.
pub const WITNESS_FIELDS: [(&str, &str); 7] = [
    ("owner", "address"),
    ("token", "address"),
    ("amount", "uint256"),
    ("to", "address"),
    ("deadline", "uint256"),
    ("paymentId", "bytes32"),
    ("nonce", "uint256"),
];

/// The complete typed-data descriptor a payer signed.
///
/// Embedding it lets a verifier recompute the EIP-712 signing hash without
/// any out-of-band knowledge of the protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WitnessTypedData {
    /// Signing domain.
    pub domain: WitnessDomain,
    /// Type schema, keyed by struct name.
    pub types: WitnessTypes,
    /// Always [`WITNESS_PRIMARY_TYPE`].
    pub primary_type: String,
    /// The signed message.
    pub message: WitnessMessage,
}

/// EIP-712 domain of the witness signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WitnessDomain {
    /// Always [`WITNESS_DOMAIN_NAME`].
    pub name: String,
    /// Always [`WITNESS_DOMAIN_VERSION`].
    pub version: String,
    /// EIP-155 chain id.
    pub chain_id: u64,
    /// Contract that verifies the witness.
    #[serde(serialize_with = "serialize_checksummed")]
    pub verifying_contract: Address,
}

impl WitnessDomain {
    /// Creates the q402 domain for a chain and verifying contract.
    #[must_use]
    pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: WITNESS_DOMAIN_NAME.to_owned(),
            version: WITNESS_DOMAIN_VERSION.to_owned(),
            chain_id,
            verifying_contract,
        }
    }
}

/// One `{ "name", "type" }` entry of an EIP-712 struct definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedField {
    /// Field name.
    pub name: String,
    /// Solidity type.
    #[serde(rename = "type")]
    pub ty: String,
}

/// The `types` object of the witness descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessTypes {
    /// Fields of the `Witness` struct.
    #[serde(rename = "Witness")]
    pub witness: Vec<TypedField>,
}

impl WitnessTypes {
    /// Returns the schema built from [`WITNESS_FIELDS`].
    #[must_use]
    pub fn canonical() -> Self {
        let witness = WITNESS_FIELDS
            .iter()
            .map(|(name, ty)| TypedField {
                name: (*name).to_owned(),
                ty: (*ty).to_owned(),
            })
            .collect();
        Self { witness }
    }

    /// Renders the EIP-712 `encodeType` string of the `Witness` struct.
    ///
    /// Example: `Witness(address owner,address token,...)`.
    #[must_use]
    pub fn encode_type(&self) -> String {
        let fields = self
            .witness
            .iter()
            .map(|f| format!("{} {}", f.ty, f.name))
            .collect::<Vec<_>>()
            .join(",");
        format!("{WITNESS_PRIMARY_TYPE}({fields})")
    }
}

/// The signed witness message in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WitnessMessage {
    /// Payer address. Always equals the signer of both signatures.
    #[serde(serialize_with = "serialize_checksummed")]
    pub owner: Address,
    /// Token contract address.
    #[serde(serialize_with = "serialize_checksummed")]
    pub token: Address,
    /// Amount in the token's smallest unit.
    pub amount: DecimalU256,
    /// Recipient address.
    #[serde(serialize_with = "serialize_checksummed")]
    pub to: Address,
    /// Unix timestamp after which the witness is invalid.
    pub deadline: DecimalU256,
    /// Unique per-payment identifier.
    pub payment_id: B256,
    /// Replay-protection nonce.
    pub nonce: DecimalU256,
}
