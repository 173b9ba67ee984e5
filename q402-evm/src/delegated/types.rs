//! Typed building blocks of a q402 delegated payment.

use alloy_eips::eip7702::Authorization;
use alloy_primitives::{Address, B256, Bytes, Signature, U256};
use alloy_sol_types::{Eip712Domain, eip712_domain, sol};
use q402::proto::{
    SignedAuthorizationData, WITNESS_DOMAIN_NAME, WITNESS_DOMAIN_VERSION, WitnessDomain,
    WitnessMessage,
};

use crate::chain::ChainId;

sol!(
    /// EIP-712 struct signed by the payer to express transfer intent.
    ///
    /// Field order and types MUST match
    /// [`WITNESS_FIELDS`](q402::proto::WITNESS_FIELDS), which is what the
    /// payload embeds for verifiers.
    #[derive(Debug, PartialEq, Eq)]
    struct Witness {
        address owner;
        address token;
        uint256 amount;
        address to;
        uint256 deadline;
        bytes32 paymentId;
        uint256 nonce;
    }
);

impl From<&Witness> for WitnessMessage {
    fn from(witness: &Witness) -> Self {
        Self {
            owner: witness.owner,
            token: witness.token,
            amount: witness.amount.into(),
            to: witness.to,
            deadline: witness.deadline.into(),
            payment_id: witness.paymentId,
            nonce: witness.nonce.into(),
        }
    }
}

/// Validated signing context of the witness.
///
/// Both the EIP-712 domain used for hashing and the wire descriptor embedded
/// in the payload are derived from this one value, so they cannot diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WitnessSigningDomain {
    /// EIP-155 chain id.
    pub chain_id: ChainId,
    /// Contract that verifies the witness.
    pub verifying_contract: Address,
}

impl WitnessSigningDomain {
    /// Returns the alloy EIP-712 domain used to hash the witness.
    #[must_use]
    pub fn eip712(&self) -> Eip712Domain {
        eip712_domain! {
            name: WITNESS_DOMAIN_NAME,
            version: WITNESS_DOMAIN_VERSION,
            chain_id: self.chain_id,
            verifying_contract: self.verifying_contract,
        }
    }

    /// Returns the domain in wire form.
    #[must_use]
    pub fn to_wire(&self) -> WitnessDomain {
        WitnessDomain::new(self.chain_id, self.verifying_contract)
    }
}

/// An EIP-7702 delegation tuple awaiting the payer's signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnsignedAuthorization {
    /// EIP-155 chain id the delegation is valid on.
    pub chain_id: ChainId,
    /// Contract the payer's account delegates to.
    pub implementation_address: Address,
    /// Account nonce the delegation is bound to.
    pub nonce: u64,
}

impl UnsignedAuthorization {
    /// Converts into the alloy EIP-7702 authorization.
    #[must_use]
    pub fn to_eip7702(&self) -> Authorization {
        Authorization {
            chain_id: U256::from(self.chain_id),
            address: self.implementation_address,
            nonce: self.nonce,
        }
    }

    /// Returns `keccak256(0x05 || rlp([chain_id, address, nonce]))`.
    #[must_use]
    pub fn signature_hash(&self) -> B256 {
        self.to_eip7702().signature_hash()
    }
}

/// A delegation tuple together with the payer's signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedAuthorization {
    tuple: UnsignedAuthorization,
    signature: Signature,
}

impl SignedAuthorization {
    /// Pairs a tuple with its signature.
    #[must_use]
    pub const fn new(tuple: UnsignedAuthorization, signature: Signature) -> Self {
        Self { tuple, signature }
    }

    /// The signed tuple.
    #[must_use]
    pub const fn tuple(&self) -> &UnsignedAuthorization {
        &self.tuple
    }

    /// The payer's signature.
    #[must_use]
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Returns the authorization in wire form.
    #[must_use]
    pub fn to_wire(&self) -> SignedAuthorizationData {
        SignedAuthorizationData {
            chain_id: self.tuple.chain_id,
            implementation_address: self.tuple.implementation_address,
            nonce: self.tuple.nonce,
            signature: Bytes::from(self.signature.as_bytes()),
        }
    }
}
