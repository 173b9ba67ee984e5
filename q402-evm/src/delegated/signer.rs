//! The signing capability consumed by payload construction.

use std::future::Future;
use std::sync::Arc;

use alloy_eips::eip7702::Authorization;
use alloy_primitives::{Address, Signature};
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::{Eip712Domain, SolStruct};

/// A payer account able to produce both q402 signatures.
///
/// Implementations may suspend while signing (hardware wallets, remote
/// signers, interactive approval). Construction never retries: any error is
/// terminal for the payload being built.
///
/// Concurrent use of one signer is only attempted when the caller opts into
/// [`SigningMode::Concurrent`](super::SigningMode::Concurrent).
pub trait PaymentSigner: Send + Sync {
    /// Returns the payer address. Used as the witness `owner`.
    fn address(&self) -> Address;

    /// Signs an EIP-712 struct under `domain`.
    fn sign_typed_data<T: SolStruct + Sync>(
        &self,
        domain: &Eip712Domain,
        message: &T,
    ) -> impl Future<Output = Result<Signature, alloy_signer::Error>> + Send;

    /// Signs an EIP-7702 delegation tuple.
    fn sign_authorization(
        &self,
        authorization: &Authorization,
    ) -> impl Future<Output = Result<Signature, alloy_signer::Error>> + Send;
}

impl PaymentSigner for PrivateKeySigner {
    fn address(&self) -> Address {
        Self::address(self)
    }

    async fn sign_typed_data<T: SolStruct + Sync>(
        &self,
        domain: &Eip712Domain,
        message: &T,
    ) -> Result<Signature, alloy_signer::Error> {
        let hash = message.eip712_signing_hash(domain);
        alloy_signer::Signer::sign_hash(self, &hash).await
    }

    async fn sign_authorization(
        &self,
        authorization: &Authorization,
    ) -> Result<Signature, alloy_signer::Error> {
        let hash = authorization.signature_hash();
        alloy_signer::Signer::sign_hash(self, &hash).await
    }
}

impl<T: PaymentSigner> PaymentSigner for Arc<T> {
    fn address(&self) -> Address {
        (**self).address()
    }

    async fn sign_typed_data<M: SolStruct + Sync>(
        &self,
        domain: &Eip712Domain,
        message: &M,
    ) -> Result<Signature, alloy_signer::Error> {
        (**self).sign_typed_data(domain, message).await
    }

    async fn sign_authorization(
        &self,
        authorization: &Authorization,
    ) -> Result<Signature, alloy_signer::Error> {
        (**self).sign_authorization(authorization).await
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{B256, U256};

    use super::*;
    use crate::delegated::{Witness, WitnessSigningDomain};

    fn signer() -> PrivateKeySigner {
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
            .parse()
            .unwrap()
    }

    #[tokio::test]
    async fn test_typed_data_signature_recovers_signer() {
        let signer = signer();
        let domain = WitnessSigningDomain {
            chain_id: 97,
            verifying_contract: Address::repeat_byte(0xd0),
        }
        .eip712();
        let witness = Witness {
            owner: PaymentSigner::address(&signer),
            token: Address::repeat_byte(0xb0),
            amount: U256::from(1u64),
            to: Address::repeat_byte(0xc0),
            deadline: U256::from(1_700_000_000u64),
            paymentId: B256::repeat_byte(0x01),
            nonce: U256::ZERO,
        };
        let signature = PaymentSigner::sign_typed_data(&signer, &domain, &witness)
            .await
            .unwrap();
        let recovered = signature
            .recover_address_from_prehash(&witness.eip712_signing_hash(&domain))
            .unwrap();
        assert_eq!(recovered, signer.address());
    }

    #[tokio::test]
    async fn test_arc_signer_delegates() {
        let inner = signer();
        let expected = inner.address();
        let shared = Arc::new(inner);
        let authorization = Authorization {
            chain_id: U256::from(97u64),
            address: Address::repeat_byte(0xd0),
            nonce: 0,
        };
        let signature = PaymentSigner::sign_authorization(&shared, &authorization)
            .await
            .unwrap();
        assert_eq!(PaymentSigner::address(&shared), expected);
        let recovered = signature
            .recover_address_from_prehash(&authorization.signature_hash())
            .unwrap();
        assert_eq!(recovered, expected);
    }
}
