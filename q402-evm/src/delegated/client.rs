//! Client-side construction of signed q402 payment payloads.
//!
//! [`create_signed_payment_payload`] runs the whole protocol:
//!
//! 1. validate the input and build the witness, its domain and the
//!    delegation tuple (no signer call happens before all three succeed)
//! 2. sign the witness and the delegation tuple
//! 3. assemble the payload
//!
//! The two signing branches are independent. [`SigningMode`] decides whether
//! they run one after the other or are polled together; either way the first
//! failure aborts construction and no payload is produced.

use futures_util::future::try_join;
use q402::PayloadError;
use q402::error::SigningStep;
use q402::proto::{PaymentDetails, SignedPaymentPayload};
#[cfg(feature = "telemetry")]
use tracing::instrument;

use super::assemble::PayloadAssembler;
use super::authorization::build_authorization;
use super::domain::build_domain;
use super::signer::PaymentSigner;
use super::types::SignedAuthorization;
use super::witness::WitnessBuilder;

/// How the two signatures are requested from the signer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SigningMode {
    /// Witness first, then authorization. The authorization is never
    /// requested if the witness signature fails.
    #[default]
    Sequential,
    /// Both requests are in flight at once. Only use with signers that
    /// tolerate concurrent requests.
    Concurrent,
}

/// Options for [`create_signed_payment_payload_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayloadOptions {
    /// Witness deadline, payment id and nonce policy.
    pub witness: WitnessBuilder,
    /// Ordering of the two signing requests.
    pub signing_mode: SigningMode,
}

/// Builds and signs a payment payload with default options.
///
/// # Errors
///
/// See [`create_signed_payment_payload_with`].
pub async fn create_signed_payment_payload<S: PaymentSigner>(
    signer: &S,
    details: &PaymentDetails,
) -> Result<SignedPaymentPayload, PayloadError> {
    create_signed_payment_payload_with(signer, details, &PayloadOptions::default()).await
}

/// Builds and signs a payment payload.
///
/// The witness `owner` is always `signer.address()`; the caller cannot
/// supply it.
///
/// # Errors
///
/// Returns a validation error (`InvalidAddress`, `InvalidAmount`,
/// `InvalidChainId`, `InvalidNonce`) before any signer call, or
/// [`PayloadError::SigningFailed`] if either signature fails.
#[cfg_attr(
    feature = "telemetry",
    instrument(skip_all, err, fields(network = %details.network_id, mode = ?options.signing_mode))
)]
pub async fn create_signed_payment_payload_with<S: PaymentSigner>(
    signer: &S,
    details: &PaymentDetails,
    options: &PayloadOptions,
) -> Result<SignedPaymentPayload, PayloadError> {
    let owner = signer.address();
    let witness = options
        .witness
        .build(owner, &details.token, &details.amount, &details.to)?;
    let domain = build_domain(details.authorization.chain_id, &details.authorization.address)?;
    let tuple = build_authorization(
        details.authorization.chain_id,
        &details.implementation_contract,
        details.authorization.nonce,
    )?;
    #[cfg(feature = "telemetry")]
    tracing::debug!(%owner, chain_id = domain.chain_id, "payment inputs validated");

    let eip712_domain = domain.eip712();
    let witness_branch = async {
        signer
            .sign_typed_data(&eip712_domain, &witness)
            .await
            .map_err(|e| PayloadError::signing_failed(SigningStep::Witness, e))
    };
    let authorization = tuple.to_eip7702();
    let authorization_branch = async {
        signer
            .sign_authorization(&authorization)
            .await
            .map(|signature| SignedAuthorization::new(tuple, signature))
            .map_err(|e| PayloadError::signing_failed(SigningStep::Authorization, e))
    };

    let (witness_signature, signed_authorization) = match options.signing_mode {
        SigningMode::Sequential => {
            let witness_signature = witness_branch.await?;
            #[cfg(feature = "telemetry")]
            tracing::debug!("witness signed");
            (witness_signature, authorization_branch.await?)
        }
        SigningMode::Concurrent => try_join(witness_branch, authorization_branch).await?,
    };
    #[cfg(feature = "telemetry")]
    tracing::debug!("authorization signed");

    PayloadAssembler::new()
        .payment_details(details)
        .witness(witness)
        .domain(domain)
        .witness_signature(witness_signature)
        .authorization(signed_authorization)
        .assemble()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use alloy_dyn_abi::TypedData;
    use alloy_eips::eip7702::Authorization;
    use alloy_primitives::{Address, B256, Signature, U256};
    use alloy_signer_local::PrivateKeySigner;
    use alloy_sol_types::{Eip712Domain, SolStruct};
    use q402::timestamp::UnixTimestamp;
    use serde_json::{Value, json};

    use super::*;

    const IMPLEMENTATION: &str = "0x8aB283419554Fa7f7B332118F1815829B5C353DE";

    fn payer() -> PrivateKeySigner {
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
            .parse()
            .unwrap()
    }

    fn details() -> PaymentDetails {
        serde_json::from_value(json!({
            "scheme": "evm/eip7702-delegated-payment",
            "networkId": "bsc-testnet",
            "token": Address::repeat_byte(0x0b).to_string(),
            "amount": "1000000000000000000",
            "to": Address::repeat_byte(0x0c).to_string(),
            "implementationContract": IMPLEMENTATION,
            "witness": {},
            "authorization": { "chainId": 97, "address": IMPLEMENTATION, "nonce": 0 }
        }))
        .unwrap()
    }

    /// Wraps a key and counts (or refuses) signing requests.
    #[derive(Debug)]
    struct RecordingSigner {
        inner: PrivateKeySigner,
        reject_witness: bool,
        reject_authorization: bool,
        witness_calls: AtomicUsize,
        authorization_calls: AtomicUsize,
    }

    impl RecordingSigner {
        fn new(reject_witness: bool, reject_authorization: bool) -> Self {
            Self {
                inner: payer(),
                reject_witness,
                reject_authorization,
                witness_calls: AtomicUsize::new(0),
                authorization_calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> (usize, usize) {
            (
                self.witness_calls.load(Ordering::SeqCst),
                self.authorization_calls.load(Ordering::SeqCst),
            )
        }
    }

    impl PaymentSigner for RecordingSigner {
        fn address(&self) -> Address {
            self.inner.address()
        }

        async fn sign_typed_data<T: SolStruct + Sync>(
            &self,
            domain: &Eip712Domain,
            message: &T,
        ) -> Result<Signature, alloy_signer::Error> {
            self.witness_calls.fetch_add(1, Ordering::SeqCst);
            if self.reject_witness {
                return Err(alloy_signer::Error::other("user rejected witness"));
            }
            PaymentSigner::sign_typed_data(&self.inner, domain, message).await
        }

        async fn sign_authorization(
            &self,
            authorization: &Authorization,
        ) -> Result<Signature, alloy_signer::Error> {
            self.authorization_calls.fetch_add(1, Ordering::SeqCst);
            if self.reject_authorization {
                return Err(alloy_signer::Error::other("user rejected authorization"));
            }
            PaymentSigner::sign_authorization(&self.inner, authorization).await
        }
    }

    /// Recomputes the witness hash from the emitted JSON alone, the way a
    /// facilitator does.
    fn witness_hash_from_json(witness: &Value) -> Option<B256> {
        let mut typed = witness.clone();
        typed["types"]["EIP712Domain"] = json!([
            {"name": "name", "type": "string"},
            {"name": "version", "type": "string"},
            {"name": "chainId", "type": "uint256"},
            {"name": "verifyingContract", "type": "address"}
        ]);
        let typed: TypedData = serde_json::from_value(typed).ok()?;
        typed.eip712_signing_hash().ok()
    }

    fn recovers_to(signature_hex: &Value, hash: B256, expected: Address) -> bool {
        let bytes = alloy_primitives::hex::decode(signature_hex.as_str().unwrap()).unwrap();
        let signature = Signature::from_raw(&bytes).unwrap();
        signature
            .recover_address_from_prehash(&hash)
            .is_ok_and(|a| a == expected)
    }

    #[tokio::test]
    async fn test_end_to_end_payload_verifies() {
        let signer = payer();
        let payload = create_signed_payment_payload(&signer, &details())
            .await
            .unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        let witness = &json["paymentDetails"]["witness"];

        assert_eq!(witness["message"]["amount"], "1000000000000000000");
        assert_eq!(
            witness["message"]["owner"],
            signer.address().to_checksum(None)
        );
        assert_eq!(witness["domain"]["name"], "q402");
        assert_eq!(witness["domain"]["chainId"], 97);
        assert_eq!(witness["domain"]["verifyingContract"], IMPLEMENTATION);
        assert_eq!(json["paymentDetails"]["implementationContract"], IMPLEMENTATION);
        assert_eq!(json["authorization"]["implementationAddress"], IMPLEMENTATION);

        let hash = witness_hash_from_json(witness).unwrap();
        assert!(recovers_to(&json["witnessSignature"], hash, signer.address()));

        let authorization = &json["authorization"];
        let tuple = Authorization {
            chain_id: U256::from(authorization["chainId"].as_u64().unwrap()),
            address: authorization["implementationAddress"]
                .as_str()
                .unwrap()
                .parse()
                .unwrap(),
            nonce: authorization["nonce"].as_u64().unwrap(),
        };
        assert!(recovers_to(
            &authorization["signature"],
            tuple.signature_hash(),
            signer.address()
        ));
    }

    #[tokio::test]
    async fn test_lowercase_addresses_come_back_checksummed() {
        let mut details = details();
        let lowercase = IMPLEMENTATION.to_lowercase();
        details.implementation_contract = lowercase.clone();
        details.authorization.address = lowercase;
        let payload = create_signed_payment_payload(&payer(), &details)
            .await
            .unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        let details = &json["paymentDetails"];
        assert_eq!(details["implementationContract"], IMPLEMENTATION);
        assert_eq!(details["authorization"]["address"], IMPLEMENTATION);
        assert_eq!(details["witness"]["domain"]["verifyingContract"], IMPLEMENTATION);
        assert_eq!(json["authorization"]["implementationAddress"], IMPLEMENTATION);
    }

    #[tokio::test]
    async fn test_json_hash_matches_signed_hash() {
        let signer = payer();
        let payload = create_signed_payment_payload(&signer, &details())
            .await
            .unwrap();
        let json = serde_json::to_value(&payload).unwrap();

        let typed = &payload.payment_details().witness;
        let witness = crate::delegated::Witness {
            owner: typed.message.owner,
            token: typed.message.token,
            amount: typed.message.amount.inner(),
            to: typed.message.to,
            deadline: typed.message.deadline.inner(),
            paymentId: typed.message.payment_id,
            nonce: typed.message.nonce.inner(),
        };
        let domain = build_domain(typed.domain.chain_id, IMPLEMENTATION)
            .unwrap()
            .eip712();
        assert_eq!(
            witness_hash_from_json(&json["paymentDetails"]["witness"]),
            Some(witness.eip712_signing_hash(&domain))
        );
    }

    #[tokio::test]
    async fn test_tampering_breaks_witness_signature() {
        let signer = payer();
        let payload = create_signed_payment_payload(&signer, &details())
            .await
            .unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        let witness = &json["paymentDetails"]["witness"];
        let signature = &json["witnessSignature"];

        let tampered_amount = {
            let mut w = witness.clone();
            w["message"]["amount"] = json!("1000000000000000001");
            w
        };
        let tampered_domain = {
            let mut w = witness.clone();
            w["domain"]["version"] = json!("2");
            w
        };
        let tampered_chain = {
            let mut w = witness.clone();
            w["domain"]["chainId"] = json!(56);
            w
        };
        let tampered_schema = {
            let mut w = witness.clone();
            w["types"]["Witness"][2]["type"] = json!("uint128");
            w
        };
        let tampered_payment_id = {
            let mut w = witness.clone();
            w["message"]["paymentId"] = json!(B256::repeat_byte(0xee).to_string());
            w
        };

        for tampered in [
            tampered_amount,
            tampered_domain,
            tampered_chain,
            tampered_schema,
            tampered_payment_id,
        ] {
            let verified = witness_hash_from_json(&tampered)
                .is_some_and(|hash| recovers_to(signature, hash, signer.address()));
            assert!(!verified, "tampered witness still verifies: {tampered}");
        }
    }

    #[tokio::test]
    async fn test_owner_always_equals_signer() {
        let signer = RecordingSigner::new(false, false);
        let payload = create_signed_payment_payload(&signer, &details())
            .await
            .unwrap();
        assert_eq!(
            payload.payment_details().witness.message.owner,
            signer.inner.address()
        );
        assert_eq!(signer.calls(), (1, 1));
    }

    #[tokio::test]
    async fn test_witness_rejection_skips_authorization() {
        let signer = RecordingSigner::new(true, false);
        let err = create_signed_payment_payload(&signer, &details())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PayloadError::SigningFailed {
                step: SigningStep::Witness,
                ..
            }
        ));
        assert_eq!(signer.calls(), (1, 0));
    }

    #[tokio::test]
    async fn test_authorization_rejection_yields_no_payload() {
        let signer = RecordingSigner::new(false, true);
        let err = create_signed_payment_payload(&signer, &details())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PayloadError::SigningFailed {
                step: SigningStep::Authorization,
                ..
            }
        ));
        assert_eq!(signer.calls(), (1, 1));
    }

    #[tokio::test]
    async fn test_concurrent_mode_fails_when_either_branch_fails() {
        let options = PayloadOptions {
            signing_mode: SigningMode::Concurrent,
            ..PayloadOptions::default()
        };
        for (reject_witness, reject_authorization) in [(true, false), (false, true)] {
            let signer = RecordingSigner::new(reject_witness, reject_authorization);
            let result = create_signed_payment_payload_with(&signer, &details(), &options).await;
            assert!(matches!(result, Err(PayloadError::SigningFailed { .. })));
        }
    }

    #[tokio::test]
    async fn test_concurrent_mode_matches_sequential() {
        let witness = WitnessBuilder::new()
            .with_deadline(UnixTimestamp::from_secs(1_900_000_000))
            .with_payment_id(B256::repeat_byte(0x42))
            .with_nonce(U256::from(1u64));
        let sequential = PayloadOptions {
            witness: witness.clone(),
            signing_mode: SigningMode::Sequential,
        };
        let concurrent = PayloadOptions {
            witness,
            signing_mode: SigningMode::Concurrent,
        };
        let signer = payer();
        let a = create_signed_payment_payload_with(&signer, &details(), &sequential)
            .await
            .unwrap();
        let b = create_signed_payment_payload_with(&signer, &details(), &concurrent)
            .await
            .unwrap();
        // RFC 6979 signatures are deterministic.
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_validation_runs_before_signing() {
        let cases: [(&str, Value); 4] = [
            ("amount", json!("1.5")),
            ("to", json!("0x1234")),
            ("implementationContract", json!("nope")),
            ("authorization", json!({ "chainId": 0, "address": IMPLEMENTATION, "nonce": 0 })),
        ];
        for (field, value) in cases {
            let mut input = serde_json::to_value(details()).unwrap();
            input[field] = value;
            let input: PaymentDetails = serde_json::from_value(input).unwrap();
            let signer = RecordingSigner::new(false, false);
            let err = create_signed_payment_payload(&signer, &input)
                .await
                .unwrap_err();
            assert!(err.is_validation(), "{field}: {err}");
            assert_eq!(signer.calls(), (0, 0), "{field}");
        }
    }

    #[tokio::test]
    async fn test_negative_nonce_rejected_before_signing() {
        let mut input = details();
        input.authorization.nonce = -3;
        let signer = RecordingSigner::new(false, false);
        let err = create_signed_payment_payload(&signer, &input)
            .await
            .unwrap_err();
        assert!(matches!(err, PayloadError::InvalidNonce(-3)));
        assert_eq!(signer.calls(), (0, 0));
    }

    #[tokio::test]
    async fn test_fresh_payment_ids_per_payload() {
        let signer = payer();
        let a = create_signed_payment_payload(&signer, &details())
            .await
            .unwrap();
        let b = create_signed_payment_payload(&signer, &details())
            .await
            .unwrap();
        let (ma, mb) = (
            &a.payment_details().witness.message,
            &b.payment_details().witness.message,
        );
        assert_ne!(ma.payment_id, mb.payment_id);
        assert!(mb.deadline >= ma.deadline);
    }
}
