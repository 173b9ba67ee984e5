//! Final payload assembly.

use alloy_primitives::{Bytes, Signature};
use q402::PaymentScheme;
use q402::PayloadError;
use q402::proto::{
    AuthorizationContext, PaymentDetails, SignedPaymentDetails, SignedPaymentPayload,
    WITNESS_PRIMARY_TYPE, WitnessMessage, WitnessTypedData, WitnessTypes,
};

use super::types::{SignedAuthorization, Witness, WitnessSigningDomain};

/// Collects the signed parts of a payment and joins them into a
/// [`SignedPaymentPayload`].
///
/// This is the single synchronization point of payload construction: the
/// witness branch and the authorization branch each hand their results over,
/// and [`assemble`](Self::assemble) emits the payload only when every part is
/// present.
///
/// Normalized payment details are taken from the signed parts rather than
/// from the caller's strings. Token, amount and recipient come from the
/// witness, the verifying contract from the domain, and the implementation
/// and nonce from the signed tuple, so the payload cannot disagree with what
/// was signed.
#[derive(Debug, Clone, Default)]
pub struct PayloadAssembler {
    scheme: Option<PaymentScheme>,
    network_id: Option<String>,
    witness: Option<Witness>,
    domain: Option<WitnessSigningDomain>,
    witness_signature: Option<Signature>,
    authorization: Option<SignedAuthorization>,
}

impl PayloadAssembler {
    /// Creates an empty assembler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the caller's scheme and network id.
    #[must_use]
    pub fn payment_details(mut self, details: &PaymentDetails) -> Self {
        self.scheme = Some(details.scheme);
        self.network_id = Some(details.network_id.clone());
        self
    }

    /// Records the witness message that was signed.
    #[must_use]
    pub fn witness(mut self, witness: Witness) -> Self {
        self.witness = Some(witness);
        self
    }

    /// Records the domain the witness was signed under.
    #[must_use]
    pub const fn domain(mut self, domain: WitnessSigningDomain) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Records the witness signature.
    #[must_use]
    pub const fn witness_signature(mut self, signature: Signature) -> Self {
        self.witness_signature = Some(signature);
        self
    }

    /// Records the signed delegation tuple.
    #[must_use]
    pub const fn authorization(mut self, authorization: SignedAuthorization) -> Self {
        self.authorization = Some(authorization);
        self
    }

    /// Emits the payload.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::IncompletePayload`] naming the first missing
    /// part.
    pub fn assemble(self) -> Result<SignedPaymentPayload, PayloadError> {
        let scheme = self
            .scheme
            .ok_or(PayloadError::IncompletePayload("payment details"))?;
        let network_id = self
            .network_id
            .ok_or(PayloadError::IncompletePayload("payment details"))?;
        let witness = self
            .witness
            .ok_or(PayloadError::IncompletePayload("witness message"))?;
        let domain = self
            .domain
            .ok_or(PayloadError::IncompletePayload("witness domain"))?;
        let witness_signature = self
            .witness_signature
            .ok_or(PayloadError::IncompletePayload("witness signature"))?;
        let authorization = self
            .authorization
            .ok_or(PayloadError::IncompletePayload("signed authorization"))?;

        let tuple = authorization.tuple();
        let typed_data = WitnessTypedData {
            domain: domain.to_wire(),
            types: WitnessTypes::canonical(),
            primary_type: WITNESS_PRIMARY_TYPE.to_owned(),
            message: WitnessMessage::from(&witness),
        };
        let details = SignedPaymentDetails {
            scheme,
            network_id,
            token: witness.token,
            amount: witness.amount.into(),
            to: witness.to,
            implementation_contract: tuple.implementation_address,
            authorization: AuthorizationContext {
                chain_id: domain.chain_id,
                address: domain.verifying_contract,
                nonce: tuple.nonce,
            },
            witness: typed_data,
        };

        Ok(SignedPaymentPayload::new(
            Bytes::from(witness_signature.as_bytes()),
            authorization.to_wire(),
            details,
        ))
    }
}
