//! Witness message derivation.

use alloy_primitives::{Address, B256, U256};
use q402::PayloadError;
use q402::encoding::parse_decimal_u256;
use q402::timestamp::UnixTimestamp;
use rand::RngExt;
use rand::rng;

use super::types::Witness;
use crate::chain::parse_address;

/// Default time a generated witness stays redeemable, in seconds.
pub const DEFAULT_WITNESS_VALIDITY_SECS: u64 = 15 * 60;

/// Builds [`Witness`] messages.
///
/// `deadline`, `paymentId` and `nonce` may be pinned explicitly; whatever is
/// left unset is generated on every [`build`](Self::build) call:
///
/// - deadline: now plus the validity window
/// - payment id: 32 random bytes
/// - nonce: a random 256-bit value
///
/// Pinned values are used verbatim. In particular a pinned deadline is not
/// checked against the clock; expiry is the verifier's call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WitnessBuilder {
    deadline: Option<UnixTimestamp>,
    payment_id: Option<B256>,
    nonce: Option<U256>,
    validity_secs: u64,
}

impl Default for WitnessBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WitnessBuilder {
    /// Creates a builder that generates every optional field.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            deadline: None,
            payment_id: None,
            nonce: None,
            validity_secs: DEFAULT_WITNESS_VALIDITY_SECS,
        }
    }

    /// Pins the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: UnixTimestamp) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Pins the payment id.
    #[must_use]
    pub const fn with_payment_id(mut self, payment_id: B256) -> Self {
        self.payment_id = Some(payment_id);
        self
    }

    /// Pins the witness nonce.
    #[must_use]
    pub const fn with_nonce(mut self, nonce: U256) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Sets the validity window used when the deadline is generated.
    ///
    /// Zero is raised to one second so a generated deadline is always in the
    /// future.
    #[must_use]
    pub const fn with_validity_secs(mut self, secs: u64) -> Self {
        self.validity_secs = if secs == 0 { 1 } else { secs };
        self
    }

    /// Builds a witness for `owner` paying `amount` of `token` to `to`.
    ///
    /// `owner` is typed because it always comes from the signer, never from
    /// caller input.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::InvalidAddress`] if `token` or `to` do not
    /// parse and [`PayloadError::InvalidAmount`] if `amount` is not a
    /// non-negative decimal integer within 256 bits.
    pub fn build(
        &self,
        owner: Address,
        token: &str,
        amount: &str,
        to: &str,
    ) -> Result<Witness, PayloadError> {
        let token = parse_address("token", token)?;
        let to = parse_address("to", to)?;
        let amount = parse_decimal_u256(amount).map_err(PayloadError::InvalidAmount)?;

        let deadline = self
            .deadline
            .unwrap_or_else(|| UnixTimestamp::now() + self.validity_secs);
        let payment_id = self.payment_id.unwrap_or_else(random_b256);
        let nonce = self
            .nonce
            .unwrap_or_else(|| U256::from_be_bytes(random_b256().0));

        Ok(Witness {
            owner,
            token,
            amount,
            to,
            deadline: deadline.to_u256(),
            paymentId: payment_id,
            nonce,
        })
    }
}

fn random_b256() -> B256 {
    let bytes: [u8; 32] = rng().random();
    B256::from(bytes)
}
