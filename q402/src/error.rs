//! Error types for q402 payload construction.
//!
//! Every variant is terminal for the current construction attempt. Nothing is
//! retried internally; callers decide how to surface failures.

use std::fmt::{self, Display, Formatter};

use crate::encoding::DecimalError;

/// The signing step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigningStep {
    /// EIP-712 signature over the transfer witness.
    Witness,
    /// EIP-7702 signature over the delegation tuple.
    Authorization,
}

impl Display for SigningStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Witness => f.write_str("witness"),
            Self::Authorization => f.write_str("authorization"),
        }
    }
}

/// Errors that abort the construction of a signed payment payload.
///
/// The `Invalid*` variants are raised by input validation, which always runs
/// before any signer is invoked.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// A field does not parse as a 20-byte EVM address.
    #[error("invalid address in `{field}`: {value:?}")]
    InvalidAddress {
        /// Wire name of the offending field.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// The amount is not a non-negative integer that fits in 256 bits.
    #[error("invalid amount: {0}")]
    InvalidAmount(#[source] DecimalError),

    /// The chain id is zero or above the EIP-2294 ceiling.
    #[error("invalid chain id {0}")]
    InvalidChainId(u64),

    /// The delegation nonce is negative.
    #[error("invalid nonce {0}")]
    InvalidNonce(i64),

    /// The signer failed or refused to produce a signature.
    #[error("{step} signing failed: {reason}")]
    SigningFailed {
        /// Which of the two signatures failed.
        step: SigningStep,
        /// Signer-provided description of the failure.
        reason: String,
    },

    /// The assembler was missing a required intermediate value.
    #[error("incomplete payload: missing {0}")]
    IncompletePayload(&'static str),

    /// The assembled payload could not be rendered as JSON.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl PayloadError {
    /// Creates an [`PayloadError::InvalidAddress`] for the named wire field.
    #[must_use]
    pub fn invalid_address(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidAddress {
            field,
            value: value.into(),
        }
    }

    /// Creates a [`PayloadError::SigningFailed`] from any signer error.
    #[must_use]
    pub fn signing_failed(step: SigningStep, reason: impl Display) -> Self {
        Self::SigningFailed {
            step,
            reason: reason.to_string(),
        }
    }

    /// Returns `true` for errors raised by input validation.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAddress { .. }
                | Self::InvalidAmount(_)
                | Self::InvalidChainId(_)
                | Self::InvalidNonce(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_failed_message() {
        let err = PayloadError::signing_failed(SigningStep::Authorization, "user rejected");
        assert_eq!(err.to_string(), "authorization signing failed: user rejected");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_classification() {
        assert!(PayloadError::invalid_address("to", "0x12").is_validation());
        assert!(PayloadError::InvalidChainId(0).is_validation());
        assert!(PayloadError::InvalidNonce(-1).is_validation());
        assert!(PayloadError::InvalidAmount(DecimalError::Empty).is_validation());
        assert!(!PayloadError::IncompletePayload("witness signature").is_validation());
    }
}
