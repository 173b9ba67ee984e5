#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! EVM support for q402 delegated payments.
//!
//! This crate turns caller-supplied [`PaymentDetails`](q402::PaymentDetails)
//! into a [`SignedPaymentPayload`](q402::SignedPaymentPayload) by signing an
//! EIP-712 witness and an EIP-7702 delegation tuple with the same account.
//!
//! # Example
//!
//! ```no_run
//! # async fn run(details: q402::PaymentDetails) -> Result<(), q402::PayloadError> {
//! use alloy_signer_local::PrivateKeySigner;
//! use q402_evm::delegated::create_signed_payment_payload;
//!
//! let signer = PrivateKeySigner::random();
//! let payload = create_signed_payment_payload(&signer, &details).await?;
//! println!("{}", payload.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`chain`] - Chain id and address validation
//! - [`delegated`] - The EIP-7702 delegated payment scheme
//!
//! # Feature Flags
//!
//! - `telemetry` - Tracing instrumentation of payload construction

pub mod chain;
pub mod delegated;

pub use delegated::{
    PayloadOptions, PaymentSigner, SigningMode, WitnessBuilder, create_signed_payment_payload,
    create_signed_payment_payload_with,
};
