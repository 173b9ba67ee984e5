//! EIP-7702 delegated payment scheme.
//!
//! A delegated payment carries two signatures by the same payer:
//!
//! - an EIP-712 signature over a [`Witness`] (owner, token, amount,
//!   recipient, deadline, payment id, nonce) under the `q402` domain
//! - an EIP-7702 signature delegating the payer's account to the
//!   implementation contract that executes the transfer
//!
//! # Components
//!
//! - [`WitnessBuilder`] - witness message derivation
//! - [`build_domain`] - witness signing domain
//! - [`build_authorization`] - unsigned delegation tuple
//! - [`PaymentSigner`] - the signing capability
//! - [`PayloadAssembler`] - joins the signed parts into a payload
//! - [`create_signed_payment_payload`] - the whole protocol end to end

mod assemble;
mod authorization;
mod client;
mod domain;
mod signer;
mod witness;

pub mod types;

pub use assemble::*;
pub use authorization::*;
pub use client::*;
pub use domain::*;
pub use signer::*;
pub use types::*;
pub use witness::*;
