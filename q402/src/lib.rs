#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for q402 delegated payment payloads.
//!
//! A q402 payment is authorized off-chain by a single payer who produces two
//! signatures: an EIP-712 signature over a transfer *witness* and an EIP-7702
//! signature delegating the payer's account to a whitelisted implementation
//! contract. Both are shipped to a facilitator in one [`SignedPaymentPayload`]
//! which carries everything needed to recompute the signed hashes.
//!
//! This crate is chain-agnostic wire plumbing. Hashing and signing live in
//! `q402-evm`.
//!
//! # Modules
//!
//! - [`encoding`] - Lossless decimal-string encoding for 256-bit integers
//! - [`error`] - Error taxonomy for payload construction
//! - [`networks`] - Registry of well-known q402 networks
//! - [`proto`] - Input parameters and the signed payload wire format
//! - [`scheme`] - The closed set of q402 payment schemes
//! - [`timestamp`] - Unix timestamps used for witness deadlines

pub mod encoding;
pub mod error;
pub mod networks;
pub mod proto;
pub mod scheme;
pub mod timestamp;

pub use error::PayloadError;
pub use proto::{PaymentDetails, SignedPaymentPayload};
pub use scheme::PaymentScheme;
