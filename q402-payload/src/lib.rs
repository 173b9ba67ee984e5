//! Signed q402 payment payload generator.
//!
//! Resolves payment parameters from flags and the environment, signs them
//! with the payer key and prints the resulting payload.
//!
//! # Modules
//!
//! - [`config`] - Command-line and environment configuration

pub mod config;

pub use config::{ConfigError, OutputFormat, PayloadConfig};
