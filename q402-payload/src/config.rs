//! Command-line configuration.
//!
//! Every flag can also be supplied through the environment, and a `.env`
//! file in the working directory is loaded before parsing.
//!
//! # Environment Variables
//!
//! - `PAYER_PRIVATE_KEY` - Payer key, hex with or without `0x` (required)
//! - `Q402_NETWORK` - Network id (default: `bsc-testnet`)
//! - `Q402_CHAIN_ID` - Overrides the chain id of the network
//! - `Q402_TOKEN`, `Q402_AMOUNT`, `Q402_TO` - Transfer parameters
//! - `Q402_IMPLEMENTATION` - Overrides the delegation target
//! - `Q402_VERIFYING_CONTRACT` - Witness verifying contract (default: the
//!   implementation contract)

use alloy_signer_local::PrivateKeySigner;
use clap::{Parser, ValueEnum};
use q402::PaymentScheme;
use q402::networks::network_by_id;
use q402::proto::{PaymentAuthorization, PaymentDetails};
use q402_evm::delegated::DEFAULT_WITNESS_VALIDITY_SECS;
use q402_evm::{PayloadOptions, SigningMode, WitnessBuilder};

/// Errors raised while resolving the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The network is not in the registry and no chain id was given.
    #[error("unknown network {0:?}; pass --chain-id")]
    UnknownNetwork(String),

    /// The network has no default implementation and none was given.
    #[error("no implementation contract known for {0:?}; pass --implementation")]
    MissingImplementation(String),

    /// The payer key does not parse. The key itself is never echoed.
    #[error("invalid PAYER_PRIVATE_KEY: {0}")]
    InvalidPrivateKey(String),
}

/// Output encoding of the signed payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// Base64 of the compact JSON, ready for an HTTP header.
    Base64,
}

/// Generates a signed q402 payment payload and prints it to stdout.
#[derive(Debug, Clone, Parser)]
#[command(name = "q402-payload", version, about)]
pub struct PayloadConfig {
    /// Payer private key.
    #[arg(long, env = "PAYER_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// Network id.
    #[arg(long, env = "Q402_NETWORK", default_value = "bsc-testnet")]
    pub network: String,

    /// Chain id; defaults to the registry entry for `--network`.
    #[arg(long, env = "Q402_CHAIN_ID")]
    pub chain_id: Option<u64>,

    /// Token contract address.
    #[arg(long, env = "Q402_TOKEN")]
    pub token: String,

    /// Amount in the token's smallest unit, as a decimal integer.
    #[arg(long, env = "Q402_AMOUNT")]
    pub amount: String,

    /// Recipient address.
    #[arg(long, env = "Q402_TO")]
    pub to: String,

    /// Implementation contract the payer delegates to.
    #[arg(long, env = "Q402_IMPLEMENTATION")]
    pub implementation: Option<String>,

    /// Verifying contract of the witness domain.
    #[arg(long, env = "Q402_VERIFYING_CONTRACT")]
    pub verifying_contract: Option<String>,

    /// Delegation nonce of the payer account.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub nonce: i64,

    /// Seconds until the generated witness deadline.
    #[arg(long, default_value_t = DEFAULT_WITNESS_VALIDITY_SECS)]
    pub validity_secs: u64,

    /// Request both signatures at once.
    #[arg(long)]
    pub concurrent: bool,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

impl PayloadConfig {
    /// Parses the payer key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPrivateKey`] if the key is malformed.
    pub fn signer(&self) -> Result<PrivateKeySigner, ConfigError> {
        self.private_key
            .trim()
            .parse()
            .map_err(|e: alloy_signer_local::LocalSignerError| {
                ConfigError::InvalidPrivateKey(e.to_string())
            })
    }

    /// Resolves the payment details, filling registry defaults.
    ///
    /// Only the network lookups happen here. Addresses, amount and nonce are
    /// validated by payload construction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the chain id or implementation can be
    /// neither read from the flags nor found in the registry.
    pub fn payment_details(&self) -> Result<PaymentDetails, ConfigError> {
        let known = network_by_id(&self.network);
        let chain_id = self
            .chain_id
            .or_else(|| known.map(|n| n.chain_id))
            .ok_or_else(|| ConfigError::UnknownNetwork(self.network.clone()))?;
        let implementation = match &self.implementation {
            Some(address) => address.clone(),
            None => known
                .and_then(|n| n.implementation_contract)
                .map(|address| address.to_checksum(None))
                .ok_or_else(|| ConfigError::MissingImplementation(self.network.clone()))?,
        };
        let verifying_contract = self
            .verifying_contract
            .clone()
            .unwrap_or_else(|| implementation.clone());

        Ok(PaymentDetails {
            scheme: PaymentScheme::Eip7702Delegated,
            network_id: self.network.clone(),
            token: self.token.clone(),
            amount: self.amount.clone(),
            to: self.to.clone(),
            implementation_contract: implementation,
            authorization: PaymentAuthorization {
                chain_id,
                address: verifying_contract,
                nonce: self.nonce,
            },
        })
    }

    /// Builds the construction options.
    #[must_use]
    pub fn payload_options(&self) -> PayloadOptions {
        PayloadOptions {
            witness: WitnessBuilder::new().with_validity_secs(self.validity_secs),
            signing_mode: if self.concurrent {
                SigningMode::Concurrent
            } else {
                SigningMode::Sequential
            },
        }
    }
}
