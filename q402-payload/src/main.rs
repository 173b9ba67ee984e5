//! Command-line generator for signed q402 payment payloads.
//!
//! # Usage
//!
//! ```bash
//! PAYER_PRIVATE_KEY=0x... cargo run -p q402-payload -- \
//!     --token 0x337610d27c682e347c9cd60bd4b3b107c9d34ddd \
//!     --amount 1000000000000000000 \
//!     --to 0x073c02ff48f6e81e6efee81b2a826b811beac855
//!
//! # Header-ready output
//! cargo run -p q402-payload -- --output base64 ...
//! ```
//!
//! The payload goes to stdout; logs go to stderr and are filtered by
//! `RUST_LOG` (default: `info`).

use std::io::Write;

use clap::Parser;
use q402::networks::network_by_chain_id;
use q402_evm::chain::caip2;
use q402_evm::create_signed_payment_payload_with;
use tracing_subscriber::EnvFilter;

use q402_payload::config::{OutputFormat, PayloadConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        tracing::error!("Payload generation failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = PayloadConfig::parse();
    let signer = config.signer()?;
    let details = config.payment_details()?;

    let chain_id = details.authorization.chain_id;
    if let Some(known) = network_by_chain_id(chain_id).filter(|n| n.id != details.network_id) {
        tracing::warn!(
            network = %details.network_id,
            chain = %caip2(chain_id),
            registered = known.id,
            "Chain id belongs to a different network"
        );
    }
    tracing::info!(
        payer = %signer.address(),
        network = %details.network_id,
        chain = %caip2(chain_id),
        implementation = %details.implementation_contract,
        "Signing payment payload"
    );

    let payload =
        create_signed_payment_payload_with(&signer, &details, &config.payload_options()).await?;
    let details = payload.payment_details();
    tracing::info!(
        payment_id = %details.witness.message.payment_id,
        deadline = %details.witness.message.deadline,
        "Payload signed"
    );

    let rendered = match config.output {
        OutputFormat::Json => payload.to_json_pretty()?,
        OutputFormat::Base64 => payload.to_header_value()?,
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}
