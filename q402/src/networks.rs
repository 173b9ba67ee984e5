//! Well-known q402 networks.
//!
//! Payment details name their network with a human-readable id such as
//! `"bsc-testnet"`. This registry maps those ids to EIP-155 chain ids and,
//! where one is deployed, to the default delegation implementation contract
//! whitelisted by the facilitator.

use alloy_primitives::{Address, address};

/// A known network definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkInfo {
    /// Human-readable network id (e.g., `"bsc-testnet"`).
    pub id: &'static str,
    /// EIP-155 chain id.
    pub chain_id: u64,
    /// Default delegation implementation contract, if one is deployed.
    pub implementation_contract: Option<Address>,
}

/// BNB Smart Chain mainnet chain id.
pub const BSC_MAINNET: u64 = 56;

/// BNB Smart Chain testnet chain id.
pub const BSC_TESTNET: u64 = 97;

/// q402 delegation implementation deployed on BSC testnet.
pub const BSC_TESTNET_IMPLEMENTATION: Address =
    address!("0x8aB283419554Fa7f7B332118F1815829B5C353DE");

/// All networks known to this crate.
pub static KNOWN_NETWORKS: &[NetworkInfo] = &[
    NetworkInfo {
        id: "bsc-mainnet",
        chain_id: BSC_MAINNET,
        implementation_contract: None,
    },
    NetworkInfo {
        id: "bsc-testnet",
        chain_id: BSC_TESTNET,
        implementation_contract: Some(BSC_TESTNET_IMPLEMENTATION),
    },
];

/// Looks up a network by its human-readable id.
#[must_use]
pub fn network_by_id(id: &str) -> Option<&'static NetworkInfo> {
    KNOWN_NETWORKS.iter().find(|n| n.id == id)
}

/// Looks up a network by its EIP-155 chain id.
#[must_use]
pub fn network_by_chain_id(chain_id: u64) -> Option<&'static NetworkInfo> {
    KNOWN_NETWORKS.iter().find(|n| n.chain_id == chain_id)
}
