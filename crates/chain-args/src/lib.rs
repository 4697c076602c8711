//! Network selection shared by the bind tooling.
//!
//! The tool only ever talks to BNB Smart Chain. The network type flag picks the
//! chain id, the default RPC endpoint and the block explorer used for links.

use alloy::primitives::{Address, B256};
use clap::{Args, ValueEnum};
use std::fmt;

pub const MAINNET_CHAIN_ID: u64 = 56;
pub const TESTNET_CHAIN_ID: u64 = 97;

pub const MAINNET_RPC_URL: &str = "https://bsc-dataseed1.binance.org:443";
pub const TESTNET_RPC_URL: &str = "https://data-seed-prebsc-1-s1.binance.org:8545";

const MAINNET_EXPLORER: &str = "https://bscscan.com";
const TESTNET_EXPLORER: &str = "https://testnet.bscscan.com";

/// BNB Smart Chain network type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Network {
    #[value(name = "mainnet")]
    Mainnet,
    #[default]
    #[value(name = "testnet")]
    Testnet,
}

impl Network {
    pub fn chain_id(self) -> u64 {
        match self {
            Network::Mainnet => MAINNET_CHAIN_ID,
            Network::Testnet => TESTNET_CHAIN_ID,
        }
    }

    pub fn default_rpc_url(self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_RPC_URL,
            Network::Testnet => TESTNET_RPC_URL,
        }
    }

    fn explorer(self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_EXPLORER,
            Network::Testnet => TESTNET_EXPLORER,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

/// Chain selection flags, flattened into each binary's CLI
#[derive(Args, Clone, Debug)]
pub struct ChainArgs {
    /// Network to operate on (mainnet or testnet)
    #[arg(long = "network-type", env = "NETWORK_TYPE", value_enum, default_value_t = Network::Testnet)]
    pub network: Network,

    /// Override the RPC endpoint of the selected network
    #[arg(long, env = "RPC_URL")]
    pub rpc_url: Option<String>,
}

impl ChainArgs {
    /// Resolve the flags into the context every operation runs against.
    pub fn resolve(&self) -> ChainContext {
        let rpc_url = self
            .rpc_url
            .clone()
            .unwrap_or_else(|| self.network.default_rpc_url().to_string());
        ChainContext {
            network: self.network,
            rpc_url,
            chain_id: self.network.chain_id(),
        }
    }
}

/// Resolved network for a single run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainContext {
    pub network: Network,
    pub rpc_url: String,
    pub chain_id: u64,
}

impl ChainContext {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            rpc_url: network.default_rpc_url().to_string(),
            chain_id: network.chain_id(),
        }
    }

    /// Block explorer link for a transaction
    pub fn tx_url(&self, tx_hash: B256) -> String {
        format!("{}/tx/{tx_hash}", self.network.explorer())
    }

    /// Block explorer link for an account or contract
    pub fn address_url(&self, address: Address) -> String {
        format!("{}/address/{address}", self.network.explorer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        chain: ChainArgs,
    }

    #[test]
    fn test_chain_ids() {
        assert_eq!(ChainContext::new(Network::Testnet).chain_id, 97);
        assert_eq!(ChainContext::new(Network::Mainnet).chain_id, 56);
    }

    #[test]
    fn test_network_flag_resolution() {
        let cli = TestCli::try_parse_from(["tool", "--network-type", "mainnet"]).unwrap();
        let ctx = cli.chain.resolve();
        assert_eq!(ctx.network, Network::Mainnet);
        assert_eq!(ctx.chain_id, 56);
        assert_eq!(ctx.rpc_url, MAINNET_RPC_URL);

        let cli = TestCli::try_parse_from(["tool", "--network-type", "testnet"]).unwrap();
        assert_eq!(cli.chain.resolve().chain_id, 97);
    }

    #[test]
    fn test_unknown_network_rejected() {
        assert!(TestCli::try_parse_from(["tool", "--network-type", "goerli"]).is_err());
    }

    #[test]
    fn test_rpc_override_keeps_chain_id() {
        let cli = TestCli::try_parse_from([
            "tool",
            "--network-type",
            "testnet",
            "--rpc-url",
            "http://127.0.0.1:8545",
        ])
        .unwrap();
        let ctx = cli.chain.resolve();
        assert_eq!(ctx.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(ctx.chain_id, TESTNET_CHAIN_ID);
    }

    #[test]
    fn test_explorer_links() {
        let ctx = ChainContext::new(Network::Testnet);
        let address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
            .parse::<Address>()
            .unwrap();
        assert_eq!(
            ctx.address_url(address),
            "https://testnet.bscscan.com/address/0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );

        let ctx = ChainContext::new(Network::Mainnet);
        let url = ctx.tx_url(B256::ZERO);
        assert!(url.starts_with("https://bscscan.com/tx/0x"));
        assert_eq!(url.len(), "https://bscscan.com/tx/".len() + 66);
    }
}
