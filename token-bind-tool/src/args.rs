use crate::config::{BindConfig, parse_bsc_address};
use crate::consts::{DEFAULT_KEYSTORE_PASSWORD, DEFAULT_KEYSTORE_PATH, DEFAULT_LEDGER_ACCOUNTS_FILE};
use alloy::primitives::{Address, U256};
use anyhow::{Context, Result};
use bind_contract_clients::PollConfig;
use bind_contract_clients::common::poll::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_POLL_TIMEOUT_SECS};
use chain_args::ChainArgs;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Operation run by a single invocation
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    /// Create or load the temporary account, optionally deriving Ledger accounts
    #[value(name = "initKey")]
    InitKey,
    /// Deploy the BEP20 contract from the temporary account
    #[value(name = "deployContract")]
    DeployContract,
    /// Approve and bind the token, then hand contract ownership to the ledger account
    #[value(name = "approveBindAndTransferOwnership")]
    ApproveBindAndTransferOwnership,
    /// Send the temporary account's leftover BNB to the ledger account
    #[value(name = "refundRestBNB")]
    RefundRestBnb,
    /// Deploy, transfer supply and ownership to the ledger account, then refund
    #[value(name = "deploy_transferTokenAndOwnership_refund")]
    DeployTransferTokenAndOwnershipRefund,
    /// Approve and bind the token, signing with a Ledger account
    #[value(name = "approveBindFromLedger")]
    ApproveBindFromLedger,
}

/// CLI arguments for the token bind tool
#[derive(Parser, Debug)]
#[command(name = "token-bind-tool")]
#[command(
    about = "Bind a BEP2 token to a freshly deployed BEP20 contract on BNB Smart Chain",
    long_about = None
)]
pub struct CliArgs {
    #[command(flatten)]
    pub chain: ChainArgs,

    /// Operation to perform
    #[arg(long, env = "OPERATION", value_enum)]
    pub operation: Operation,

    /// Directory holding the temporary account's key file
    #[arg(long, env = "KEYSTORE_PATH", default_value = DEFAULT_KEYSTORE_PATH)]
    pub keystore_path: PathBuf,

    /// Passphrase of the temporary account's key file
    #[arg(long, env = "KEYSTORE_PASSWORD", default_value = DEFAULT_KEYSTORE_PASSWORD, hide_env_values = true)]
    pub keystore_password: String,

    /// Bind config file (JSON)
    #[arg(long, env = "CONFIG_PATH")]
    pub config_path: Option<PathBuf>,

    /// BEP20 contract address
    #[arg(long = "bep20-contract-addr", env = "BEP20_CONTRACT_ADDR", value_parser = parse_address_flag)]
    pub bep20_contract_addr: Option<Address>,

    /// Ledger account address receiving the refund
    #[arg(long, env = "LEDGER_ACCOUNT", value_parser = parse_address_flag)]
    pub ledger_account: Option<Address>,

    /// Number of Ledger accounts to derive
    #[arg(long, env = "LEDGER_ACCOUNT_NUMBER", default_value_t = 1)]
    pub ledger_account_number: u32,

    /// Index of the Ledger account signing the bind
    #[arg(long, env = "LEDGER_ACCOUNT_INDEX", default_value_t = 0)]
    pub ledger_account_index: u32,

    /// Token amount (smallest unit, decimal) approved from the Ledger account
    #[arg(long, env = "PEGGY_AMOUNT", value_parser = parse_amount)]
    pub peggy_amount: Option<U256>,

    /// Also derive Ledger accounts during initKey
    #[arg(long, env = "DERIVE_LEDGER_ACCOUNTS")]
    pub derive_ledger_accounts: bool,

    /// Shell script receiving the derived Ledger addresses
    #[arg(long, env = "LEDGER_ACCOUNTS_FILE", default_value = DEFAULT_LEDGER_ACCOUNTS_FILE)]
    pub ledger_accounts_file: PathBuf,

    /// Seconds between receipt polls
    #[arg(
        long,
        env = "RECEIPT_POLL_INTERVAL_SECS",
        default_value_t = DEFAULT_POLL_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub receipt_poll_interval_secs: u64,

    /// Seconds to wait for a transaction to be mined
    #[arg(long, env = "RECEIPT_TIMEOUT_SECS", default_value_t = DEFAULT_POLL_TIMEOUT_SECS)]
    pub receipt_timeout_secs: u64,
}

impl CliArgs {
    pub fn poll_config(&self) -> PollConfig {
        PollConfig::from_secs(self.receipt_poll_interval_secs, self.receipt_timeout_secs)
    }

    /// Load the bind config named by `--config-path`
    pub fn bind_config(&self) -> Result<BindConfig> {
        let path = self
            .config_path
            .as_ref()
            .context("--config-path is required for this operation")?;
        BindConfig::load(path)
    }

    pub fn bep20_contract(&self) -> Result<Address> {
        self.bep20_contract_addr
            .context("--bep20-contract-addr is required for this operation")
    }

    pub fn refund_address(&self) -> Result<Address> {
        self.ledger_account
            .context("--ledger-account is required as the refund address")
    }

    pub fn peggy_amount(&self) -> Result<U256> {
        self.peggy_amount
            .context("--peggy-amount is required for this operation")
    }
}

fn parse_address_flag(value: &str) -> Result<Address, String> {
    parse_bsc_address(value).map_err(|e| e.to_string())
}

fn parse_amount(value: &str) -> Result<U256, String> {
    U256::from_str_radix(value, 10).map_err(|e| format!("invalid peggy amount '{value}': {e}"))
}
