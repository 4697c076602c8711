//! Ledger hardware wallet accounts.
//!
//! Accounts live at `m/44'/60'/{index}'/0/0`. Every open holds the USB session
//! until the returned signer is dropped.

use crate::consts::LEDGER_ACCOUNTS_VAR;
use alloy::{network::EthereumWallet, primitives::Address};
use anyhow::{Context, Result};
use std::{fmt::Write as _, fs, path::Path};
use tracing::info;

/// Derivation path of the Ledger account at `index`
pub fn derivation_path(index: u32) -> String {
    format!("m/44'/60'/{index}'/0/0")
}

/// Open the Ledger account at `index` as a transaction-signing wallet.
#[cfg(feature = "ledger")]
pub async fn open_wallet(index: u32, chain_id: u64) -> Result<(EthereumWallet, Address)> {
    let signer = open(index, chain_id).await?;
    let address = alloy::signers::Signer::address(&signer);
    Ok((EthereumWallet::from(signer), address))
}

#[cfg(not(feature = "ledger"))]
pub async fn open_wallet(_index: u32, _chain_id: u64) -> Result<(EthereumWallet, Address)> {
    anyhow::bail!("built without Ledger support, rebuild with the `ledger` feature")
}

/// Derive the first `count` Ledger accounts, one device session per index.
#[cfg(feature = "ledger")]
pub async fn derive_accounts(count: u32, chain_id: u64) -> Result<Vec<Address>> {
    let mut accounts = Vec::with_capacity(count as usize);
    for index in 0..count {
        let signer = open(index, chain_id).await?;
        accounts.push(alloy::signers::Signer::address(&signer));
    }
    Ok(accounts)
}

#[cfg(not(feature = "ledger"))]
pub async fn derive_accounts(_count: u32, _chain_id: u64) -> Result<Vec<Address>> {
    anyhow::bail!("built without Ledger support, rebuild with the `ledger` feature")
}

#[cfg(feature = "ledger")]
async fn open(index: u32, chain_id: u64) -> Result<alloy::signers::ledger::LedgerSigner> {
    use alloy::signers::ledger::{HDPath, LedgerSigner};

    let signer = LedgerSigner::new(HDPath::LedgerLive(index as usize), Some(chain_id))
        .await
        .with_context(|| {
            format!(
                "Failed to derive Ledger account {} (is the device unlocked with the Ethereum app open?)",
                derivation_path(index)
            )
        })?;
    info!(
        index,
        path = %derivation_path(index),
        address = %alloy::signers::Signer::address(&signer),
        "Derived Ledger account"
    );
    Ok(signer)
}

/// Shell script exporting the derived addresses as a bash array.
pub fn exports_script(accounts: &[Address]) -> String {
    let mut script = String::from("#!/usr/bin/env bash\n");
    let _ = writeln!(script, "{LEDGER_ACCOUNTS_VAR}=(");
    for account in accounts {
        let _ = writeln!(script, "  \"{account}\"");
    }
    script.push_str(")\n");
    let _ = writeln!(script, "export {LEDGER_ACCOUNTS_VAR}");
    script
}

/// Write the exports script for `accounts` to `path`.
pub fn write_exports(path: &Path, accounts: &[Address]) -> Result<()> {
    fs::write(path, exports_script(accounts))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), count = accounts.len(), "Wrote Ledger account exports");
    Ok(())
}
