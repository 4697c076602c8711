//! Temporary signing account kept in a local keystore directory.
//!
//! The directory holds at most one encrypted key file. An empty directory gets a
//! freshly generated account; a single file is unlocked and reused so that later
//! operations sign with the account that deployed the contract.

use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use anyhow::{Context, Result, bail};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// Unlocked temporary account
#[derive(Debug, Clone)]
pub struct TemporaryAccount {
    pub signer: PrivateKeySigner,
    pub key_file: PathBuf,
    /// True when the key file was generated by this run
    pub created: bool,
}

impl TemporaryAccount {
    /// Unlock the single account in `dir`, or create one when `dir` is empty.
    ///
    /// More than one key file in `dir` is a configuration error.
    pub fn get_or_create(dir: &Path, password: &str) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create keystore directory {}", dir.display()))?;

        let mut key_files = list_key_files(dir)?;
        match key_files.len() {
            0 => {
                let (secret, uuid) =
                    eth_keystore::new(dir, &mut rand::thread_rng(), password, None)
                        .context("Failed to create temporary account")?;
                let signer = PrivateKeySigner::from_slice(&secret)?;
                let key_file = dir.join(uuid);
                info!(address = %signer.address(), key_file = %key_file.display(), "Created temporary account");
                Ok(Self {
                    signer,
                    key_file,
                    created: true,
                })
            }
            1 => {
                let key_file = key_files.remove(0);
                let secret = eth_keystore::decrypt_key(&key_file, password)
                    .with_context(|| format!("Failed to unlock {}", key_file.display()))?;
                let signer = PrivateKeySigner::from_slice(&secret)?;
                info!(address = %signer.address(), key_file = %key_file.display(), "Loaded temporary account");
                Ok(Self {
                    signer,
                    key_file,
                    created: false,
                })
            }
            n => bail!(
                "expect only one or zero keystore file in {}, found {n}",
                dir.display()
            ),
        }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }
}

/// Regular files in `dir`, skipping dot-files, sorted by name.
fn list_key_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read keystore directory {}", dir.display()))?
    {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        files.push(entry.path());
    }
    files.sort();
    Ok(files)
}
