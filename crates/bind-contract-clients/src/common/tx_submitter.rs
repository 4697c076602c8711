use super::errors::decode_error;
use crate::DEFAULT_GAS_LIMIT;
use alloy::{contract::CallBuilder, primitives::B256, providers::Provider};
use anyhow::{Result, anyhow};
use tracing::info;

/// Signs and broadcasts contract calls without waiting for them to be mined.
///
/// Calls go out with a fixed gas limit so a transaction that is going to revert
/// still lands on-chain and produces a receipt the caller can inspect.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TransactionSubmitter {
    gas_limit: u64,
}

impl Default for TransactionSubmitter {
    fn default() -> Self {
        Self {
            gas_limit: DEFAULT_GAS_LIMIT,
        }
    }
}

impl TransactionSubmitter {
    /// Pre-simulate the call, then send it. A simulated revert aborts before
    /// anything is broadcast.
    pub(crate) async fn invoke<P, D>(&self, method: &str, call: CallBuilder<P, D>) -> Result<B256>
    where
        P: Provider + Clone,
        D: alloy::contract::CallDecoder + Clone,
    {
        if let Err(e) = call.call().await {
            let e = decode_error(&e);
            return Err(anyhow!("{method} reverted: {e}"));
        }
        self.send(method, call).await
    }

    /// Send the call as-is. Used where an on-chain failure is an expected
    /// outcome that the caller reacts to.
    pub(crate) async fn send<P, D>(&self, method: &str, call: CallBuilder<P, D>) -> Result<B256>
    where
        P: Provider + Clone,
        D: alloy::contract::CallDecoder + Clone,
    {
        let call = self.with_gas_limit(call);
        let pending = call.send().await.map_err(|e| {
            let e = decode_error(&e);
            anyhow!("{method} failed to send: {e}")
        })?;

        let tx_hash = *pending.tx_hash();
        info!(method = %method, tx_hash = ?tx_hash, "Transaction submitted");
        Ok(tx_hash)
    }

    fn with_gas_limit<P, D>(&self, call: CallBuilder<P, D>) -> CallBuilder<P, D>
    where
        P: Provider + Clone,
        D: alloy::contract::CallDecoder + Clone,
    {
        call.gas(self.gas_limit)
    }
}
