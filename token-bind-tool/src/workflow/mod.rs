//! The bind workflow: deploy, approve and bind, hand over, refund.
//!
//! Every operation is a strict sequence. A step only starts after the previous
//! transaction has been mined, and the first error aborts the remaining steps.
//! Nothing is rolled back: a partially applied sequence is left for the operator.

use alloy::primitives::{Address, B256, Bytes, U256};
use anyhow::{Context, Result, bail};
use bind_contract_clients::{TOKEN_MANAGER_ADDRESS, TRANSFER_GAS_LIMIT};
use chain_args::ChainContext;
use tracing::{info, warn};

use crate::config::BindConfig;

mod chain;
#[cfg(test)]
mod mock;

pub use chain::{BindChain, TxOutcome};

/// Terminal state of the approve/bind step.
///
/// `Approved -> BindSubmitted -> {Confirmed | Rejected | Failed}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// `approveBind` succeeded on-chain
    Confirmed { bind: TxOutcome },
    /// `approveBind` failed and `rejectBind` was submitted in its place
    Rejected { bind: TxOutcome, reject: TxOutcome },
    /// `approveBind` failed and nothing was sent to compensate
    Failed { bind: TxOutcome },
}

/// BNB left after reserving the gas of one plain transfer at `gas_price`.
///
/// `None` when the balance does not cover more than the reserve.
pub fn refundable_amount(balance: U256, gas_price: u128) -> Option<U256> {
    let reserve = U256::from(gas_price) * U256::from(TRANSFER_GAS_LIMIT);
    balance.checked_sub(reserve).filter(|amount| !amount.is_zero())
}

/// Runs bind operations for one signer against one network.
pub struct Workflow<'a, C: BindChain> {
    chain: &'a C,
    ctx: &'a ChainContext,
}

impl<'a, C: BindChain> Workflow<'a, C> {
    pub fn new(chain: &'a C, ctx: &'a ChainContext) -> Self {
        Self { chain, ctx }
    }

    /// Deploy the BEP20 contract and return its address.
    pub async fn deploy_contract(&self, bytecode: &Bytes) -> Result<Address> {
        info!(deployer = %self.chain.signer_address(), "Deploy BEP20 contract");
        let tx_hash = self.chain.deploy(bytecode.clone()).await?;
        self.report_tx("Deploy BEP20 contract", tx_hash);

        let outcome = self.confirm("Deploy BEP20 contract", tx_hash).await?;
        let contract = outcome
            .contract_address
            .context("Deployment receipt carries no contract address")?;
        info!(
            contract = %contract,
            explorer = %self.ctx.address_url(contract),
            "The deployed BEP20 contract address is {contract}"
        );
        Ok(contract)
    }

    /// Approve the whole supply to the TokenManager, approve the bind and, once
    /// the bind is confirmed, hand contract ownership to the ledger account.
    /// A failed bind is rejected instead and ownership stays put.
    pub async fn approve_bind_and_transfer_ownership(
        &self,
        config: &BindConfig,
        token: Address,
    ) -> Result<BindOutcome> {
        let total_supply = self.chain.total_supply(token).await?;
        info!(total_supply = %total_supply, symbol = %config.symbol, "Total supply");

        self.approve_token_manager(token, total_supply, &config.symbol)
            .await?;
        let bind = self.approve_bind(token, &config.bep2_symbol).await?;

        if !bind.success {
            warn!(tx_hash = ?bind.tx_hash, "Approve bind failed, rejecting bind");
            let tx_hash = self.chain.reject_bind(token, &config.bep2_symbol).await?;
            self.report_tx("RejectBind", tx_hash);
            let reject = self.chain.wait_for_outcome(tx_hash).await?;
            info!(
                tx_hash = ?reject.tx_hash,
                success = reject.success,
                "Reject bind tx receipt status {}",
                u8::from(reject.success)
            );
            return Ok(BindOutcome::Rejected { bind, reject });
        }

        self.transfer_ownership(token, config.ledger_account).await?;
        Ok(BindOutcome::Confirmed { bind })
    }

    /// Approve and bind signed by a Ledger account, for a caller-chosen amount.
    /// There is no reject path: a failed bind is reported as such.
    pub async fn approve_bind_from_ledger(
        &self,
        bep2_symbol: &str,
        token: Address,
        amount: U256,
    ) -> Result<BindOutcome> {
        self.approve_token_manager(token, amount, bep2_symbol)
            .await?;
        let bind = self.approve_bind(token, bep2_symbol).await?;
        if bind.success {
            Ok(BindOutcome::Confirmed { bind })
        } else {
            Ok(BindOutcome::Failed { bind })
        }
    }

    /// Move the signer's whole token balance, then contract ownership, to `owner`.
    pub async fn transfer_token_and_ownership(&self, token: Address, owner: Address) -> Result<()> {
        let balance = self
            .chain
            .token_balance(token, self.chain.signer_address())
            .await?;
        info!(amount = %balance, recipient = %owner, "Transfer token");
        let tx_hash = self.chain.transfer(token, owner, balance).await?;
        self.report_tx("Transfer token", tx_hash);
        self.confirm("Transfer token", tx_hash).await?;

        self.transfer_ownership(token, owner).await
    }

    /// Send everything but the transfer's own gas back to `refund_to`.
    pub async fn refund_rest_bnb(&self, refund_to: Address) -> Result<TxOutcome> {
        let balance = self.chain.balance().await?;
        let gas_price = self.chain.gas_price().await?;
        let Some(amount) = refundable_amount(balance, gas_price) else {
            bail!(
                "Balance {balance} wei of {} does not cover the refund gas cost at {gas_price} wei/gas",
                self.chain.signer_address()
            );
        };

        info!(amount = %amount, gas_price, recipient = %refund_to, "Refund rest BNB");
        let tx_hash = self.chain.send_value(refund_to, amount, gas_price).await?;
        self.report_tx("Refund", tx_hash);
        self.confirm("Refund", tx_hash).await
    }

    /// Deploy, hand supply and ownership to the configured ledger account,
    /// then refund the leftover BNB to it.
    pub async fn deploy_transfer_refund(&self, config: &BindConfig) -> Result<Address> {
        let contract = self.deploy_contract(&config.contract_data).await?;
        self.transfer_token_and_ownership(contract, config.ledger_account)
            .await?;
        self.refund_rest_bnb(config.ledger_account).await?;
        Ok(contract)
    }

    async fn approve_token_manager(&self, token: Address, amount: U256, symbol: &str) -> Result<()> {
        info!(
            amount = %amount,
            symbol = %symbol,
            owner = %self.chain.signer_address(),
            spender = %TOKEN_MANAGER_ADDRESS,
            "Approve token to TokenManager"
        );
        let tx_hash = self.chain.approve_token_manager(token, amount).await?;
        self.report_tx("Approve token to TokenManager", tx_hash);
        self.confirm("Approve token to TokenManager", tx_hash).await?;
        Ok(())
    }

    async fn approve_bind(&self, token: Address, bep2_symbol: &str) -> Result<TxOutcome> {
        info!(token = %token, bep2_symbol = %bep2_symbol, "Approve bind");
        let tx_hash = self.chain.approve_bind(token, bep2_symbol).await?;
        self.report_tx("ApproveBind", tx_hash);
        let outcome = self.chain.wait_for_outcome(tx_hash).await?;
        info!(
            tx_hash = ?outcome.tx_hash,
            success = outcome.success,
            "Approve bind tx receipt status {}",
            u8::from(outcome.success)
        );
        Ok(outcome)
    }

    async fn transfer_ownership(&self, contract: Address, new_owner: Address) -> Result<()> {
        info!(contract = %contract, new_owner = %new_owner, "Transfer ownership");
        let tx_hash = self.chain.transfer_ownership(contract, new_owner).await?;
        self.report_tx("Transfer ownership", tx_hash);
        self.confirm("Transfer ownership", tx_hash).await?;

        let owner = self.chain.owner(contract).await?;
        if owner != new_owner {
            bail!("Ownership of {contract} not handed over: owner is {owner}, expected {new_owner}");
        }
        info!(contract = %contract, owner = %owner, "Ownership transferred");
        Ok(())
    }

    /// Wait for the transaction and fail the step if it reverted.
    async fn confirm(&self, step: &str, tx_hash: B256) -> Result<TxOutcome> {
        let outcome = self.chain.wait_for_outcome(tx_hash).await?;
        if !outcome.success {
            bail!("{step} reverted on-chain. Tx hash: {tx_hash:?}");
        }
        Ok(outcome)
    }

    fn report_tx(&self, label: &str, tx_hash: B256) {
        info!(
            tx_hash = ?tx_hash,
            explorer = %self.ctx.tx_url(tx_hash),
            "{label} txHash"
        );
    }
}
