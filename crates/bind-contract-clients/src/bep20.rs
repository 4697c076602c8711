use crate::common::tx_submitter::TransactionSubmitter;
use alloy::{
    primitives::{Address, B256, U256},
    providers::Provider,
    sol,
};
use anyhow::Result;

sol! {
    #[sol(rpc)]
    #[derive(Debug)]
    contract Bep20 {
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function transfer(address recipient, uint256 amount) external returns (bool);
    }
}

use Bep20::Bep20Instance;

/// Client for a deployed BEP20 token contract
#[derive(Clone)]
pub struct Bep20Client<P: Provider + Clone> {
    contract: Bep20Instance<P>,
    submitter: TransactionSubmitter,
}

impl<P: Provider + Clone> Bep20Client<P> {
    pub fn new(provider: P, address: Address) -> Self {
        let contract = Bep20Instance::new(address, provider);
        Self {
            contract,
            submitter: TransactionSubmitter::default(),
        }
    }

    // ------------------------------------------------------------------------
    // View Functions
    // ------------------------------------------------------------------------

    pub async fn total_supply(&self) -> Result<U256> {
        Ok(self.contract.totalSupply().call().await?)
    }

    /// Token balance held by `account`
    pub async fn balance_of(&self, account: Address) -> Result<U256> {
        Ok(self.contract.balanceOf(account).call().await?)
    }

    // ------------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------------

    /// Allow `spender` to move `amount` tokens from the signer
    pub async fn approve(&self, spender: Address, amount: U256) -> Result<B256> {
        let call = self.contract.approve(spender, amount);
        self.submitter.invoke("approve", call).await
    }

    /// Move `amount` tokens from the signer to `recipient`
    pub async fn transfer(&self, recipient: Address, amount: U256) -> Result<B256> {
        let call = self.contract.transfer(recipient, amount);
        self.submitter.invoke("transfer", call).await
    }
}
