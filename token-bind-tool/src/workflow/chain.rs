use alloy::{
    primitives::{Address, B256, Bytes, U256},
    rpc::types::TransactionReceipt,
};
use anyhow::Result;
use async_trait::async_trait;
use bind_contract_clients::{BindClient, TOKEN_MANAGER_ADDRESS};

/// What the workflow needs to know about a mined transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOutcome {
    pub tx_hash: B256,
    pub success: bool,
    /// Set for contract creation transactions
    pub contract_address: Option<Address>,
}

impl From<&TransactionReceipt> for TxOutcome {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            tx_hash: receipt.transaction_hash,
            success: receipt.status(),
            contract_address: receipt.contract_address,
        }
    }
}

/// Chain calls the bind workflow is made of.
///
/// Transactions are submitted and their hash returned immediately; the
/// workflow decides when to wait for the outcome.
#[async_trait]
pub trait BindChain: Send + Sync {
    /// Account signing every transaction
    fn signer_address(&self) -> Address;

    async fn deploy(&self, bytecode: Bytes) -> Result<B256>;

    async fn total_supply(&self, token: Address) -> Result<U256>;

    /// Token balance held by `account`
    async fn token_balance(&self, token: Address, account: Address) -> Result<U256>;

    /// Current owner of an Ownable contract
    async fn owner(&self, contract: Address) -> Result<Address>;

    /// Approve the TokenManager to spend `amount` of `token`
    async fn approve_token_manager(&self, token: Address, amount: U256) -> Result<B256>;

    async fn transfer(&self, token: Address, recipient: Address, amount: U256) -> Result<B256>;

    async fn transfer_ownership(&self, contract: Address, new_owner: Address) -> Result<B256>;

    async fn approve_bind(&self, token: Address, bep2_symbol: &str) -> Result<B256>;

    async fn reject_bind(&self, token: Address, bep2_symbol: &str) -> Result<B256>;

    /// Native balance of the signer
    async fn balance(&self) -> Result<U256>;

    async fn gas_price(&self) -> Result<u128>;

    /// Plain BNB transfer with an explicit gas price
    async fn send_value(&self, to: Address, amount: U256, gas_price: u128) -> Result<B256>;

    /// Block until the transaction is mined
    async fn wait_for_outcome(&self, tx_hash: B256) -> Result<TxOutcome>;
}

#[async_trait]
impl BindChain for BindClient {
    fn signer_address(&self) -> Address {
        BindClient::signer_address(self)
    }

    async fn deploy(&self, bytecode: Bytes) -> Result<B256> {
        BindClient::deploy(self, bytecode).await
    }

    async fn total_supply(&self, token: Address) -> Result<U256> {
        self.bep20(token).total_supply().await
    }

    async fn token_balance(&self, token: Address, account: Address) -> Result<U256> {
        self.bep20(token).balance_of(account).await
    }

    async fn owner(&self, contract: Address) -> Result<Address> {
        self.ownable(contract).owner().await
    }

    async fn approve_token_manager(&self, token: Address, amount: U256) -> Result<B256> {
        self.bep20(token).approve(TOKEN_MANAGER_ADDRESS, amount).await
    }

    async fn transfer(&self, token: Address, recipient: Address, amount: U256) -> Result<B256> {
        self.bep20(token).transfer(recipient, amount).await
    }

    async fn transfer_ownership(&self, contract: Address, new_owner: Address) -> Result<B256> {
        self.ownable(contract).transfer_ownership(new_owner).await
    }

    async fn approve_bind(&self, token: Address, bep2_symbol: &str) -> Result<B256> {
        self.token_manager.approve_bind(token, bep2_symbol).await
    }

    async fn reject_bind(&self, token: Address, bep2_symbol: &str) -> Result<B256> {
        self.token_manager.reject_bind(token, bep2_symbol).await
    }

    async fn balance(&self) -> Result<U256> {
        self.get_balance().await
    }

    async fn gas_price(&self) -> Result<u128> {
        self.get_gas_price().await
    }

    async fn send_value(&self, to: Address, amount: U256, gas_price: u128) -> Result<B256> {
        BindClient::send_value(self, to, amount, gas_price).await
    }

    async fn wait_for_outcome(&self, tx_hash: B256) -> Result<TxOutcome> {
        let receipt = self.wait_for_receipt(tx_hash).await?;
        Ok(TxOutcome::from(&receipt))
    }
}
