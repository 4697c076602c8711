use crate::common::tx_submitter::TransactionSubmitter;
use alloy::{
    primitives::{Address, B256},
    providers::Provider,
    sol,
};
use anyhow::Result;

sol! {
    #[sol(rpc)]
    #[derive(Debug)]
    contract Ownable {
        function owner() external view returns (address);
        function transferOwnership(address newOwner) external;
    }
}

use Ownable::OwnableInstance;

/// Client for the ownership surface of a deployed contract
#[derive(Clone)]
pub struct OwnableClient<P: Provider + Clone> {
    contract: OwnableInstance<P>,
    submitter: TransactionSubmitter,
}

impl<P: Provider + Clone> OwnableClient<P> {
    pub fn new(provider: P, address: Address) -> Self {
        let contract = OwnableInstance::new(address, provider);
        Self {
            contract,
            submitter: TransactionSubmitter::default(),
        }
    }

    /// Current owner of the contract
    pub async fn owner(&self) -> Result<Address> {
        Ok(self.contract.owner().call().await?)
    }

    /// Hand the contract over to `new_owner`
    pub async fn transfer_ownership(&self, new_owner: Address) -> Result<B256> {
        let call = self.contract.transferOwnership(new_owner);
        self.submitter.invoke("transferOwnership", call).await
    }
}
