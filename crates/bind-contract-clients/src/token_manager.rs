use crate::{BIND_RELAY_FEE, TOKEN_MANAGER_ADDRESS, common::tx_submitter::TransactionSubmitter};
use alloy::{
    contract::SolCallBuilder,
    primitives::{Address, B256},
    providers::Provider,
    sol,
};
use anyhow::Result;

sol! {
    #[sol(rpc)]
    #[derive(Debug)]
    contract TokenManager {
        function approveBind(address contractAddr, string memory bep2Symbol) external payable returns (bool);
        function rejectBind(address contractAddr, string memory bep2Symbol) external payable returns (bool);
    }
}

use TokenManager::TokenManagerInstance;

/// Client for the TokenManager system contract that settles BEP2/BEP20 binds.
///
/// Bind calls are sent without pre-simulation: a failed `approveBind` has to
/// reach the chain so the caller can observe the receipt and reject the bind.
#[derive(Clone)]
pub struct TokenManagerClient<P: Provider + Clone> {
    contract: TokenManagerInstance<P>,
    submitter: TransactionSubmitter,
}

impl<P: Provider + Clone> TokenManagerClient<P> {
    pub fn new(provider: P) -> Self {
        let contract = TokenManagerInstance::new(TOKEN_MANAGER_ADDRESS, provider);
        Self {
            contract,
            submitter: TransactionSubmitter::default(),
        }
    }

    /// Approve the pending bind of `bep2_symbol` to the token at `contract_addr`
    pub async fn approve_bind(&self, contract_addr: Address, bep2_symbol: &str) -> Result<B256> {
        let call = self.approve_bind_call(contract_addr, bep2_symbol);
        self.submitter.send("approveBind", call).await
    }

    /// Reject the pending bind of `bep2_symbol` to the token at `contract_addr`
    pub async fn reject_bind(&self, contract_addr: Address, bep2_symbol: &str) -> Result<B256> {
        let call = self.reject_bind_call(contract_addr, bep2_symbol);
        self.submitter.send("rejectBind", call).await
    }

    fn approve_bind_call(
        &self,
        contract_addr: Address,
        bep2_symbol: &str,
    ) -> SolCallBuilder<&P, TokenManager::approveBindCall> {
        self.contract
            .approveBind(contract_addr, bep2_symbol.to_string())
            .value(BIND_RELAY_FEE)
    }

    fn reject_bind_call(
        &self,
        contract_addr: Address,
        bep2_symbol: &str,
    ) -> SolCallBuilder<&P, TokenManager::rejectBindCall> {
        self.contract
            .rejectBind(contract_addr, bep2_symbol.to_string())
            .value(BIND_RELAY_FEE)
    }
}
