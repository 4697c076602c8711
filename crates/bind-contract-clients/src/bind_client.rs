use crate::{
    Bep20Client, DEFAULT_GAS_LIMIT, OwnableClient, PollConfig, TRANSFER_GAS_LIMIT,
    TokenManagerClient, poll_until,
};
use alloy::{
    network::{Ethereum, EthereumWallet, NetworkWallet, TransactionBuilder},
    primitives::{Address, B256, Bytes, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::{TransactionReceipt, TransactionRequest},
    transports::http::reqwest::Url,
};
use anyhow::Context;
use tracing::info;

/// High-level wrapper bundling the bind contract clients with a shared Alloy provider.
///
/// The wallet decides who signs: a keystore-backed local signer or a Ledger device.
#[derive(Clone)]
pub struct BindClient {
    provider: DynProvider,
    wallet: EthereumWallet,
    polling: PollConfig,
    pub token_manager: TokenManagerClient<DynProvider>,
}

impl BindClient {
    pub fn new(rpc_url: &str, wallet: EthereumWallet, polling: PollConfig) -> anyhow::Result<Self> {
        let url: Url = rpc_url
            .parse()
            .with_context(|| format!("Invalid RPC URL {rpc_url}"))?;

        // Build a provider that can sign transactions, then erase the concrete type
        let provider: DynProvider = ProviderBuilder::new()
            .wallet(wallet.clone())
            .connect_http(url)
            .erased();

        let token_manager = TokenManagerClient::new(provider.clone());

        Ok(Self {
            provider,
            wallet,
            polling,
            token_manager,
        })
    }

    /// Get the signer address
    pub fn signer_address(&self) -> Address {
        <EthereumWallet as NetworkWallet<Ethereum>>::default_signer_address(&self.wallet)
    }

    pub fn bep20(&self, address: Address) -> Bep20Client<DynProvider> {
        Bep20Client::new(self.provider.clone(), address)
    }

    pub fn ownable(&self, address: Address) -> OwnableClient<DynProvider> {
        OwnableClient::new(self.provider.clone(), address)
    }

    /// Chain id reported by the RPC endpoint
    pub async fn chain_id(&self) -> anyhow::Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    /// Get the balance of the wallet
    pub async fn get_balance(&self) -> anyhow::Result<U256> {
        let address = self.signer_address();
        Ok(self.provider.get_balance(address).await?)
    }

    pub async fn get_gas_price(&self) -> anyhow::Result<u128> {
        Ok(self.provider.get_gas_price().await?)
    }

    /// Submit a contract creation transaction carrying `bytecode`
    pub async fn deploy(&self, bytecode: Bytes) -> anyhow::Result<B256> {
        let tx = deploy_request(bytecode);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .context("Contract deployment failed to send")?;

        let tx_hash = *pending.tx_hash();
        info!(method = "deploy", tx_hash = ?tx_hash, "Transaction submitted");
        Ok(tx_hash)
    }

    /// Send BNB to an address as a legacy transfer priced at `gas_price`
    pub async fn send_value(
        &self,
        to: Address,
        amount: U256,
        gas_price: u128,
    ) -> anyhow::Result<B256> {
        let tx = value_transfer_request(to, amount, gas_price);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .context("Value transfer failed to send")?;

        let tx_hash = *pending.tx_hash();
        info!(method = "transfer_value", tx_hash = ?tx_hash, "Transaction submitted");
        Ok(tx_hash)
    }

    /// Poll until the transaction is mined and return its receipt
    pub async fn wait_for_receipt(&self, tx_hash: B256) -> anyhow::Result<TransactionReceipt> {
        let operation = format!("receipt of {tx_hash}");
        poll_until(&self.polling, &operation, || {
            let provider = self.provider.clone();
            async move { Ok(provider.get_transaction_receipt(tx_hash).await?) }
        })
        .await
    }
}

fn deploy_request(bytecode: Bytes) -> TransactionRequest {
    TransactionRequest::default()
        .with_deploy_code(bytecode)
        .with_gas_limit(DEFAULT_GAS_LIMIT)
}

/// Legacy transfer: fixed gas limit and an explicit gas price, so the fee is known up front
fn value_transfer_request(to: Address, amount: U256, gas_price: u128) -> TransactionRequest {
    TransactionRequest::default()
        .with_to(to)
        .with_value(amount)
        .with_gas_limit(TRANSFER_GAS_LIMIT)
        .with_gas_price(gas_price)
}
