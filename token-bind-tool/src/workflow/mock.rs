use super::chain::{BindChain, TxOutcome};
use alloy::primitives::{Address, B256, Bytes, U256, address};
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Chain call as seen by [`MockChain`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Deploy,
    TotalSupply,
    BalanceOf(Address),
    Approve(U256),
    Transfer {
        recipient: Address,
        amount: U256,
    },
    TransferOwnership(Address),
    ApproveBind(String),
    RejectBind(String),
    SendValue {
        to: Address,
        amount: U256,
        gas_price: u128,
    },
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    tokens: Vec<Address>,
    mined: HashMap<B256, TxOutcome>,
    owner: Option<Address>,
}

/// In-memory chain that records calls and mines every transaction at once.
pub struct MockChain {
    reverting: Vec<Call>,
    failing_to_send: Vec<Call>,
    ignore_ownership_transfer: bool,
    token_balance: U256,
    balance: U256,
    gas_price: u128,
    state: Mutex<State>,
}

impl MockChain {
    pub const SIGNER: Address = address!("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
    pub const DEPLOYED: Address = address!("0x5fbdb2315678afecb367f032d93f642f64180aa3");
    pub const TOTAL_SUPPLY: U256 = U256::from_limbs([1_000_000, 0, 0, 0]);

    pub fn new() -> Self {
        Self {
            reverting: Vec::new(),
            failing_to_send: Vec::new(),
            ignore_ownership_transfer: false,
            token_balance: Self::TOTAL_SUPPLY,
            balance: U256::ZERO,
            gas_price: 1,
            state: Mutex::new(State::default()),
        }
    }

    /// Mine `call` with a failed status
    pub fn reverting(mut self, call: Call) -> Self {
        self.reverting.push(call);
        self
    }

    /// Reject `call` before it reaches the chain
    pub fn failing_to_send(mut self, call: Call) -> Self {
        self.failing_to_send.push(call);
        self
    }

    /// Mine ownership transfers successfully without changing the owner
    pub fn ignoring_ownership_transfer(mut self) -> Self {
        self.ignore_ownership_transfer = true;
        self
    }

    /// Token balance held by the signer
    pub fn with_token_balance(mut self, amount: U256) -> Self {
        self.token_balance = amount;
        self
    }

    pub fn with_balance(mut self, balance: U256) -> Self {
        self.balance = balance;
        self
    }

    pub fn with_gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = gas_price;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Token or contract addresses passed to token calls, in order
    pub fn token_calls(&self) -> Vec<Address> {
        self.state.lock().unwrap().tokens.clone()
    }

    fn record_token(&self, token: Address) {
        self.state.lock().unwrap().tokens.push(token);
    }

    fn submit(&self, call: Call) -> Result<B256> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.clone());
        if self.failing_to_send.contains(&call) {
            bail!("{call:?} failed to send: connection refused");
        }

        let tx_hash = B256::with_last_byte(state.calls.len() as u8);
        let success = !self.reverting.contains(&call);
        if let Call::TransferOwnership(new_owner) = call
            && success
            && !self.ignore_ownership_transfer
        {
            state.owner = Some(new_owner);
        }
        let outcome = TxOutcome {
            tx_hash,
            success,
            contract_address: (call == Call::Deploy).then_some(Self::DEPLOYED),
        };
        state.mined.insert(tx_hash, outcome);
        Ok(tx_hash)
    }
}

#[async_trait]
impl BindChain for MockChain {
    fn signer_address(&self) -> Address {
        Self::SIGNER
    }

    async fn deploy(&self, _bytecode: Bytes) -> Result<B256> {
        self.submit(Call::Deploy)
    }

    async fn total_supply(&self, token: Address) -> Result<U256> {
        self.record_token(token);
        self.state.lock().unwrap().calls.push(Call::TotalSupply);
        Ok(Self::TOTAL_SUPPLY)
    }

    async fn token_balance(&self, token: Address, account: Address) -> Result<U256> {
        self.record_token(token);
        self.state.lock().unwrap().calls.push(Call::BalanceOf(account));
        Ok(self.token_balance)
    }

    async fn owner(&self, _contract: Address) -> Result<Address> {
        Ok(self.state.lock().unwrap().owner.unwrap_or(Self::SIGNER))
    }

    async fn approve_token_manager(&self, _token: Address, amount: U256) -> Result<B256> {
        self.submit(Call::Approve(amount))
    }

    async fn transfer(&self, token: Address, recipient: Address, amount: U256) -> Result<B256> {
        self.record_token(token);
        self.submit(Call::Transfer { recipient, amount })
    }

    async fn transfer_ownership(&self, contract: Address, new_owner: Address) -> Result<B256> {
        self.record_token(contract);
        self.submit(Call::TransferOwnership(new_owner))
    }

    async fn approve_bind(&self, _token: Address, bep2_symbol: &str) -> Result<B256> {
        self.submit(Call::ApproveBind(bep2_symbol.to_string()))
    }

    async fn reject_bind(&self, _token: Address, bep2_symbol: &str) -> Result<B256> {
        self.submit(Call::RejectBind(bep2_symbol.to_string()))
    }

    async fn balance(&self) -> Result<U256> {
        Ok(self.balance)
    }

    async fn gas_price(&self) -> Result<u128> {
        Ok(self.gas_price)
    }

    async fn send_value(&self, to: Address, amount: U256, gas_price: u128) -> Result<B256> {
        self.submit(Call::SendValue {
            to,
            amount,
            gas_price,
        })
    }

    async fn wait_for_outcome(&self, tx_hash: B256) -> Result<TxOutcome> {
        self.state
            .lock()
            .unwrap()
            .mined
            .get(&tx_hash)
            .copied()
            .ok_or_else(|| anyhow!("unknown transaction {tx_hash:?}"))
    }
}
