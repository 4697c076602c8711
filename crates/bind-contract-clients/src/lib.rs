use alloy::primitives::{Address, U256, address};

pub mod bep20;
pub mod bind_client;
pub mod common;
pub mod ownable;
pub mod token_manager;

// ============================================================================
// Client Type Re-exports
// ============================================================================

pub use bep20::Bep20Client;
pub use bind_client::BindClient;
pub use common::poll::{PollConfig, poll_until};
pub use ownable::OwnableClient;
pub use token_manager::TokenManagerClient;

// ============================================================================
// Chain Constants
// ============================================================================

/// TokenManager system contract, identical on mainnet and testnet
pub const TOKEN_MANAGER_ADDRESS: Address = address!("0x0000000000000000000000000000000000001008");

/// Relay fee attached to `approveBind` / `rejectBind` (0.01 BNB)
pub const BIND_RELAY_FEE: U256 = U256::from_limbs([10_000_000_000_000_000, 0, 0, 0]);

/// Gas limit for contract creation and contract calls
pub const DEFAULT_GAS_LIMIT: u64 = 4_700_000;

/// Gas limit of a plain value transfer
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;
