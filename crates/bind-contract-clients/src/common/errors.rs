use alloy::sol_types::{Revert, SolError};

/// Render a contract call error, preferring the Solidity `Error(string)` reason
/// when the node returned revert data.
pub(crate) fn decode_error(error: &alloy::contract::Error) -> String {
    match error.as_revert_data() {
        Some(data) => decode_revert_data(&data),
        None => error.to_string(),
    }
}

pub(crate) fn decode_revert_data(data: &[u8]) -> String {
    if data.is_empty() {
        return "execution reverted without data".to_string();
    }
    match Revert::abi_decode(data) {
        Ok(revert) => revert.reason,
        Err(_) => format!("execution reverted with data 0x{}", alloy::hex::encode(data)),
    }
}
