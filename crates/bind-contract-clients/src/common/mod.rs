pub(crate) mod errors;
pub mod poll;
pub(crate) mod tx_submitter;
