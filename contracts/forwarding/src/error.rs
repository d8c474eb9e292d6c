use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    OverflowError(#[from] OverflowError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Invalid channel {channel_id}: {reason}")]
    InvalidChannel { channel_id: String, reason: String },

    #[error("Recipient address must not exceed {max_length} bytes")]
    RecipientTooLong { max_length: usize },

    #[error("Invalid fallback address: {fallback}")]
    InvalidFallback { fallback: String },

    #[error("Invalid address prefix: {prefix}")]
    InvalidAddressPrefix { prefix: String },

    #[error("Attempting to register an existing user account with address: {address}")]
    AccountAlreadyActive { address: String },

    #[error("Account {address} cannot become a forwarding account: {reason}")]
    AccountTypeConflict { address: String, reason: String },

    #[error("Account does not exist: {address}")]
    AccountNotFound { address: String },

    #[error("Account is not a forwarding account: {address}")]
    NotForwardingAccount { address: String },

    #[error("Account does not require clearing: {address}")]
    NothingToClear { address: String },

    #[error("Failed to clear balance to fallback account: {reason}")]
    TransferFailed { reason: String },

    #[error("Invalid allowed denoms: {reason}")]
    InvalidDenoms { reason: String },

    #[error("Invalid denom: {denom}")]
    InvalidDenom { denom: String },

    #[error("Memo exceeds maximum length of {max_length} characters")]
    MemoTooLong { max_length: usize },

    #[error("Memo for denom {denom} cannot be empty")]
    EmptyMemo { denom: String },

    #[error("Duplicate memo denom: {denom}")]
    DuplicateDenom { denom: String },

    #[error("Cannot register more than {max_entries} memos")]
    TooManyMemos { max_entries: usize },

    #[error("Packet receiver {receiver} does not match derived forwarding address {expected}")]
    ReceiverMismatch { receiver: String, expected: String },
}

pub fn new_generic_error(msg: impl Into<String>) -> ContractError {
    ContractError::Std(StdError::generic_err(msg))
}
