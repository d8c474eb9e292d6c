use std::collections::BTreeMap;

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Coin;

#[cw_serde]
pub struct InstantiateMsg {
    pub authority: String,
    /// Bech32 prefix used when encoding derived forwarding addresses
    pub address_prefix: String,
    pub allowed_denoms: Vec<String>,
    /// Relative timeout of automatic forwards. Defaults to 10 minutes.
    pub transfer_timeout_seconds: Option<u64>,
}

#[cw_serde]
pub struct MemoEntry {
    pub denom: String,
    pub memo: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Registers the forwarding account derived from (channel, recipient, fallback).
    /// Anyone can register an account; the response data carries its address.
    RegisterAccount {
        channel: String,
        recipient: String,
        fallback: Option<String>,
        memos: Vec<MemoEntry>,
    },

    /// Sweeps a forwarding account manually. With `fallback` set and a fallback
    /// configured, the balance is sent to the fallback immediately; otherwise the
    /// account is queued for the end-of-block forward.
    ClearAccount { address: String, fallback: bool },

    /// Sets the memo of a forwarding account for a denom. An empty memo deletes it.
    SetMemo {
        address: String,
        denom: String,
        memo: String,
    },

    /// Replaces the allowed denoms. Authority only.
    SetAllowedDenoms { denoms: Vec<String> },
}

/// Messages that only the host chain can deliver.
#[cw_serde]
pub enum SudoMsg {
    /// Start of a processing cycle
    BeginBlock {},

    /// End of a processing cycle; executes pending forwards
    EndBlock {},

    /// Invoked by the bank module for every balance transfer
    BlockBeforeSend { from: String, to: String, amount: Coin },

    /// Invoked by the transfer middleware for every incoming ICS-20 packet,
    /// before the funds are credited to the receiver.
    RecvTransferPacket { receiver: String, memo: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(DenomsResponse)]
    Denoms {},

    #[returns(AddressResponse)]
    Address {
        channel: String,
        recipient: String,
        fallback: Option<String>,
    },

    #[returns(StatsResponse)]
    Stats {},

    #[returns(StatsByChannelResponse)]
    StatsByChannel { channel: String },

    #[returns(MemoResponse)]
    Memo { address: String, denom: String },

    #[returns(MemosResponse)]
    Memos { address: String },
}

#[cw_serde]
pub struct RegisterAccountResponse {
    pub address: String,
}

#[cw_serde]
pub struct ConfigResponse {
    pub authority: String,
    pub address_prefix: String,
    pub transfer_timeout_seconds: u64,
}

#[cw_serde]
pub struct DenomsResponse {
    pub allowed_denoms: Vec<String>,
}

#[cw_serde]
pub struct AddressResponse {
    pub address: String,
    /// Whether a forwarding account is registered at the address
    pub exists: bool,
}

#[cw_serde]
pub struct StatsByChannelResponse {
    pub num_of_accounts: u64,
    pub num_of_forwards: u64,
    pub total_forwarded: Vec<Coin>,
}

#[cw_serde]
pub struct StatsResponse {
    pub stats: BTreeMap<String, StatsByChannelResponse>,
}

#[cw_serde]
pub struct MemoResponse {
    pub memo: String,
}

#[cw_serde]
pub struct MemosResponse {
    pub memos: Vec<MemoEntry>,
}

/// Snapshot of the per-channel counters, used for genesis import and export.
#[cw_serde]
#[derive(Default)]
pub struct GenesisState {
    pub num_of_accounts: BTreeMap<String, u64>,
    pub num_of_forwards: BTreeMap<String, u64>,
    pub total_forwarded: BTreeMap<String, Vec<Coin>>,
}
