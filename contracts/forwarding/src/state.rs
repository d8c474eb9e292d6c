use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

use crate::account::ForwardingAccount;

#[cw_serde]
pub struct Config {
    /// The only address allowed to change the allowed denoms. It may also edit
    /// the memos of any forwarding account.
    pub authority: Addr,
    /// Bech32 prefix of derived forwarding addresses
    pub address_prefix: String,
    /// Relative timeout applied to every automatic forward
    pub transfer_timeout_seconds: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Denoms that are considered when checking and forwarding balances, in the
/// order they are processed by the sweep.
pub const ALLOWED_DENOMS: Item<Vec<String>> = Item::new("allowed_denoms");

// NUM_OF_ACCOUNTS: key(channel_id) -> number of registered forwarding accounts
pub const NUM_OF_ACCOUNTS: Map<&str, u64> = Map::new("num_of_accounts");

// NUM_OF_FORWARDS: key(channel_id) -> number of accepted automatic forwards
pub const NUM_OF_FORWARDS: Map<&str, u64> = Map::new("num_of_forwards");

// TOTAL_FORWARDED: key(channel_id, denom) -> total amount forwarded
pub const TOTAL_FORWARDED: Map<(&str, &str), Uint128> = Map::new("total_forwarded");

// MEMOS: key(account_address, denom) -> memo
pub const MEMOS: Map<(&Addr, &str), String> = Map::new("memos");

// PENDING_FORWARDS: key(account_address) -> account snapshot
// Lives in the transient store only.
pub const PENDING_FORWARDS: Map<&Addr, ForwardingAccount> = Map::new("pending_forwards");
