use std::collections::BTreeMap;

use cosmwasm_std::{Coin, Order, StdError, StdResult, Storage};

use crate::account::{Account, ForwardingRoute};
use crate::address::derive_address;
use crate::keepers::ForwardingDeps;
use crate::memo::{get_memo, list_memos};
use crate::msg::{
    AddressResponse, ConfigResponse, DenomsResponse, MemoResponse, MemosResponse,
    StatsByChannelResponse, StatsResponse,
};
use crate::state::{ALLOWED_DENOMS, CONFIG, NUM_OF_ACCOUNTS, NUM_OF_FORWARDS, TOTAL_FORWARDED};

pub fn query_config(deps: ForwardingDeps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;

    Ok(ConfigResponse {
        authority: config.authority.to_string(),
        address_prefix: config.address_prefix,
        transfer_timeout_seconds: config.transfer_timeout_seconds,
    })
}

pub fn query_denoms(deps: ForwardingDeps) -> StdResult<DenomsResponse> {
    Ok(DenomsResponse {
        allowed_denoms: ALLOWED_DENOMS.may_load(deps.storage)?.unwrap_or_default(),
    })
}

/// Derives the forwarding address of a route and reports whether a forwarding
/// account is registered there. The channel isn't required to exist.
pub fn query_address(
    deps: ForwardingDeps,
    channel: String,
    recipient: String,
    fallback: Option<String>,
) -> StdResult<AddressResponse> {
    let fallback = match fallback {
        Some(fallback) if !fallback.is_empty() => Some(deps.api.addr_validate(&fallback)?),
        _ => None,
    };

    let config = CONFIG.load(deps.storage)?;
    let address = derive_address(
        &config.address_prefix,
        &ForwardingRoute::new(channel, recipient, fallback),
    )
    .map_err(|err| StdError::generic_err(err.to_string()))?;

    let exists = matches!(
        deps.ledger.get_account(&address),
        Some(Account::Forwarding(_))
    );

    Ok(AddressResponse {
        address: address.to_string(),
        exists,
    })
}

pub fn query_stats(deps: ForwardingDeps) -> StdResult<StatsResponse> {
    let mut stats: BTreeMap<String, StatsByChannelResponse> = BTreeMap::new();

    for item in NUM_OF_ACCOUNTS.range(deps.storage, None, None, Order::Ascending) {
        let (channel, count) = item?;
        stats.entry(channel).or_insert_with(empty_stats).num_of_accounts = count;
    }

    for item in NUM_OF_FORWARDS.range(deps.storage, None, None, Order::Ascending) {
        let (channel, count) = item?;
        stats.entry(channel).or_insert_with(empty_stats).num_of_forwards = count;
    }

    for item in TOTAL_FORWARDED.range(deps.storage, None, None, Order::Ascending) {
        let ((channel, denom), amount) = item?;
        stats
            .entry(channel)
            .or_insert_with(empty_stats)
            .total_forwarded
            .push(Coin { denom, amount });
    }

    Ok(StatsResponse { stats })
}

pub fn query_stats_by_channel(
    deps: ForwardingDeps,
    channel: String,
) -> StdResult<StatsByChannelResponse> {
    Ok(StatsByChannelResponse {
        num_of_accounts: NUM_OF_ACCOUNTS
            .may_load(deps.storage, &channel)?
            .unwrap_or_default(),
        num_of_forwards: NUM_OF_FORWARDS
            .may_load(deps.storage, &channel)?
            .unwrap_or_default(),
        total_forwarded: total_forwarded(deps.storage, &channel)?,
    })
}

pub fn query_memo(
    deps: ForwardingDeps,
    address: String,
    denom: String,
) -> StdResult<MemoResponse> {
    let address = deps.api.addr_validate(&address)?;

    Ok(MemoResponse {
        memo: get_memo(deps.storage, &address, &denom)?,
    })
}

pub fn query_memos(deps: ForwardingDeps, address: String) -> StdResult<MemosResponse> {
    let address = deps.api.addr_validate(&address)?;

    Ok(MemosResponse {
        memos: list_memos(deps.storage, &address)?,
    })
}

fn total_forwarded(storage: &dyn Storage, channel: &str) -> StdResult<Vec<Coin>> {
    TOTAL_FORWARDED
        .prefix(channel)
        .range(storage, None, None, Order::Ascending)
        .map(|item| item.map(|(denom, amount)| Coin { denom, amount }))
        .collect()
}

fn empty_stats() -> StatsByChannelResponse {
    StatsByChannelResponse {
        num_of_accounts: 0,
        num_of_forwards: 0,
        total_forwarded: vec![],
    }
}
