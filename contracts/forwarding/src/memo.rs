use std::collections::HashSet;

use cosmwasm_std::{Addr, Event, MessageInfo, Order, Response, StdError, StdResult, Storage};

use crate::error::ContractError;
use crate::keepers::ForwardingDepsMut;
use crate::msg::MemoEntry;
use crate::state::{CONFIG, MEMOS};
use crate::validation::validate_denom;

/// Maximum length of a single memo, in bytes
pub const MAX_MEMO_LENGTH: usize = 1024;

/// Maximum number of denoms a single account can hold memos for
pub const MAX_MEMO_ENTRIES: usize = 10;

/// Sets, replaces or (with an empty memo) deletes the memo of a forwarding account for a denom.
/// Only the account's recipient, its fallback, or the authority may do this.
pub fn set_memo(
    deps: ForwardingDepsMut,
    info: MessageInfo,
    address: String,
    denom: String,
    memo: String,
) -> Result<Response, ContractError> {
    validate_denom(&denom)?;

    let address = deps.api.addr_validate(&address)?;
    let account = deps
        .ledger
        .get_account(&address)
        .ok_or_else(|| ContractError::AccountNotFound {
            address: address.to_string(),
        })?
        .into_forwarding()
        .ok_or_else(|| ContractError::NotForwardingAccount {
            address: address.to_string(),
        })?;

    let config = CONFIG.load(deps.storage)?;
    let signer = info.sender.as_str();
    let is_recipient = signer == account.recipient;
    let is_fallback = account
        .fallback
        .as_ref()
        .is_some_and(|fallback| *fallback == info.sender);
    if !is_recipient && !is_fallback && info.sender != config.authority {
        return Err(ContractError::Unauthorized {});
    }

    if memo.is_empty() {
        MEMOS.remove(deps.storage, (&address, denom.as_str()));
    } else if memo.len() > MAX_MEMO_LENGTH {
        return Err(ContractError::MemoTooLong {
            max_length: MAX_MEMO_LENGTH,
        });
    } else {
        let is_new_denom = !MEMOS.has(deps.storage, (&address, denom.as_str()));
        if is_new_denom && count_memos(deps.storage, &address) >= MAX_MEMO_ENTRIES {
            return Err(ContractError::TooManyMemos {
                max_entries: MAX_MEMO_ENTRIES,
            });
        }

        MEMOS.save(deps.storage, (&address, denom.as_str()), &memo)?;
    }

    Ok(Response::new()
        .add_attribute("action", "set_memo")
        .add_attribute("sender", info.sender)
        .add_event(
            Event::new("memo_set")
                .add_attribute("address", address)
                .add_attribute("denom", denom)
                .add_attribute("memo", memo),
        ))
}

/// Stores the memos supplied at registration. The whole batch is validated
/// before anything is written.
pub fn set_initial_memos(
    storage: &mut dyn Storage,
    address: &Addr,
    entries: &[MemoEntry],
) -> Result<(), ContractError> {
    validate_memo_entries(entries)?;

    for entry in entries {
        MEMOS.save(storage, (address, entry.denom.as_str()), &entry.memo)?;
    }

    Ok(())
}

pub fn validate_memo_entries(entries: &[MemoEntry]) -> Result<(), ContractError> {
    if entries.len() > MAX_MEMO_ENTRIES {
        return Err(ContractError::TooManyMemos {
            max_entries: MAX_MEMO_ENTRIES,
        });
    }

    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        validate_denom(&entry.denom)?;

        if !seen.insert(entry.denom.as_str()) {
            return Err(ContractError::DuplicateDenom {
                denom: entry.denom.clone(),
            });
        }

        if entry.memo.is_empty() {
            return Err(ContractError::EmptyMemo {
                denom: entry.denom.clone(),
            });
        }

        if entry.memo.len() > MAX_MEMO_LENGTH {
            return Err(ContractError::MemoTooLong {
                max_length: MAX_MEMO_LENGTH,
            });
        }
    }

    Ok(())
}

pub fn get_memo(storage: &dyn Storage, address: &Addr, denom: &str) -> StdResult<String> {
    MEMOS
        .may_load(storage, (address, denom))?
        .ok_or_else(|| StdError::not_found(format!("memo for {address} and denom {denom}")))
}

/// Returns all memos of a single account, ordered by denom.
pub fn list_memos(storage: &dyn Storage, address: &Addr) -> StdResult<Vec<MemoEntry>> {
    MEMOS
        .prefix(address)
        .range(storage, None, None, Order::Ascending)
        .map(|item| item.map(|(denom, memo)| MemoEntry { denom, memo }))
        .collect()
}

fn count_memos(storage: &dyn Storage, address: &Addr) -> usize {
    MEMOS
        .prefix(address)
        .keys_raw(storage, None, None, Order::Ascending)
        .count()
}
