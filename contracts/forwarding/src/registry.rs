use cosmwasm_std::{
    to_json_binary, Addr, Api, Coin, Env, Event, MessageInfo, Response, StdResult, Storage,
};

use crate::account::{Account, AccountKey, ForwardingRoute};
use crate::address::derive_address;
use crate::error::ContractError;
use crate::keepers::{ChannelKeeper, ForwardingDepsMut, Ledger};
use crate::memo::{set_initial_memos, validate_memo_entries};
use crate::msg::{MemoEntry, RegisterAccountResponse};
use crate::queue;
use crate::state::{ALLOWED_DENOMS, CONFIG, NUM_OF_ACCOUNTS};
use crate::validation::{
    validate_allowed_denoms, validate_authority, validate_fallback, validate_open_channel,
    validate_recipient,
};

pub fn register_account(
    deps: ForwardingDepsMut,
    env: Env,
    info: MessageInfo,
    channel: String,
    recipient: String,
    fallback: Option<String>,
    memos: Vec<MemoEntry>,
) -> Result<Response, ContractError> {
    let route = validate_route(deps.api, deps.channels, channel, recipient, fallback)?;
    let (address, event) = register(deps, &env, route, &memos)?;

    Ok(Response::new()
        .set_data(to_json_binary(&RegisterAccountResponse {
            address: address.to_string(),
        })?)
        .add_attribute("action", "register_account")
        .add_attribute("sender", info.sender)
        .add_attribute("address", address)
        .add_event(event))
}

/// Checks the user supplied parts of a route: the channel must be a valid identifier of an
/// open transfer channel, the recipient must fit the ICS-20 receiver bound and the fallback,
/// if any, must be a valid local address.
pub fn validate_route(
    api: &dyn Api,
    channels: &dyn ChannelKeeper,
    channel: String,
    recipient: String,
    fallback: Option<String>,
) -> Result<ForwardingRoute, ContractError> {
    validate_recipient(&recipient)?;
    let fallback = validate_fallback(api, fallback)?;
    validate_open_channel(channels, &channel)?;

    Ok(ForwardingRoute::new(channel, recipient, fallback))
}

/// Creates or upgrades the forwarding account for an already validated route.
///
/// Funds that reached the address before it was registered are queued for
/// forwarding at the end of the block.
pub fn register(
    deps: ForwardingDepsMut,
    env: &Env,
    route: ForwardingRoute,
    memos: &[MemoEntry],
) -> Result<(Addr, Event), ContractError> {
    validate_memo_entries(memos)?;

    let config = CONFIG.load(deps.storage)?;
    let address = derive_address(&config.address_prefix, &route)?;

    let (base, existed) = match deps.ledger.get_account(&address) {
        None => (deps.ledger.new_account_with_address(&address), false),
        Some(existing) => {
            validate_eligibility(&config.address_prefix, &existing, &address)?;

            match existing {
                Account::Base(base) => (base, true),
                Account::Forwarding(_) => {
                    return Err(ContractError::AccountTypeConflict {
                        address: address.to_string(),
                        reason: "account has already been registered".to_string(),
                    })
                }
                other => {
                    return Err(ContractError::AccountTypeConflict {
                        address: address.to_string(),
                        reason: format!("unsupported account type: {}", other.type_name()),
                    })
                }
            }
        }
    };

    let account = base.into_forwarding(route, env.block.height);
    deps.ledger.set_account(Account::Forwarding(account.clone()));
    increment_num_of_accounts(deps.storage, &account.channel)?;

    if existed && !allowed_balances(deps.storage, &*deps.ledger, &address)?.is_empty() {
        queue::enqueue(deps.transient, &account)?;
    }

    set_initial_memos(deps.storage, &address, memos)?;

    let event = Event::new("account_registered")
        .add_attribute("address", address.as_str())
        .add_attribute("channel", &account.channel)
        .add_attribute("recipient", &account.recipient)
        .add_attribute(
            "fallback",
            account.fallback.as_ref().map(Addr::as_str).unwrap_or_default(),
        );

    Ok((address, event))
}

/// An existing account may become a forwarding account if it is brand new (no public key
/// and a zero sequence), or if it already carries the forwarding sentinel of this exact
/// address. Anything else means a key holder controls the address.
pub fn validate_eligibility(
    address_prefix: &str,
    account: &Account,
    derived_address: &Addr,
) -> Result<(), ContractError> {
    let base = account.base();

    let is_new_account = base.pub_key.is_none() && base.sequence == 0;
    let has_sentinel = match &base.pub_key {
        Some(AccountKey::Forwarding(route)) => {
            derive_address(address_prefix, route)? == *derived_address
        }
        _ => false,
    };

    if !is_new_account && !has_sentinel {
        return Err(ContractError::AccountAlreadyActive {
            address: derived_address.to_string(),
        });
    }

    Ok(())
}

pub fn clear_account(
    deps: ForwardingDepsMut,
    info: MessageInfo,
    address: String,
    use_fallback: bool,
) -> Result<Response, ContractError> {
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

    let balance = allowed_balances(deps.storage, &*deps.ledger, &address)?;
    if balance.is_empty() {
        return Err(ContractError::NothingToClear {
            address: address.to_string(),
        });
    }

    let response = Response::new()
        .add_attribute("action", "clear_account")
        .add_attribute("sender", info.sender)
        .add_attribute("address", address.as_str());

    match (use_fallback, &account.fallback) {
        (true, Some(fallback)) => {
            deps.ledger
                .send_coins(&address, fallback, &balance)
                .map_err(|err| ContractError::TransferFailed {
                    reason: err.to_string(),
                })?;

            Ok(response.add_event(
                Event::new("account_cleared")
                    .add_attribute("address", address)
                    .add_attribute("recipient", fallback.as_str()),
            ))
        }
        _ => {
            queue::enqueue(deps.transient, &account)?;

            Ok(response.add_attribute("queued", "true"))
        }
    }
}

pub fn set_allowed_denoms(
    deps: ForwardingDepsMut,
    info: MessageInfo,
    denoms: Vec<String>,
) -> Result<Response, ContractError> {
    validate_authority(deps.storage, &info)?;
    validate_allowed_denoms(&denoms)?;

    let previous_denoms = ALLOWED_DENOMS.may_load(deps.storage)?.unwrap_or_default();
    ALLOWED_DENOMS.save(deps.storage, &denoms)?;

    Ok(Response::new()
        .add_attribute("action", "set_allowed_denoms")
        .add_attribute("sender", info.sender)
        .add_event(
            Event::new("allowed_denoms_configured")
                .add_attribute("previous_denoms", previous_denoms.join(","))
                .add_attribute("current_denoms", denoms.join(",")),
        ))
}

/// Returns the non-zero balances of the account in the allowed denoms, in allowed denom order.
pub fn allowed_balances(
    storage: &dyn Storage,
    ledger: &dyn Ledger,
    address: &Addr,
) -> StdResult<Vec<Coin>> {
    let allowed_denoms = ALLOWED_DENOMS.may_load(storage)?.unwrap_or_default();

    Ok(allowed_denoms
        .into_iter()
        .map(|denom| Coin {
            amount: ledger.get_balance(address, &denom),
            denom,
        })
        .filter(|coin| !coin.amount.is_zero())
        .collect())
}

fn increment_num_of_accounts(storage: &mut dyn Storage, channel: &str) -> StdResult<u64> {
    NUM_OF_ACCOUNTS.update(storage, channel, |count| -> StdResult<_> {
        Ok(count.unwrap_or_default() + 1)
    })
}
