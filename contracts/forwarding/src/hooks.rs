use cosmwasm_std::{Addr, Coin, Env, Response};
use interface::forwarding::RegisterAccountMemo;

use crate::account::{Account, ForwardingRoute};
use crate::address::derive_address;
use crate::error::ContractError;
use crate::keepers::ForwardingDepsMut;
use crate::queue;
use crate::registry::{register, validate_route};
use crate::state::CONFIG;

/// Runs for every balance transfer on the host chain. If the receiver is a
/// forwarding account it is queued for the end-of-block forward. The transfer
/// itself is never blocked or redirected, so the receiver is returned unchanged.
pub fn send_restriction(
    deps: ForwardingDepsMut,
    from: &str,
    to: Addr,
    amount: &Coin,
) -> Result<Addr, ContractError> {
    if let Some(Account::Forwarding(account)) = deps.ledger.get_account(&to) {
        deps.api.debug(&format!(
            "queueing forwarding account {} after receiving {} from {}",
            to, amount, from
        ));

        queue::enqueue(deps.transient, &account)?;
    }

    Ok(to)
}

pub fn block_before_send(
    deps: ForwardingDepsMut,
    from: String,
    to: String,
    amount: Coin,
) -> Result<Response, ContractError> {
    // the sender is only logged, so it isn't validated
    let to = deps.api.addr_validate(&to)?;

    let to = send_restriction(deps, &from, to, &amount)?;

    Ok(Response::new()
        .add_attribute("action", "block_before_send")
        .add_attribute("to", to))
}

/// Registers the receiver of an incoming ICS-20 packet as a forwarding account
/// when the packet memo asks for it. Memos without forwarding data are ignored.
pub fn recv_transfer_packet(
    deps: ForwardingDepsMut,
    env: Env,
    receiver: String,
    memo: String,
) -> Result<Response, ContractError> {
    let response = Response::new().add_attribute("action", "recv_transfer_packet");

    let Some(data) = RegisterAccountMemo::parse(&memo) else {
        return Ok(response);
    };

    let config = CONFIG.load(deps.storage)?;
    let expected = derive_address(
        &config.address_prefix,
        &ForwardingRoute::new(data.channel.as_str(), data.recipient.as_str(), None),
    )?;
    if receiver != expected.as_str() {
        return Err(ContractError::ReceiverMismatch {
            receiver,
            expected: expected.to_string(),
        });
    }

    if let Some(Account::Forwarding(_)) = deps.ledger.get_account(&expected) {
        return Ok(response.add_attribute("registered", "false"));
    }

    let route = validate_route(deps.api, deps.channels, data.channel, data.recipient, None)?;
    let (address, event) = register(deps, &env, route, &[])?;

    Ok(response
        .add_attribute("registered", "true")
        .add_attribute("address", address)
        .add_event(event))
}
