use cosmwasm_std::{Env, Event, Response, StdResult, Storage, Uint128, Uint64};
use ibc_proto::cosmos::base::v1beta1::Coin as ProtoCoin;
use ibc_proto::ibc::apps::transfer::v1::MsgTransfer;
use ibc_proto::ibc::core::client::v1::Height;

use crate::account::ForwardingAccount;
use crate::error::ContractError;
use crate::keepers::{is_channel_open, ForwardingDepsMut, TRANSFER_PORT};
use crate::queue;
use crate::state::{ALLOWED_DENOMS, CONFIG, NUM_OF_FORWARDS, TOTAL_FORWARDED};

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Forwards the allowed denom balances of every pending account to its recipient.
///
/// Accounts on a channel that is missing or not open are skipped, and a transfer the
/// transfer application rejects is dropped. Neither is retried or put back in the queue;
/// the funds stay on the account until it is cleared or receives funds again.
pub fn execute_forwards(deps: ForwardingDepsMut, env: Env) -> Result<Response, ContractError> {
    let pending = queue::drain_all(deps.transient)?;
    if pending.is_empty() {
        return Ok(Response::new().add_attribute("action", "execute_forwards"));
    }

    deps.api.debug(&format!(
        "executing automatic forwards for {} accounts",
        pending.len()
    ));

    let config = CONFIG.load(deps.storage)?;
    let allowed_denoms = ALLOWED_DENOMS.may_load(deps.storage)?.unwrap_or_default();
    let timeout_timestamp = timeout_timestamp(&env, config.transfer_timeout_seconds)?;

    let mut events = vec![];
    for account in pending {
        if !is_channel_open(deps.channels, &account.channel) {
            deps.api.debug(&format!(
                "skipping automatic forward for {}: channel {} is not open",
                account.address(),
                account.channel
            ));
            continue;
        }

        let balances = deps.ledger.get_all_balances(account.address());
        for denom in &allowed_denoms {
            let amount = balances
                .iter()
                .find(|coin| coin.denom == *denom)
                .map(|coin| coin.amount)
                .unwrap_or_default();
            if amount.is_zero() {
                continue;
            }

            let msg = build_transfer(&account, denom, amount, timeout_timestamp);
            match deps.transfer.transfer(msg) {
                Ok(sequence) => {
                    record_forward(deps.storage, &account.channel, denom, amount)?;

                    events.push(
                        Event::new("forward_executed")
                            .add_attribute("address", account.address().as_str())
                            .add_attribute("channel", &account.channel)
                            .add_attribute("recipient", &account.recipient)
                            .add_attribute("denom", denom)
                            .add_attribute("amount", amount)
                            .add_attribute("sequence", sequence.to_string()),
                    );
                }
                Err(err) => {
                    deps.api.debug(&format!(
                        "unable to execute automatic forward of {}{} from {}: {}",
                        amount,
                        denom,
                        account.address(),
                        err
                    ));
                }
            }
        }
    }

    Ok(Response::new()
        .add_attribute("action", "execute_forwards")
        .add_attribute("forwards_executed", events.len().to_string())
        .add_events(events))
}

/// Absolute timeout in nanoseconds, `timeout_seconds` after the current block time.
fn timeout_timestamp(env: &Env, timeout_seconds: u64) -> Result<u64, ContractError> {
    let timeout = Uint64::new(timeout_seconds)
        .checked_mul(Uint64::new(NANOS_PER_SECOND))?
        .checked_add(Uint64::new(env.block.time.nanos()))?;

    Ok(timeout.u64())
}

fn build_transfer(
    account: &ForwardingAccount,
    denom: &str,
    amount: Uint128,
    timeout_timestamp: u64,
) -> MsgTransfer {
    MsgTransfer {
        source_port: TRANSFER_PORT.to_string(),
        source_channel: account.channel.clone(),
        token: Some(ProtoCoin {
            denom: denom.to_string(),
            amount: amount.to_string(),
        }),
        sender: account.address().to_string(),
        receiver: account.recipient.clone(),
        timeout_height: Some(Height {
            revision_number: 0,
            revision_height: 0,
        }),
        timeout_timestamp,
        memo: String::new(),
        ..Default::default()
    }
}

fn record_forward(
    storage: &mut dyn Storage,
    channel: &str,
    denom: &str,
    amount: Uint128,
) -> Result<(), ContractError> {
    NUM_OF_FORWARDS.update(storage, channel, |count| -> StdResult<_> {
        Ok(count.unwrap_or_default() + 1)
    })?;

    let total = TOTAL_FORWARDED
        .may_load(storage, (channel, denom))?
        .unwrap_or_default()
        .checked_add(amount)?;
    TOTAL_FORWARDED.save(storage, (channel, denom), &total)?;

    Ok(())
}
