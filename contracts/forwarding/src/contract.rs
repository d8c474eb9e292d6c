use cosmwasm_std::{to_json_binary, Env, MessageInfo, QueryResponse, Response, StdResult};
use cw2::set_contract_version;

use crate::address::parse_prefix;
use crate::error::{new_generic_error, ContractError};
use crate::hooks::{block_before_send, recv_transfer_packet};
use crate::keepers::{ForwardingDeps, ForwardingDepsMut};
use crate::memo::set_memo;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg, SudoMsg};
use crate::query::{
    query_address, query_config, query_denoms, query_memo, query_memos, query_stats,
    query_stats_by_channel,
};
use crate::queue;
use crate::registry::{clear_account, register_account, set_allowed_denoms};
use crate::state::{Config, ALLOWED_DENOMS, CONFIG};
use crate::sweep::execute_forwards;
use crate::validation::validate_allowed_denoms;

/// Contract name that is used for migration.
pub const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
/// Contract version that is used for migration.
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Relative timeout of automatic forwards, if none is configured
pub const DEFAULT_TRANSFER_TIMEOUT_SECONDS: u64 = 600;

/// Upper bound of the configurable transfer timeout (one year)
pub const MAX_TRANSFER_TIMEOUT_SECONDS: u64 = 365 * 24 * 60 * 60;

pub fn instantiate(
    deps: ForwardingDepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let authority = deps.api.addr_validate(&msg.authority)?;
    parse_prefix(&msg.address_prefix)?;

    let transfer_timeout_seconds = msg
        .transfer_timeout_seconds
        .unwrap_or(DEFAULT_TRANSFER_TIMEOUT_SECONDS);
    if transfer_timeout_seconds == 0 {
        return Err(new_generic_error(
            "transfer timeout must be greater than zero",
        ));
    }
    if transfer_timeout_seconds > MAX_TRANSFER_TIMEOUT_SECONDS {
        return Err(new_generic_error(format!(
            "transfer timeout must not exceed {MAX_TRANSFER_TIMEOUT_SECONDS} seconds"
        )));
    }

    if !msg.allowed_denoms.is_empty() {
        validate_allowed_denoms(&msg.allowed_denoms)?;
    }

    let config = Config {
        authority,
        address_prefix: msg.address_prefix,
        transfer_timeout_seconds,
    };

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    CONFIG.save(deps.storage, &config)?;
    ALLOWED_DENOMS.save(deps.storage, &msg.allowed_denoms)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("sender", info.sender)
        .add_attribute("authority", config.authority)
        .add_attribute("address_prefix", config.address_prefix)
        .add_attribute("allowed_denoms", msg.allowed_denoms.join(",")))
}

pub fn execute(
    deps: ForwardingDepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RegisterAccount {
            channel,
            recipient,
            fallback,
            memos,
        } => register_account(deps, env, info, channel, recipient, fallback, memos),
        ExecuteMsg::ClearAccount { address, fallback } => {
            clear_account(deps, info, address, fallback)
        }
        ExecuteMsg::SetMemo {
            address,
            denom,
            memo,
        } => set_memo(deps, info, address, denom, memo),
        ExecuteMsg::SetAllowedDenoms { denoms } => set_allowed_denoms(deps, info, denoms),
    }
}

pub fn sudo(deps: ForwardingDepsMut, env: Env, msg: SudoMsg) -> Result<Response, ContractError> {
    match msg {
        SudoMsg::BeginBlock {} => {
            queue::reset(deps.transient);

            Ok(Response::new().add_attribute("action", "begin_block"))
        }
        SudoMsg::EndBlock {} => execute_forwards(deps, env),
        SudoMsg::BlockBeforeSend { from, to, amount } => {
            block_before_send(deps, from, to, amount)
        }
        SudoMsg::RecvTransferPacket { receiver, memo } => {
            recv_transfer_packet(deps, env, receiver, memo)
        }
    }
}

pub fn query(deps: ForwardingDeps, _env: Env, msg: QueryMsg) -> StdResult<QueryResponse> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Denoms {} => to_json_binary(&query_denoms(deps)?),
        QueryMsg::Address {
            channel,
            recipient,
            fallback,
        } => to_json_binary(&query_address(deps, channel, recipient, fallback)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
        QueryMsg::StatsByChannel { channel } => {
            to_json_binary(&query_stats_by_channel(deps, channel)?)
        }
        QueryMsg::Memo { address, denom } => to_json_binary(&query_memo(deps, address, denom)?),
        QueryMsg::Memos { address } => to_json_binary(&query_memos(deps, address)?),
    }
}
