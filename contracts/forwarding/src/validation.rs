use std::collections::HashSet;

use cosmwasm_std::{Addr, Api, MessageInfo, Storage};

use crate::error::ContractError;
use crate::keepers::{ChannelKeeper, TRANSFER_PORT};
use crate::state::CONFIG;

/// Maximum length of a recipient address on the counterparty chain, in bytes
pub const MAX_RECIPIENT_LENGTH: usize = 2048;

const CHANNEL_ID_MIN_LENGTH: usize = 8;
const CHANNEL_ID_MAX_LENGTH: usize = 64;

const DENOM_MIN_LENGTH: usize = 3;
const DENOM_MAX_LENGTH: usize = 128;

/// Validates a channel identifier against the ICS-24 host requirements:
/// 8 to 64 characters out of `[a-zA-Z0-9._+-#[]<>]`.
pub fn validate_channel_id(channel_id: &str) -> Result<(), ContractError> {
    let invalid = |reason: &str| ContractError::InvalidChannel {
        channel_id: channel_id.to_string(),
        reason: reason.to_string(),
    };

    if !(CHANNEL_ID_MIN_LENGTH..=CHANNEL_ID_MAX_LENGTH).contains(&channel_id.len()) {
        return Err(invalid("identifier must be between 8 and 64 characters"));
    }

    let valid_chars = channel_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "._+-#[]<>".contains(c));
    if !valid_chars {
        return Err(invalid("identifier contains invalid characters"));
    }

    Ok(())
}

/// Validates the channel id and checks that the channel exists on the transfer port and is open.
pub fn validate_open_channel(
    channels: &dyn ChannelKeeper,
    channel_id: &str,
) -> Result<(), ContractError> {
    validate_channel_id(channel_id)?;

    let state = channels
        .get_channel(TRANSFER_PORT, channel_id)
        .ok_or_else(|| ContractError::InvalidChannel {
            channel_id: channel_id.to_string(),
            reason: "channel does not exist".to_string(),
        })?;

    if state != ibc_proto::ibc::core::channel::v1::State::Open {
        return Err(ContractError::InvalidChannel {
            channel_id: channel_id.to_string(),
            reason: format!("channel is not open: {}", state.as_str_name()),
        });
    }

    Ok(())
}

pub fn validate_recipient(recipient: &str) -> Result<(), ContractError> {
    if recipient.len() > MAX_RECIPIENT_LENGTH {
        return Err(ContractError::RecipientTooLong {
            max_length: MAX_RECIPIENT_LENGTH,
        });
    }

    Ok(())
}

/// Validates the optional fallback address. An empty string is treated as no fallback.
pub fn validate_fallback(
    api: &dyn Api,
    fallback: Option<String>,
) -> Result<Option<Addr>, ContractError> {
    match fallback {
        None => Ok(None),
        Some(fallback) if fallback.is_empty() => Ok(None),
        Some(fallback) => api
            .addr_validate(&fallback)
            .map(Some)
            .map_err(|_| ContractError::InvalidFallback { fallback }),
    }
}

/// Checks a denom against the bank module rules: a letter followed by 2 to 127
/// characters out of `[a-zA-Z0-9/:._-]`.
pub fn validate_denom(denom: &str) -> Result<(), ContractError> {
    let mut chars = denom.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c));
    let valid_length = (DENOM_MIN_LENGTH..=DENOM_MAX_LENGTH).contains(&denom.len());

    if !starts_with_letter || !valid_rest || !valid_length {
        return Err(ContractError::InvalidDenom {
            denom: denom.to_string(),
        });
    }

    Ok(())
}

/// Validates a full allowed denoms list: non-empty, every denom well-formed, no duplicates.
pub fn validate_allowed_denoms(denoms: &[String]) -> Result<(), ContractError> {
    if denoms.is_empty() {
        return Err(ContractError::InvalidDenoms {
            reason: "at least one denom must be allowed".to_string(),
        });
    }

    let mut seen = HashSet::with_capacity(denoms.len());
    for denom in denoms {
        validate_denom(denom).map_err(|_| ContractError::InvalidDenoms {
            reason: format!("invalid denom: {denom}"),
        })?;

        if !seen.insert(denom.as_str()) {
            return Err(ContractError::InvalidDenoms {
                reason: format!("duplicate denom: {denom}"),
            });
        }
    }

    Ok(())
}

/// Validates that the caller is the configured authority
pub fn validate_authority(storage: &dyn Storage, info: &MessageInfo) -> Result<(), ContractError> {
    let config = CONFIG.load(storage)?;

    if info.sender != config.authority {
        return Err(ContractError::Unauthorized {});
    }

    Ok(())
}
