use bech32::{Bech32, Hrp};
use cosmwasm_std::{Addr, CanonicalAddr};
use sha2::{Digest, Sha256};

use crate::account::ForwardingRoute;
use crate::error::ContractError;

/// Name used to namespace derived addresses, so they can never collide with
/// addresses derived by other modules from the same input bytes.
pub const MODULE_NAME: &str = "forwarding";

/// Length of a derived account address in bytes
pub const ADDRESS_LENGTH: usize = 20;

/// Derives the canonical forwarding address for a (channel, recipient, fallback) triple.
///
/// The digest is `sha256(sha256("module") | MODULE_NAME | 0x00 | key)` where `key` is the
/// concatenation of the three fields, each prefixed with its length as a big-endian u64.
/// The length prefixes make the encoding injective, i.e. ("ab", "c") and ("a", "bc")
/// produce different keys. A missing fallback is encoded as an empty string.
pub fn derive_canonical(channel: &str, recipient: &str, fallback: Option<&str>) -> CanonicalAddr {
    let type_hash = Sha256::digest(b"module");

    let mut hasher = Sha256::new();
    hasher.update(type_hash);
    hasher.update(MODULE_NAME.as_bytes());
    hasher.update([0u8]);
    for field in [channel, recipient, fallback.unwrap_or_default()] {
        hasher.update((field.len() as u64).to_be_bytes());
        hasher.update(field.as_bytes());
    }
    let digest = hasher.finalize();

    CanonicalAddr::from(&digest[digest.len() - ADDRESS_LENGTH..])
}

/// Derives the bech32 forwarding address for a route, using the given address prefix.
pub fn derive_address(prefix: &str, route: &ForwardingRoute) -> Result<Addr, ContractError> {
    let canonical = derive_canonical(
        &route.channel,
        &route.recipient,
        route.fallback.as_ref().map(Addr::as_str),
    );

    encode_address(prefix, &canonical)
}

pub fn encode_address(prefix: &str, canonical: &CanonicalAddr) -> Result<Addr, ContractError> {
    let hrp = parse_prefix(prefix)?;

    let address = bech32::encode::<Bech32>(hrp, canonical.as_slice()).map_err(|_| {
        ContractError::InvalidAddressPrefix {
            prefix: prefix.to_string(),
        }
    })?;

    Ok(Addr::unchecked(address))
}

pub fn parse_prefix(prefix: &str) -> Result<Hrp, ContractError> {
    Hrp::parse(prefix).map_err(|_| ContractError::InvalidAddressPrefix {
        prefix: prefix.to_string(),
    })
}
