use std::collections::BTreeMap;

use cosmwasm_std::{Coin, Order, StdResult, Storage};

use crate::msg::GenesisState;
use crate::state::{NUM_OF_ACCOUNTS, NUM_OF_FORWARDS, TOTAL_FORWARDED};

/// Loads the per-channel counters. Entries are written as given; nothing beyond
/// deserialization is validated.
pub fn init_genesis(storage: &mut dyn Storage, genesis: &GenesisState) -> StdResult<()> {
    for (channel, count) in &genesis.num_of_accounts {
        NUM_OF_ACCOUNTS.save(storage, channel, count)?;
    }

    for (channel, count) in &genesis.num_of_forwards {
        NUM_OF_FORWARDS.save(storage, channel, count)?;
    }

    for (channel, total) in &genesis.total_forwarded {
        for coin in total {
            TOTAL_FORWARDED.save(
                storage,
                (channel.as_str(), coin.denom.as_str()),
                &coin.amount,
            )?;
        }
    }

    Ok(())
}

pub fn export_genesis(storage: &dyn Storage) -> StdResult<GenesisState> {
    let num_of_accounts = NUM_OF_ACCOUNTS
        .range(storage, None, None, Order::Ascending)
        .collect::<StdResult<BTreeMap<_, _>>>()?;

    let num_of_forwards = NUM_OF_FORWARDS
        .range(storage, None, None, Order::Ascending)
        .collect::<StdResult<BTreeMap<_, _>>>()?;

    let mut total_forwarded: BTreeMap<String, Vec<Coin>> = BTreeMap::new();
    for item in TOTAL_FORWARDED.range(storage, None, None, Order::Ascending) {
        let ((channel, denom), amount) = item?;
        total_forwarded
            .entry(channel)
            .or_default()
            .push(Coin { denom, amount });
    }

    Ok(GenesisState {
        num_of_accounts,
        num_of_forwards,
        total_forwarded,
    })
}
