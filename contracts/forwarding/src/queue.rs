use cosmwasm_std::{Order, StdResult, Storage};

use crate::account::ForwardingAccount;
use crate::state::PENDING_FORWARDS;

/// Marks an account for forwarding at the end of the current cycle.
/// Enqueueing the same address again overwrites the earlier snapshot.
pub fn enqueue(transient: &mut dyn Storage, account: &ForwardingAccount) -> StdResult<()> {
    PENDING_FORWARDS.save(transient, account.address(), account)
}

/// Returns all pending forwards in ascending address order and removes them from the queue.
pub fn drain_all(transient: &mut dyn Storage) -> StdResult<Vec<ForwardingAccount>> {
    let pending = PENDING_FORWARDS
        .range(transient, None, None, Order::Ascending)
        .map(|item| item.map(|(_, account)| account))
        .collect::<StdResult<Vec<_>>>()?;

    PENDING_FORWARDS.clear(transient);

    Ok(pending)
}

/// Drops any leftover entries. Called when a new processing cycle starts.
pub fn reset(transient: &mut dyn Storage) {
    PENDING_FORWARDS.clear(transient);
}

pub fn is_pending(transient: &dyn Storage, account: &ForwardingAccount) -> bool {
    PENDING_FORWARDS.has(transient, account.address())
}
