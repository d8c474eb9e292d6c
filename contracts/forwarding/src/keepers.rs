use cosmwasm_std::{Addr, Api, Coin, StdResult, Storage, Uint128};
use ibc_proto::ibc::apps::transfer::v1::MsgTransfer;
use ibc_proto::ibc::core::channel::v1::State;

use crate::account::{Account, BaseAccount};

/// Port that ICS-20 transfer channels are bound to
pub const TRANSFER_PORT: &str = "transfer";

/// Account and balance store of the host chain.
pub trait Ledger {
    fn get_account(&self, address: &Addr) -> Option<Account>;

    fn set_account(&mut self, account: Account);

    /// Returns a fresh base account with the next account number. The account
    /// is not persisted until passed to `set_account`.
    fn new_account_with_address(&mut self, address: &Addr) -> BaseAccount;

    fn get_balance(&self, address: &Addr, denom: &str) -> Uint128;

    fn get_all_balances(&self, address: &Addr) -> Vec<Coin>;

    fn send_coins(&mut self, from: &Addr, to: &Addr, amount: &[Coin]) -> StdResult<()>;
}

/// Read access to the IBC channel registry.
pub trait ChannelKeeper {
    /// Returns the state of the channel, or `None` if it doesn't exist.
    fn get_channel(&self, port_id: &str, channel_id: &str) -> Option<State>;
}

/// ICS-20 transfer application. Accepting a transfer means the packet was
/// committed on the channel; delivery is not tracked by this module.
pub trait TransferKeeper {
    /// Returns the packet sequence of the accepted transfer.
    fn transfer(&mut self, msg: MsgTransfer) -> StdResult<u64>;
}

/// Everything a state-changing handler of this module has access to.
///
/// `storage` is the durable module store. `transient` is only valid for the
/// current processing cycle; the host discards it when the cycle ends.
pub struct ForwardingDepsMut<'a> {
    pub storage: &'a mut dyn Storage,
    pub transient: &'a mut dyn Storage,
    pub api: &'a dyn Api,
    pub ledger: &'a mut dyn Ledger,
    pub channels: &'a dyn ChannelKeeper,
    pub transfer: &'a mut dyn TransferKeeper,
}

/// Read-only counterpart of `ForwardingDepsMut`, used by queries.
#[derive(Clone, Copy)]
pub struct ForwardingDeps<'a> {
    pub storage: &'a dyn Storage,
    pub api: &'a dyn Api,
    pub ledger: &'a dyn Ledger,
}

/// Returns true if the channel exists on the transfer port and is open.
pub fn is_channel_open(channels: &dyn ChannelKeeper, channel_id: &str) -> bool {
    channels.get_channel(TRANSFER_PORT, channel_id) == Some(State::Open)
}
