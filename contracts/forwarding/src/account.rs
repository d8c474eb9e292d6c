use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary};

/// The (channel, recipient, fallback) triple a forwarding address is derived from.
#[cw_serde]
pub struct ForwardingRoute {
    pub channel: String,
    pub recipient: String,
    pub fallback: Option<Addr>,
}

/// Public key slot of an account record.
#[cw_serde]
pub enum AccountKey {
    /// Key owned by a private key holder.
    Secp256k1(Binary),
    /// The address has no controlling private key and exists only as the
    /// forwarding target derived from this route.
    Forwarding(ForwardingRoute),
}

#[cw_serde]
pub struct BaseAccount {
    pub address: Addr,
    pub pub_key: Option<AccountKey>,
    pub account_number: u64,
    pub sequence: u64,
}

#[cw_serde]
pub struct ForwardingAccount {
    pub base: BaseAccount,
    pub channel: String,
    pub recipient: String,
    pub fallback: Option<Addr>,
    /// Block height at which the account was registered
    pub created_at: u64,
}

/// Any account the ledger knows about that is neither a plain user account
/// nor a forwarding account (module accounts, vesting accounts, ...).
#[cw_serde]
pub struct ModuleAccount {
    pub base: BaseAccount,
    pub name: String,
}

#[cw_serde]
pub enum Account {
    Base(BaseAccount),
    Forwarding(ForwardingAccount),
    Module(ModuleAccount),
}

impl ForwardingRoute {
    pub fn new(
        channel: impl Into<String>,
        recipient: impl Into<String>,
        fallback: Option<Addr>,
    ) -> Self {
        Self {
            channel: channel.into(),
            recipient: recipient.into(),
            fallback,
        }
    }
}

impl BaseAccount {
    pub fn new(address: Addr, account_number: u64) -> Self {
        Self {
            address,
            pub_key: None,
            account_number,
            sequence: 0,
        }
    }

    /// Upgrades the account in place into a forwarding account. Account number and
    /// sequence are preserved, the key slot is replaced by the forwarding sentinel.
    pub fn into_forwarding(self, route: ForwardingRoute, created_at: u64) -> ForwardingAccount {
        let ForwardingRoute {
            channel,
            recipient,
            fallback,
        } = route.clone();

        ForwardingAccount {
            base: BaseAccount {
                pub_key: Some(AccountKey::Forwarding(route)),
                ..self
            },
            channel,
            recipient,
            fallback,
            created_at,
        }
    }
}

impl ForwardingAccount {
    pub fn address(&self) -> &Addr {
        &self.base.address
    }

    /// Drops the forwarding data and returns the underlying base account.
    /// The sentinel key is kept, so the address stays eligible for re-registration
    /// with the same route but can't be claimed by a key holder.
    pub fn into_base(self) -> BaseAccount {
        self.base
    }
}

impl Account {
    pub fn base(&self) -> &BaseAccount {
        match self {
            Account::Base(base) => base,
            Account::Forwarding(account) => &account.base,
            Account::Module(account) => &account.base,
        }
    }

    pub fn address(&self) -> &Addr {
        &self.base().address
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Account::Base(_) => "base_account",
            Account::Forwarding(_) => "forwarding_account",
            Account::Module(_) => "module_account",
        }
    }

    pub fn as_forwarding(&self) -> Option<&ForwardingAccount> {
        match self {
            Account::Forwarding(account) => Some(account),
            _ => None,
        }
    }

    pub fn into_forwarding(self) -> Option<ForwardingAccount> {
        match self {
            Account::Forwarding(account) => Some(account),
            _ => None,
        }
    }
}
