use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// ICS-20 packet memo that asks the receiving chain to register the packet
/// receiver as a forwarding account before the funds are credited.
///
/// Wire format: `{"noble":{"forwarding":{"recipient":"...","channel":"..."}}}`
///
/// Unknown keys are tolerated on purpose, since the same memo is often shared
/// with other middlewares (e.g. packet-forward or wasm hooks).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct RegisterAccountMemo {
    pub noble: RegisterAccountDataWrapper,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct RegisterAccountDataWrapper {
    pub forwarding: RegisterAccountData,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct RegisterAccountData {
    /// Address on the counterparty chain that forwarded funds are sent to
    pub recipient: String,
    /// Channel on the receiving chain that funds are forwarded through
    pub channel: String,
}

impl RegisterAccountMemo {
    pub fn new(channel: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            noble: RegisterAccountDataWrapper {
                forwarding: RegisterAccountData {
                    recipient: recipient.into(),
                    channel: channel.into(),
                },
            },
        }
    }

    /// Parses an ICS-20 memo. Returns `None` for memos that are not JSON or
    /// don't carry forwarding registration data.
    pub fn parse(memo: &str) -> Option<RegisterAccountData> {
        if memo.trim().is_empty() {
            return None;
        }

        serde_json_wasm::from_str::<RegisterAccountMemo>(memo)
            .ok()
            .map(|memo| memo.noble.forwarding)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json_wasm::ser::Error> {
        serde_json_wasm::to_string(self)
    }
}
