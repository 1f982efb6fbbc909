//! Typed control commands and reply classification.
//!
//! Commands know their wire encoding and a log-safe rendering; replies are
//! classified once, here, instead of comparing prefixes at every call site.

use std::fmt::{Display, Formatter};

use crate::types::constants::reply;
use crate::util::validation::is_raw_psk;

/// A supplicant control command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Status,
    Scan,
    Bss(usize),
    Disconnect,
    Reconnect,
    AddNetwork,
    RemoveAllNetworks,
    SetSsid { id: u32, ssid: &'a str },
    SetPsk { id: u32, psk: &'a str },
    SetOpen { id: u32 },
    EnableNetwork(u32),
    SaveConfig,
}

impl Command<'_> {
    /// Text sent over the control socket.
    ///
    /// Passphrases are quoted; a 64-digit hex key goes out bare.
    pub fn encode(&self) -> String {
        match self {
            Self::Status => "STATUS".to_string(),
            Self::Scan => "SCAN".to_string(),
            Self::Bss(index) => format!("BSS {index}"),
            Self::Disconnect => "DISCONNECT".to_string(),
            Self::Reconnect => "RECONNECT".to_string(),
            Self::AddNetwork => "ADD_NETWORK".to_string(),
            Self::RemoveAllNetworks => "REMOVE_NETWORK all".to_string(),
            Self::SetSsid { id, ssid } => format!("SET_NETWORK {id} ssid \"{ssid}\""),
            Self::SetPsk { id, psk } if is_raw_psk(psk) => format!("SET_NETWORK {id} psk {psk}"),
            Self::SetPsk { id, psk } => format!("SET_NETWORK {id} psk \"{psk}\""),
            Self::SetOpen { id } => format!("SET_NETWORK {id} key_mgmt NONE"),
            Self::EnableNetwork(id) => format!("ENABLE_NETWORK {id}"),
            Self::SaveConfig => "SAVE_CONFIG".to_string(),
        }
    }
}

/// Same as [`Command::encode`] but never shows the PSK.
impl Display for Command<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetPsk { id, .. } => write!(f, "SET_NETWORK {id} psk <redacted>"),
            other => f.write_str(&other.encode()),
        }
    }
}

/// Classified supplicant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `OK`
    Ack,
    /// `FAIL-BUSY`, typically a scan already running
    Busy,
    /// Any other `FAIL…` reply
    Failure(String),
    /// Payload: a network id or a `key=value` block
    Data(String),
}

impl Reply {
    pub fn classify(raw: &str) -> Self {
        let text = raw.trim();
        if text == reply::OK {
            Self::Ack
        } else if text.starts_with(reply::FAIL_BUSY) {
            Self::Busy
        } else if text.starts_with(reply::FAIL) {
            Self::Failure(text.to_string())
        } else {
            Self::Data(text.to_string())
        }
    }

    /// Reply text as the supplicant sent it, minus surrounding whitespace.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Ack => reply::OK,
            Self::Busy => reply::FAIL_BUSY,
            Self::Failure(text) | Self::Data(text) => text,
        }
    }

    pub fn is_ack(&self) -> bool {
        matches!(self, Self::Ack)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Busy | Self::Failure(_))
    }
}
