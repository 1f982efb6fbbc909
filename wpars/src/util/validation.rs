//! Input validation applied before any command reaches the supplicant.

use crate::Result;
use crate::api::models::{ConnectRequest, StationError};
use crate::types::constants::limits;

/// SSIDs must be 1 to 32 bytes.
pub(crate) fn validate_ssid(ssid: &str) -> Result<()> {
    if ssid.is_empty() {
        return Err(StationError::InvalidSsid("SSID must not be empty".into()));
    }
    if ssid.len() > limits::SSID_MAX_LEN {
        return Err(StationError::InvalidSsid(format!(
            "SSID is {} bytes, maximum is {}",
            ssid.len(),
            limits::SSID_MAX_LEN
        )));
    }
    Ok(())
}

/// PSKs may be empty (open network) and at most 64 bytes. A 64-byte PSK
/// is a raw key and must be hexadecimal.
pub(crate) fn validate_psk(psk: &str) -> Result<()> {
    if psk.len() > limits::PSK_MAX_LEN {
        return Err(StationError::InvalidPsk(format!(
            "PSK is {} bytes, maximum is {}",
            psk.len(),
            limits::PSK_MAX_LEN
        )));
    }
    if psk.len() == limits::PSK_HEX_LEN && !is_raw_psk(psk) {
        return Err(StationError::InvalidPsk(format!(
            "a {}-character PSK must be hexadecimal",
            limits::PSK_HEX_LEN
        )));
    }
    Ok(())
}

/// True for a 64-digit hex key, which the supplicant takes unquoted.
pub(crate) fn is_raw_psk(psk: &str) -> bool {
    psk.len() == limits::PSK_HEX_LEN && psk.bytes().all(|b| b.is_ascii_hexdigit())
}

pub(crate) fn validate_request(request: &ConnectRequest) -> Result<()> {
    validate_ssid(&request.ssid)?;
    validate_psk(&request.psk)
}

/// Interface names end up in filesystem paths and tool arguments.
pub(crate) fn validate_interface(name: &str) -> Result<()> {
    if name.is_empty()
        || name.len() > limits::IFNAME_MAX_LEN
        || name.contains('/')
        || name.chars().any(|c| c.is_whitespace() || c.is_control())
        || name == "."
        || name == ".."
    {
        return Err(StationError::InvalidInterface(name.to_string()));
    }
    Ok(())
}
