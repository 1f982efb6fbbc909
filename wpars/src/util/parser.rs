//! Parsers for supplicant replies.
//!
//! `STATUS` and `BSS <n>` answer with `key=value` lines. Each line is split
//! on its first `=`; unknown keys are ignored. SSIDs are kept exactly as
//! printed so they can be re-serialized without loss.

use std::str::FromStr;

use log::debug;

use crate::Result;
use crate::api::models::{NetworkDetail, SecurityLabel, StationError, StationInfo, StationState};
use crate::types::constants::reply;

/// Iterates the `key=value` pairs of a reply, skipping lines without `=`.
fn key_values(text: &str) -> impl Iterator<Item = (&str, &str)> {
    text.lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value))
}

/// Parses a numeric field, reporting the offending line on failure.
fn parse_number<T: FromStr>(command: &str, key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        debug!("{command}: malformed {key}={value}");
        StationError::UnexpectedReply {
            command: command.into(),
            reply: format!("{key}={value}"),
        }
    })
}

/// SSID as shown to callers; hidden networks get a placeholder.
fn display_ssid(raw: &str) -> String {
    if is_hidden(raw) {
        reply::HIDDEN_SSID_LABEL.to_string()
    } else {
        raw.to_string()
    }
}

/// Parses a `STATUS` reply.
///
/// A reply without `wpa_state` yields [`StationState::Error`]. Network
/// details are only kept when the state is `Connected`.
///
/// # Errors
///
/// Returns [`StationError::UnexpectedReply`] when `wpa_state` carries a value
/// the station model does not know or `freq` is not a number.
pub fn parse_status(text: &str) -> Result<StationInfo> {
    let mut state = StationState::default();
    let mut detail = NetworkDetail::default();

    for (key, value) in key_values(text) {
        match key {
            "bssid" => detail.bssid = value.trim().to_string(),
            "freq" => detail.frequency = parse_number("STATUS", key, value)?,
            "key_mgmt" => detail.security = parse_security(value),
            "ssid" => detail.ssid = display_ssid(value),
            "wpa_state" => {
                state = StationState::from_wpa_state(value).ok_or_else(|| {
                    StationError::UnexpectedReply {
                        command: "STATUS".into(),
                        reply: format!("wpa_state={value}"),
                    }
                })?;
            }
            _ => {}
        }
    }

    Ok(StationInfo::new(state, detail))
}

/// Parses a `BSS <n>` reply.
///
/// Returns `None` when the reply carries no BSSID, which is how the
/// supplicant signals the end of the scan list.
///
/// # Errors
///
/// Returns [`StationError::UnexpectedReply`] when `freq` or `level` is not
/// a number.
pub fn parse_bss(text: &str) -> Result<Option<NetworkDetail>> {
    let mut detail = NetworkDetail::default();

    for (key, value) in key_values(text) {
        match key {
            "bssid" => detail.bssid = value.trim().to_string(),
            "freq" => detail.frequency = parse_number("BSS", key, value)?,
            "level" => detail.level = parse_number("BSS", key, value)?,
            "flags" => detail.security = parse_security(value),
            "ssid" => detail.ssid = display_ssid(value),
            _ => {}
        }
    }

    if detail.bssid.is_empty() {
        Ok(None)
    } else {
        Ok(Some(detail))
    }
}

/// Derives a security label from BSS flags or a `key_mgmt` value.
///
/// First match wins in the order `WPA2`, `WPA`, `WEP`.
pub fn parse_security(flags: &str) -> SecurityLabel {
    if flags.contains("WPA2") {
        SecurityLabel::Wpa2
    } else if flags.contains("WPA") {
        SecurityLabel::Wpa
    } else if flags.contains("WEP") {
        SecurityLabel::Wep
    } else {
        SecurityLabel::None
    }
}

/// Returns true when the SSID contains the supplicant's escaped NUL marker.
pub fn is_hidden(ssid: &str) -> bool {
    ssid.contains(reply::HIDDEN_SSID_MARKER)
}

/// Parses the network id returned by `ADD_NETWORK`.
pub fn parse_network_id(text: &str) -> Result<u32> {
    text.trim()
        .parse()
        .map_err(|_| StationError::UnexpectedReply {
            command: "ADD_NETWORK".into(),
            reply: text.trim().to_string(),
        })
}
