//! MAC address reading and changing.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::{info, warn};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{ensure_interface, run_tool};
use crate::Result;
use crate::api::models::StationError;
use crate::types::constants::tools;

/// A 48-bit hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// Random locally administered unicast address.
    pub fn random_local() -> Self {
        let mut bytes: [u8; 6] = rand::random();
        bytes[0] = (bytes[0] & 0xFE) | 0x02;
        Self(bytes)
    }

    pub fn is_unicast(&self) -> bool {
        self.0[0] & 0x01 == 0
    }

    pub fn is_locally_administered(&self) -> bool {
        self.0[0] & 0x02 != 0
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl FromStr for MacAddr {
    type Err = StationError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || StationError::InvalidAddress(format!("'{s}' is not a MAC address"));

        let mut bytes = [0u8; 6];
        let mut index = 0;
        for octet in s.trim().split([':', '-']) {
            if index == 6 || octet.len() != 2 {
                return Err(invalid());
            }
            bytes[index] = u8::from_str_radix(octet, 16).map_err(|_| invalid())?;
            index += 1;
        }

        if index != 6 {
            return Err(invalid());
        }
        Ok(Self(bytes))
    }
}

impl Serialize for MacAddr {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MacAddr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Current hardware address of `ifname`.
pub fn get_mac(ifname: &str) -> Result<MacAddr> {
    ensure_interface(ifname)?;
    let path = Path::new(tools::SYS_CLASS_NET).join(ifname).join("address");
    fs::read_to_string(path)?.parse()
}

/// Sets the hardware address. The link is taken down for the change and
/// brought back up afterwards, even when the change fails.
pub fn set_mac(ifname: &str, mac: &MacAddr) -> Result<()> {
    ensure_interface(ifname)?;
    let text = mac.to_string();

    run_tool(tools::IP, &["link", "set", "dev", ifname, "down"])?;
    let changed = run_tool(tools::IP, &["link", "set", "dev", ifname, "address", &text]);
    if let Err(e) = run_tool(tools::IP, &["link", "set", "dev", ifname, "up"]) {
        warn!("{ifname}: failed to bring link back up: {e}");
    }
    changed?;

    info!("{ifname}: MAC set to {text}");
    Ok(())
}

/// Assigns a random locally administered address and returns it.
pub fn randomize_mac(ifname: &str) -> Result<MacAddr> {
    let mac = MacAddr::random_local();
    set_mac(ifname, &mac)?;
    Ok(mac)
}
