//! IPv4 address inspection and assignment.

use std::fs;
use std::net::Ipv4Addr;
use std::str::FromStr;

use if_addrs::IfAddr;
use log::info;
use serde::Serialize;

use super::mac::{MacAddr, get_mac};
use super::{ensure_interface, run_tool};
use crate::Result;
use crate::api::models::StationError;
use crate::types::constants::tools;

/// An IPv4 address with its netmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ipv4Config {
    pub address: Ipv4Addr,
    pub netmask: Ipv4Addr,
}

impl Ipv4Config {
    /// Netmask used when none is given.
    pub const DEFAULT_NETMASK: Ipv4Addr = Ipv4Addr::new(255, 255, 255, 0);

    /// Builds a config, rejecting non-contiguous netmasks.
    pub fn new(address: Ipv4Addr, netmask: Ipv4Addr) -> Result<Self> {
        let bits = u32::from(netmask);
        if bits.leading_ones() != bits.count_ones() {
            return Err(StationError::InvalidAddress(format!(
                "netmask {netmask} is not contiguous"
            )));
        }
        Ok(Self { address, netmask })
    }

    /// Parses dotted-quad text; `netmask` defaults to `255.255.255.0`.
    pub fn parse(address: &str, netmask: Option<&str>) -> Result<Self> {
        let address = parse_addr(address)?;
        let netmask = match netmask {
            Some(mask) => parse_addr(mask)?,
            None => Self::DEFAULT_NETMASK,
        };
        Self::new(address, netmask)
    }

    pub fn prefix_len(&self) -> u32 {
        u32::from(self.netmask).count_ones()
    }

    /// `address/prefix` as `ip(8)` expects it.
    pub fn cidr(&self) -> String {
        format!("{}/{}", self.address, self.prefix_len())
    }
}

fn parse_addr(text: &str) -> Result<Ipv4Addr> {
    Ipv4Addr::from_str(text.trim())
        .map_err(|_| StationError::InvalidAddress(format!("'{text}' is not an IPv4 address")))
}

/// Address summary of one interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceInfo {
    pub ifname: String,
    pub mac_addr: Option<MacAddr>,
    pub ipv4: Option<Ipv4Addr>,
    pub netmask: Option<Ipv4Addr>,
}

/// Names of all network interfaces, sorted.
pub fn list_interfaces() -> Result<Vec<String>> {
    let mut names = fs::read_dir(tools::SYS_CLASS_NET)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    names.sort();
    Ok(names)
}

/// First IPv4 address of `ifname`, if any.
pub fn get_ipv4(ifname: &str) -> Result<Option<Ipv4Config>> {
    ensure_interface(ifname)?;

    let found = if_addrs::get_if_addrs()?
        .into_iter()
        .filter(|iface| iface.name == ifname)
        .find_map(|iface| match iface.addr {
            IfAddr::V4(v4) => Some(Ipv4Config {
                address: v4.ip,
                netmask: v4.netmask,
            }),
            IfAddr::V6(_) => None,
        });
    Ok(found)
}

/// Replaces the IPv4 addresses of `ifname` with `config` and brings the
/// link up.
pub fn set_ipv4_static(ifname: &str, config: &Ipv4Config) -> Result<()> {
    ensure_interface(ifname)?;
    run_tool(tools::IP, &["-4", "addr", "flush", "dev", ifname])?;
    run_tool(tools::IP, &["addr", "add", &config.cidr(), "dev", ifname])?;
    run_tool(tools::IP, &["link", "set", "dev", ifname, "up"])?;
    info!("{ifname}: set {}", config.cidr());
    Ok(())
}

/// Removes every IPv4 address from `ifname`.
pub fn flush_ipv4(ifname: &str) -> Result<()> {
    ensure_interface(ifname)?;
    run_tool(tools::IP, &["-4", "addr", "flush", "dev", ifname])?;
    info!("{ifname}: IPv4 flushed");
    Ok(())
}

/// MAC and IPv4 address of `ifname`.
pub fn interface_info(ifname: &str) -> Result<InterfaceInfo> {
    let ipv4 = get_ipv4(ifname)?;
    let mac_addr = get_mac(ifname).ok();
    Ok(InterfaceInfo {
        ifname: ifname.to_string(),
        mac_addr,
        ipv4: ipv4.map(|c| c.address),
        netmask: ipv4.map(|c| c.netmask),
    })
}
