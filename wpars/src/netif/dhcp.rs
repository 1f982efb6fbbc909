//! DHCP lease acquisition through `dhclient`.

use std::thread;

use log::{debug, warn};

use super::address::{Ipv4Config, flush_ipv4, get_ipv4};
use super::{ensure_interface, run_tool};
use crate::Result;
use crate::api::models::StationError;
use crate::types::constants::{timeouts, tools};

/// Releases any old lease, starts `dhclient` in the background and waits
/// up to `timeout_secs` for an IPv4 address to appear.
pub fn dhcp_acquire(ifname: &str, timeout_secs: u32) -> Result<Ipv4Config> {
    ensure_interface(ifname)?;

    if let Err(e) = run_tool(tools::DHCLIENT, &["-x", ifname]) {
        debug!("{ifname}: no previous lease released: {e}");
    }
    flush_ipv4(ifname)?;
    run_tool(tools::DHCLIENT, &["-nw", ifname])?;

    let mut remaining = timeout_secs;
    loop {
        if let Some(lease) = get_ipv4(ifname)? {
            return Ok(lease);
        }
        if remaining == 0 {
            break;
        }
        thread::sleep(timeouts::poll_interval());
        remaining -= 1;
    }

    warn!("{ifname}: no DHCP lease after {timeout_secs}s");
    Err(StationError::DhcpFailed(ifname.to_string()))
}
