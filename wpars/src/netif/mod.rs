//! Linux interface helpers: IPv4 addressing, DHCP and MAC addresses.
//!
//! Reads go through sysfs and [`if_addrs`]; changes are made with the
//! `ip(8)` and `dhclient(8)` tools, which must be on `PATH` and usually need
//! root.
//!
//! # Example
//!
//! ```no_run
//! use wpars::netif::{self, AddressMode};
//!
//! # fn example() -> wpars::Result<()> {
//! netif::apply("wlan0", &AddressMode::Dhcp { timeout_secs: 30 })?;
//! if let Some(addr) = netif::get_ipv4("wlan0")? {
//!     println!("{}", addr.cidr());
//! }
//! # Ok(())
//! # }
//! ```

mod address;
mod dhcp;
mod mac;

use std::io;
use std::path::Path;
use std::process::Command;

use log::{debug, info};

pub use address::{
    InterfaceInfo, Ipv4Config, flush_ipv4, get_ipv4, interface_info, list_interfaces,
    set_ipv4_static,
};
pub use dhcp::dhcp_acquire;
pub use mac::{MacAddr, get_mac, randomize_mac, set_mac};

use crate::Result;
use crate::api::models::StationError;
use crate::types::constants::{timeouts, tools};
use crate::util::validation::validate_interface;

/// How an interface gets its IPv4 address after association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressMode {
    /// Lease an address, waiting at most `timeout_secs`.
    Dhcp { timeout_secs: u32 },
    /// Assign a fixed address.
    Static(Ipv4Config),
    /// Remove all IPv4 addresses.
    Flush,
}

impl Default for AddressMode {
    fn default() -> Self {
        Self::Dhcp {
            timeout_secs: timeouts::DEFAULT_DHCP_TIMEOUT_SECS,
        }
    }
}

/// Applies `mode` to `ifname`.
pub fn apply(ifname: &str, mode: &AddressMode) -> Result<()> {
    match mode {
        AddressMode::Dhcp { timeout_secs } => {
            let lease = dhcp_acquire(ifname, *timeout_secs)?;
            info!("{ifname}: leased {}", lease.cidr());
        }
        AddressMode::Static(config) => set_ipv4_static(ifname, config)?,
        AddressMode::Flush => flush_ipv4(ifname)?,
    }
    Ok(())
}

/// Validates the name and checks the interface exists.
pub(crate) fn ensure_interface(ifname: &str) -> Result<()> {
    validate_interface(ifname)?;
    if Path::new(tools::SYS_CLASS_NET).join(ifname).exists() {
        Ok(())
    } else {
        Err(StationError::InterfaceNotFound(ifname.to_string()))
    }
}

/// Runs an external tool, turning a non-zero exit into `ToolFailed`.
pub(crate) fn run_tool(tool: &str, args: &[&str]) -> Result<()> {
    debug!("Running {tool} {}", args.join(" "));

    let output = Command::new(tool).args(args).output().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            StationError::ToolFailed {
                tool: tool.to_string(),
                stderr: "not found on PATH".into(),
            }
        } else {
            StationError::Io(e)
        }
    })?;

    if output.status.success() {
        Ok(())
    } else {
        Err(StationError::ToolFailed {
            tool: tool.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
