//! A Rust library for managing Wi-Fi station interfaces through `wpa_supplicant`.
//!
//! This crate talks to a running supplicant over its control socket and
//! provides a blocking API for common station operations:
//!
//! - Reading the current connection state
//! - Connecting to open and WPA/WPA2-PSK networks
//! - Disconnecting and saving the supplicant configuration
//! - Scanning for visible networks
//!
//! The [`netif`] module adds the interface plumbing a station usually needs
//! afterwards: DHCP or static IPv4 addressing and MAC address changes.
//!
//! # Example
//!
//! ```no_run
//! use wpars::{ConnectRequest, WifiStation};
//!
//! # fn example() -> wpars::Result<()> {
//! let mut station = WifiStation::open("wlan0")?;
//!
//! // List visible networks
//! for net in station.scan(64)? {
//!     println!("{} ({} dBm, {})", net.ssid, net.level, net.security);
//! }
//!
//! // Connect to a network
//! let info = station.connect(&ConnectRequest::new("MyNetwork").psk("password123"))?;
//! println!("connected to {}", info.network.bssid);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All operations return `Result<T, StationError>`. Transport problems,
//! rejected input, timeouts and unexpected supplicant replies each have
//! their own variants. A connection timeout carries the last observed
//! [`StationInfo`].
//!
//! # State Polling
//!
//! The supplicant's state is observed, never set: after a connect sequence
//! the station re-reads `STATUS` once per poll interval until it reports
//! `COMPLETED` or the request's timeout runs out. The poll interval and
//! other pacing live in [`StationConfig`].
//!
//! # Logging
//!
//! This crate uses the [`log`](https://docs.rs/log) facade for logging. To see
//! log output, add a logging implementation like `env_logger`. For example:
//!
//! ```no_run,ignore
//! env_logger::init();
//! // ...
//! ```
//!
//! Pre-shared keys are never written to the log.

// Internal implementation modules
mod core;
mod types;
mod util;

// Public API modules
pub mod api;
pub mod ctrl;
pub mod netif;

// Re-exported public API
pub use api::models::{
    ConnectRequest, NetworkDetail, SecurityLabel, StationConfig, StationError, StationInfo,
    StationState,
};
pub use api::station::WifiStation;
pub use ctrl::{Command, ControlChannel, Reply, Transport, UnixTransport};
pub use util::parser::{is_hidden, parse_bss, parse_network_id, parse_security, parse_status};

/// A specialized `Result` type for station operations.
pub type Result<T> = std::result::Result<T, StationError>;
