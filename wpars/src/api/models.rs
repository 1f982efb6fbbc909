use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::types::constants::{reply, retries, timeouts};
use crate::util::utils::{bars_from_level, channel_from_freq};

/// Station connection state as observed through `STATUS`.
///
/// The supplicant reports a finer-grained `wpa_state`; the handshake
/// sub-states are folded into [`Connecting`](StationState::Connecting).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StationState {
    /// No usable state was reported.
    #[default]
    Error,
    /// Not associated with any network.
    Disconnected,
    /// The supplicant is scanning for a network to join.
    Scanning,
    /// Authentication, association or key handshake in progress.
    Connecting,
    /// Fully connected (`wpa_state=COMPLETED`).
    Connected,
}

impl StationState {
    /// Maps a supplicant `wpa_state` value.
    ///
    /// Returns `None` for values the station model does not know about.
    pub fn from_wpa_state(value: &str) -> Option<Self> {
        match value.trim() {
            "DISCONNECTED" | "INACTIVE" | "INTERFACE_DISABLED" => Some(Self::Disconnected),
            "SCANNING" => Some(Self::Scanning),
            "AUTHENTICATING" | "ASSOCIATING" | "ASSOCIATED" | "4WAY_HANDSHAKE"
            | "GROUP_HANDSHAKE" => Some(Self::Connecting),
            "COMPLETED" => Some(Self::Connected),
            _ => None,
        }
    }

    /// Returns true once the station reached `Connected`.
    pub fn is_connected(self) -> bool {
        self == Self::Connected
    }
}

impl Display for StationState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Disconnected => write!(f, "disconnected"),
            Self::Scanning => write!(f, "scanning"),
            Self::Connecting => write!(f, "connecting"),
            Self::Connected => write!(f, "connected"),
        }
    }
}

/// Normalized security label of a network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityLabel {
    #[serde(rename = "WPA2")]
    Wpa2,
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    #[default]
    #[serde(rename = "NONE")]
    None,
}

impl SecurityLabel {
    /// Label as printed by the CLI and the JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wpa2 => "WPA2",
            Self::Wpa => "WPA",
            Self::Wep => "WEP",
            Self::None => "NONE",
        }
    }
}

impl Display for SecurityLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A network as described by `STATUS` or `BSS <n>`.
///
/// The SSID is kept exactly as the supplicant printed it, except for
/// hidden networks which carry the `(hidden)` placeholder.
///
/// # Examples
///
/// ```no_run
/// use wpars::WifiStation;
///
/// # fn example() -> wpars::Result<()> {
/// let mut station = WifiStation::open("wlan0")?;
///
/// for net in station.scan(64)? {
///     let band = if net.frequency > 5000 { "5GHz" } else { "2.4GHz" };
///     println!("{} {} {} dBm ({band})", net.bssid, net.ssid, net.level);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDetail {
    /// Access point MAC address (BSSID)
    pub bssid: String,
    /// Network SSID (name)
    pub ssid: String,
    /// Security label derived from the flags / key management
    pub security: SecurityLabel,
    /// Signal level in dBm; 0 when reported by `STATUS`
    pub level: i32,
    /// Frequency in MHz (e.g., 2437 for channel 6)
    pub frequency: u32,
}

impl NetworkDetail {
    /// Channel number derived from the frequency.
    pub fn channel(&self) -> Option<u16> {
        channel_from_freq(self.frequency)
    }

    /// Signal level as a four-character bar.
    pub fn bars(&self) -> &'static str {
        bars_from_level(self.level)
    }

    pub fn is_hidden(&self) -> bool {
        self.ssid == reply::HIDDEN_SSID_LABEL
    }
}

/// Current state of the station plus the network it is connected to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationInfo {
    /// Observed station state
    pub state: StationState,
    /// Connected network; empty unless `state` is `Connected`
    pub network: NetworkDetail,
}

impl StationInfo {
    /// Builds a station info, dropping the detail unless connected.
    pub fn new(state: StationState, network: NetworkDetail) -> Self {
        let network = if state.is_connected() {
            network
        } else {
            NetworkDetail::default()
        };
        Self { state, network }
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }
}

impl Serialize for StationInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if !self.is_connected() {
            let mut s = serializer.serialize_struct("StationInfo", 1)?;
            s.serialize_field("status", "disconnected")?;
            return s.end();
        }

        let mut s = serializer.serialize_struct("StationInfo", 5)?;
        s.serialize_field("status", "connected")?;
        s.serialize_field("bssid", &self.network.bssid)?;
        s.serialize_field("ssid", &self.network.ssid)?;
        s.serialize_field("security", &self.network.security)?;
        s.serialize_field("frequency", &self.network.frequency)?;
        s.end()
    }
}

/// Parameters of a connection attempt.
///
/// An empty `psk` selects an open network (`key_mgmt NONE`).
///
/// # Examples
///
/// ```rust
/// use wpars::ConnectRequest;
///
/// let open = ConnectRequest::new("CoffeeShop");
/// assert!(open.is_open());
///
/// let home = ConnectRequest::new("HomeWiFi")
///     .psk("my_secure_password")
///     .timeout_secs(20)
///     .remove_all(true);
/// assert!(!home.is_open());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectRequest {
    /// Target SSID
    pub ssid: String,
    /// Pre-shared key; empty for open networks
    pub psk: String,
    /// Seconds to wait for `Connected`
    pub timeout_secs: u32,
    /// Remove every stored network before adding this one
    pub remove_all: bool,
}

impl ConnectRequest {
    pub fn new(ssid: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            psk: String::new(),
            timeout_secs: timeouts::DEFAULT_CONNECT_TIMEOUT_SECS,
            remove_all: false,
        }
    }

    #[must_use]
    pub fn psk(mut self, psk: impl Into<String>) -> Self {
        self.psk = psk.into();
        self
    }

    #[must_use]
    pub fn timeout_secs(mut self, secs: u32) -> Self {
        self.timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn remove_all(mut self, remove_all: bool) -> Self {
        self.remove_all = remove_all;
        self
    }

    pub fn is_open(&self) -> bool {
        self.psk.is_empty()
    }
}

impl std::fmt::Debug for ConnectRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectRequest")
            .field("ssid", &self.ssid)
            .field("psk", &if self.psk.is_empty() { "" } else { "<redacted>" })
            .field("timeout_secs", &self.timeout_secs)
            .field("remove_all", &self.remove_all)
            .finish()
    }
}

/// Station behaviour knobs.
///
/// Defaults match the supplicant's usual pacing: one-second polls,
/// five-second command timeouts, ten busy-scan retries and two scan cycles.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use wpars::StationConfig;
///
/// let config = StationConfig::new()
///     .with_ctrl_dir("/run/wpa_supplicant")
///     .with_poll_interval(Duration::from_millis(500))
///     .with_scan_attempts(3);
///
/// assert_eq!(config.scan_attempts, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationConfig {
    /// Control socket directory; `None` probes the usual locations
    pub ctrl_dir: Option<PathBuf>,
    /// Pause between `STATUS` polls and between scan retries; each connect
    /// poll charges one interval against the request timeout
    pub poll_interval: Duration,
    /// Read/write timeout for a single control command
    pub command_timeout: Duration,
    /// How many times `SCAN` is re-sent while the supplicant is busy
    pub scan_busy_retries: u32,
    /// How many scan cycles run while no networks come back
    pub scan_attempts: u32,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            ctrl_dir: None,
            poll_interval: timeouts::poll_interval(),
            command_timeout: timeouts::command_timeout(),
            scan_busy_retries: retries::SCAN_BUSY_MAX_RETRIES,
            scan_attempts: retries::SCAN_CYCLE_ATTEMPTS,
        }
    }
}

impl StationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ctrl_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.ctrl_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_scan_busy_retries(mut self, retries: u32) -> Self {
        self.scan_busy_retries = retries.max(1);
        self
    }

    #[must_use]
    pub fn with_scan_attempts(mut self, attempts: u32) -> Self {
        self.scan_attempts = attempts.max(1);
        self
    }
}

/// Errors returned by station and interface operations.
#[derive(Debug, Error)]
pub enum StationError {
    /// No supplicant is listening on the control socket.
    #[error("no wpa_supplicant control socket for '{interface}' (checked: {checked})")]
    NotFound { interface: String, checked: String },

    /// Sending a command or reading its reply failed.
    #[error("'{command}' command failed: {source}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The control channel was already closed.
    #[error("control channel is closed")]
    ChannelClosed,

    /// SSID is empty or longer than 32 bytes.
    #[error("invalid SSID: {0}")]
    InvalidSsid(String),

    /// PSK is longer than 64 bytes, or 64 bytes but not hexadecimal.
    #[error("invalid PSK: {0}")]
    InvalidPsk(String),

    /// Interface name is empty, too long or contains a path separator.
    #[error("invalid interface name '{0}'")]
    InvalidInterface(String),

    /// Invalid IPv4 address, netmask or MAC address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The station did not reach `Connected` in time.
    #[error("connection timeout (last state: {})", .0.state)]
    Timeout(Box<StationInfo>),

    /// The supplicant answered with something that could not be understood.
    #[error("unexpected reply to '{command}': {reply:?}")]
    UnexpectedReply { command: String, reply: String },

    /// The supplicant refused a configuration command.
    #[error("'{command}' rejected by wpa_supplicant: {reply}")]
    CommandRejected { command: String, reply: String },

    /// `SCAN` never got acknowledged.
    #[error("scan request rejected: {0}")]
    ScanRejected(String),

    /// More networks were reported than the caller allowed.
    #[error("scan returned more than {0} networks")]
    ScanCapacityExceeded(usize),

    /// The interface does not exist.
    #[error("interface '{0}' not found")]
    InterfaceNotFound(String),

    /// No IPv4 address was leased in time.
    #[error("DHCP failed on '{0}'")]
    DhcpFailed(String),

    /// An external tool (`ip`, `dhclient`) exited unsuccessfully.
    #[error("'{tool}' failed: {stderr}")]
    ToolFailed { tool: String, stderr: String },

    /// Other I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StationError {
    /// Last observed station info, for timeouts.
    pub fn last_info(&self) -> Option<&StationInfo> {
        match self {
            Self::Timeout(info) => Some(info.as_ref()),
            _ => None,
        }
    }

    /// Returns true for failures talking to the supplicant itself.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::CommandFailed { .. } | Self::ChannelClosed
        )
    }
}
