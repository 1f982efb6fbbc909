use crate::Result;
use crate::api::models::{ConnectRequest, NetworkDetail, StationConfig, StationInfo};
use crate::core::connection::{connect, disconnect, save_config, station_info};
use crate::core::scan::{scan, scan_once};
use crate::ctrl::ControlChannel;

/// High-level interface to one station interface managed by `wpa_supplicant`.
///
/// This is the main entry point of the crate. It owns a [`ControlChannel`]
/// for the interface and runs the connect, disconnect and scan sequences
/// over it. All calls block; the only waits are the configured poll
/// interval sleeps.
///
/// # Creating an Instance
///
/// ```no_run
/// use wpars::WifiStation;
///
/// # fn example() -> wpars::Result<()> {
/// let station = WifiStation::open("wlan0")?;
/// # Ok(())
/// # }
/// ```
///
/// # Examples
///
/// ## Connecting
///
/// ```no_run
/// use wpars::{ConnectRequest, StationError, WifiStation};
///
/// # fn example() -> wpars::Result<()> {
/// let mut station = WifiStation::open("wlan0")?;
///
/// let request = ConnectRequest::new("MyNetwork")
///     .psk("password")
///     .timeout_secs(15);
///
/// match station.connect(&request) {
///     Ok(info) => println!("connected to {} on {} MHz", info.network.ssid, info.network.frequency),
///     Err(StationError::Timeout(last)) => println!("gave up while {}", last.state),
///     Err(e) => return Err(e),
/// }
/// station.save_config()?;
/// # Ok(())
/// # }
/// ```
///
/// ## Scanning
///
/// ```no_run
/// use wpars::WifiStation;
///
/// # fn example() -> wpars::Result<()> {
/// let mut station = WifiStation::open("wlan0")?;
///
/// for net in station.scan(64)? {
///     println!("{} {} {}", net.bssid, net.ssid, net.security);
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Thread Safety
///
/// Every operation takes `&mut self`, so one station is never driven by
/// two callers at once. Open one station per thread if needed.
#[derive(Debug)]
pub struct WifiStation {
    channel: ControlChannel,
    config: StationConfig,
}

impl WifiStation {
    /// Opens the control socket of `interface` with default settings.
    pub fn open(interface: &str) -> Result<Self> {
        Self::with_config(interface, StationConfig::default())
    }

    /// Opens the control socket of `interface` using `config`.
    pub fn with_config(interface: &str, config: StationConfig) -> Result<Self> {
        let channel = ControlChannel::open_with(interface, &config)?;
        Ok(Self { channel, config })
    }

    /// Builds a station over an existing channel.
    pub fn from_channel(channel: ControlChannel, config: StationConfig) -> Self {
        Self { channel, config }
    }

    /// Returns the current station state and connected network.
    pub fn info(&mut self) -> Result<StationInfo> {
        station_info(&mut self.channel)
    }

    /// Connects to the network described by `request`.
    ///
    /// Input is validated before any command is sent. On timeout the
    /// attempt is abandoned with a single `DISCONNECT` and
    /// [`StationError::Timeout`](crate::StationError::Timeout) carries the
    /// last observed state.
    pub fn connect(&mut self, request: &ConnectRequest) -> Result<StationInfo> {
        connect(&mut self.channel, request, &self.config)
    }

    /// Disconnects and returns the state reported afterwards.
    pub fn disconnect(&mut self) -> Result<StationInfo> {
        disconnect(&mut self.channel)
    }

    /// Scans, retrying whole cycles while nothing is found.
    ///
    /// More than `capacity` results is an error rather than a truncation.
    pub fn scan(&mut self, capacity: usize) -> Result<Vec<NetworkDetail>> {
        scan(&mut self.channel, capacity, &self.config)
    }

    /// Runs a single scan-then-collect cycle.
    pub fn scan_once(&mut self, capacity: usize) -> Result<Vec<NetworkDetail>> {
        scan_once(&mut self.channel, capacity, &self.config)
    }

    /// Asks the supplicant to write its configuration file.
    pub fn save_config(&mut self) -> Result<()> {
        save_config(&mut self.channel)
    }

    /// Releases the control socket. Later calls fail with
    /// [`StationError::ChannelClosed`](crate::StationError::ChannelClosed).
    pub fn close(&mut self) {
        self.channel.close();
    }

    pub fn interface(&self) -> &str {
        self.channel.interface()
    }

    pub fn config(&self) -> &StationConfig {
        &self.config
    }
}
