//! Constants for the wpa_supplicant control interface.
//!
//! These values mirror what the supplicant and the kernel accept: protocol
//! length limits, control socket locations, reply tokens, and the pacing
//! used while waiting on the daemon.

/// Protocol-defined length limits (bytes).
pub mod limits {
    pub const SSID_MAX_LEN: usize = 32;
    pub const PSK_MAX_LEN: usize = 64;
    /// A key of exactly this length is a raw 256-bit hex PSK, not a passphrase.
    pub const PSK_HEX_LEN: usize = 64;
    /// `IFNAMSIZ` minus the terminating NUL.
    pub const IFNAME_MAX_LEN: usize = 15;
}

/// Control socket constants.
pub mod ctrl {
    /// Directories probed for `<dir>/<ifname>` when none is configured.
    pub const CTRL_DIR_CANDIDATES: [&str; 2] = ["/var/run/wpa_supplicant", "/run/wpa_supplicant"];

    /// Prefix of the client-side socket created in the temp directory.
    pub const LOCAL_SOCKET_PREFIX: &str = "wpars_ctrl";

    /// Largest reply we accept in one datagram.
    pub const REPLY_BUF_SIZE: usize = 65535;

    /// Unsolicited event messages are prefixed with `<level>`.
    pub const EVENT_PREFIX: char = '<';

    /// Datagrams read per command before giving up on events.
    pub const MAX_EVENT_SKIPS: usize = 8;
}

/// Reply tokens and SSID markers.
pub mod reply {
    pub const OK: &str = "OK";
    pub const FAIL: &str = "FAIL";
    pub const FAIL_BUSY: &str = "FAIL-BUSY";

    /// wpa_supplicant prints NUL bytes of hidden SSIDs as `\x00`.
    pub const HIDDEN_SSID_MARKER: &str = "\\x00";
    pub const HIDDEN_SSID_LABEL: &str = "(hidden)";
}

/// Timeout and pacing constants.
pub mod timeouts {
    use std::time::Duration;

    const POLL_INTERVAL_SECS: u64 = 1;
    const COMMAND_TIMEOUT_SECS: u64 = 5;

    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u32 = 10;
    pub const DEFAULT_DHCP_TIMEOUT_SECS: u32 = 30;

    /// Pause between `STATUS` polls and scan retries.
    pub fn poll_interval() -> Duration {
        Duration::from_secs(POLL_INTERVAL_SECS)
    }

    /// Read/write timeout for one control command.
    pub fn command_timeout() -> Duration {
        Duration::from_secs(COMMAND_TIMEOUT_SECS)
    }
}

/// Retry count constants
pub mod retries {
    /// `SCAN` re-sends while the supplicant answers `FAIL-BUSY`.
    pub const SCAN_BUSY_MAX_RETRIES: u32 = 10;
    /// Full scan-then-collect cycles while nothing is found.
    pub const SCAN_CYCLE_ATTEMPTS: u32 = 2;
}

/// WiFi frequency constants (MHz)
pub mod frequency {
    pub const BAND_2_4_START: u32 = 2412;
    pub const BAND_2_4_END: u32 = 2472;
    pub const BAND_2_4_CH14: u32 = 2484;
    pub const BAND_5_START: u32 = 5150;
    pub const BAND_5_END: u32 = 5925;
    pub const BAND_6_START: u32 = 5955;
    pub const BAND_6_END: u32 = 7115;
    pub const CHANNEL_SPACING: u32 = 5;
    /// Channel `n` sits at `BASE + 5 * n` within each band.
    pub const BAND_2_4_BASE: u32 = 2407;
    pub const BAND_5_BASE: u32 = 5000;
    pub const BAND_6_BASE: u32 = 5950;
}

/// Signal level thresholds (dBm) for the bar display
pub mod signal_level {
    pub const BAR_4_MIN: i32 = -55;
    pub const BAR_3_MIN: i32 = -67;
    pub const BAR_2_MIN: i32 = -78;
}

/// External tools used by the interface helpers.
pub mod tools {
    pub const IP: &str = "ip";
    pub const DHCLIENT: &str = "dhclient";
    pub const SYS_CLASS_NET: &str = "/sys/class/net";
}
