/// Example demonstrating custom pacing for station operations.
///
/// This shows how to give slow access points more time to associate and how
/// to point the station at a non-default control socket directory.
use std::time::Duration;
use wpars::{ConnectRequest, StationConfig, StationError, WifiStation};

fn main() -> wpars::Result<()> {
    // Poll twice a second and tolerate a sluggish supplicant
    let config = StationConfig::new()
        .with_ctrl_dir("/run/wpa_supplicant")
        .with_poll_interval(Duration::from_millis(500))
        .with_command_timeout(Duration::from_secs(10))
        .with_scan_attempts(4);

    let mut station = WifiStation::with_config("wlan0", config)?;

    println!("Station configured with custom pacing:");
    println!("  Poll interval:   {:?}", station.config().poll_interval);
    println!("  Command timeout: {:?}", station.config().command_timeout);

    // Connect with a 60s budget
    let request = ConnectRequest::new("MyNetwork")
        .psk(std::env::var("WIFI_PASSWORD").unwrap_or_else(|_| "password".to_string()))
        .timeout_secs(60);

    println!("\nConnecting to network...");
    match station.connect(&request) {
        Ok(info) => println!("Connected to {} ({})", info.network.ssid, info.network.bssid),
        Err(StationError::Timeout(last)) => println!("Timed out, last state: {}", last.state),
        Err(e) => return Err(e),
    }

    // You can also use default pacing
    let default_config = StationConfig::default();
    println!("\nDefault station pacing:");
    println!("  Poll interval:   {:?}", default_config.poll_interval);
    println!("  Command timeout: {:?}", default_config.command_timeout);

    Ok(())
}
