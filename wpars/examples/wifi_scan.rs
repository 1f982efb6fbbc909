use wpars::WifiStation;

fn main() -> wpars::Result<()> {
    let ifname = std::env::args().nth(1).unwrap_or_else(|| "wlan0".to_string());
    let mut station = WifiStation::open(&ifname)?;

    println!("Scanning for WiFi networks on {ifname}...");
    let networks = station.scan(128)?;

    for net in networks {
        println!("{:30} {} {:>4} dBm  {}", net.ssid, net.bars(), net.level, net.security);
    }

    Ok(())
}
