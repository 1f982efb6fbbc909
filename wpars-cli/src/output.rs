//! Human-readable and JSON rendering of command results.

use serde::Serialize;
use wpars::netif::InterfaceInfo;
use wpars::{NetworkDetail, StationInfo};

const TABLE_WIDTH: usize = 94;
const NOT_ASSIGNED: &str = "NOT_ASSIGNED";

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string(value)?)
}

fn rule(left: char, fill: char, right: char) -> String {
    let mut line = String::with_capacity((TABLE_WIDTH + 2) * 3);
    line.push(left);
    line.extend(std::iter::repeat_n(fill, TABLE_WIDTH));
    line.push(right);
    line.push('\n');
    line
}

/// Boxed table of scan results.
pub fn scan_table(networks: &[NetworkDetail]) -> String {
    let mut out = rule('╔', '═', '╗');
    out.push_str(&format!(
        "║ {:<17}  {:<32}  {:>4}  {:>8}  {:>6}  {:>9}  {:<4} ║\n",
        "BSSID", "SSID", "CH", "SECURITY", "LEVEL", "FREQUENCY", "BARS"
    ));
    out.push_str(&rule('╟', '─', '╢'));

    for net in networks {
        let channel = net
            .channel()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".into());
        out.push_str(&format!(
            "║ {:<17}  {:<32}  {:>4}  {:>8}  {:>6}  {:>9}  {:<4} ║\n",
            net.bssid,
            net.ssid,
            channel,
            net.security.as_str(),
            net.level,
            net.frequency,
            net.bars()
        ));
    }

    out.push_str(&rule('╚', '═', '╝'));
    out
}

pub fn station_info(info: &StationInfo) -> String {
    if info.is_connected() {
        format!(
            "Status: CONNECTED\nBSSID: {}\nSSID: {}\nSecurity: {}\nFrequency: {}\n",
            info.network.bssid, info.network.ssid, info.network.security, info.network.frequency
        )
    } else {
        "Status: DISCONNECTED\n".to_string()
    }
}

pub fn interface_info(interfaces: &[InterfaceInfo]) -> String {
    let mut out = String::new();
    for iface in interfaces {
        let or_unassigned = |value: Option<String>| value.unwrap_or_else(|| NOT_ASSIGNED.into());
        out.push_str(&format!(
            "Interface: {}\nMAC Addr: {}\nIPv4: {}\nNetmask: {}\n\n",
            iface.ifname,
            or_unassigned(iface.mac_addr.map(|m| m.to_string())),
            or_unassigned(iface.ipv4.map(|a| a.to_string())),
            or_unassigned(iface.netmask.map(|a| a.to_string())),
        ));
    }
    out
}

/// One interface renders as an object, several as an array.
pub fn interface_info_json(interfaces: &[InterfaceInfo]) -> anyhow::Result<String> {
    match interfaces {
        [single] => to_json(single),
        many => to_json(many),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wpars::netif::MacAddr;
    use wpars::{SecurityLabel, StationState};

    fn network() -> NetworkDetail {
        NetworkDetail {
            bssid: "aa:bb:cc:dd:ee:ff".into(),
            ssid: "Office".into(),
            security: SecurityLabel::Wpa2,
            level: -52,
            frequency: 2437,
        }
    }

    #[test]
    fn scan_table_has_frame_and_rows() {
        let table = scan_table(&[network()]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with('╔') && lines[0].ends_with('╗'));
        assert!(lines[1].contains("BSSID") && lines[1].contains("FREQUENCY"));
        assert!(lines[3].contains("Office"));
        assert!(lines[3].contains("WPA2"));
        assert!(lines[3].contains("-52"));
        assert!(lines[4].starts_with('╚'));
    }

    #[test]
    fn empty_scan_table() {
        assert_eq!(scan_table(&[]).lines().count(), 4);
    }

    #[test]
    fn station_info_text() {
        let connected = StationInfo::new(StationState::Connected, network());
        let text = station_info(&connected);
        assert!(text.starts_with("Status: CONNECTED\n"));
        assert!(text.contains("SSID: Office\n"));
        assert!(text.contains("Frequency: 2437\n"));

        let idle = StationInfo::new(StationState::Disconnected, network());
        assert_eq!(station_info(&idle), "Status: DISCONNECTED\n");
    }

    #[test]
    fn interface_info_text_marks_missing_values() {
        let info = InterfaceInfo {
            ifname: "wlan0".into(),
            mac_addr: Some(MacAddr([0x02, 0, 0, 0, 0, 0x01])),
            ipv4: None,
            netmask: None,
        };
        let text = interface_info(&[info]);
        assert!(text.contains("Interface: wlan0\n"));
        assert!(text.contains("MAC Addr: 02:00:00:00:00:01\n"));
        assert!(text.contains("IPv4: NOT_ASSIGNED\n"));
    }

    #[test]
    fn interface_json_shape_depends_on_count() {
        let info = |name: &str| InterfaceInfo {
            ifname: name.into(),
            mac_addr: None,
            ipv4: None,
            netmask: None,
        };
        let one = interface_info_json(&[info("wlan0")]).unwrap();
        assert!(one.starts_with('{'));
        let two = interface_info_json(&[info("lo"), info("wlan0")]).unwrap();
        assert!(two.starts_with('['));
    }

    #[test]
    fn station_json() {
        let idle = StationInfo::new(StationState::Disconnected, network());
        assert_eq!(to_json(&idle).unwrap(), r#"{"status":"disconnected"}"#);
    }
}
