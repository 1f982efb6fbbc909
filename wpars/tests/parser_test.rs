//! Tests for the public reply parsers.

use wpars::{
    NetworkDetail, SecurityLabel, StationError, StationState, is_hidden, parse_bss,
    parse_network_id, parse_security, parse_status,
};

#[test]
fn test_status_connected_example() {
    let text = "wpa_state=COMPLETED\nssid=MyNet\nbssid=AA:BB:CC:DD:EE:FF\nfreq=2437\nkey_mgmt=WPA2-PSK\n";
    let info = parse_status(text).unwrap();

    assert_eq!(info.state, StationState::Connected);
    assert_eq!(info.network.ssid, "MyNet");
    assert_eq!(info.network.bssid, "AA:BB:CC:DD:EE:FF");
    assert_eq!(info.network.frequency, 2437);
    assert_eq!(info.network.security, SecurityLabel::Wpa2);
}

#[test]
fn test_status_disconnected_example() {
    let info = parse_status("wpa_state=DISCONNECTED\n").unwrap();
    assert_eq!(info.state, StationState::Disconnected);
    assert_eq!(info.network, NetworkDetail::default());
}

#[test]
fn test_status_never_exposes_stale_detail() {
    for state in ["DISCONNECTED", "INACTIVE", "SCANNING", "ASSOCIATING", "GROUP_HANDSHAKE"] {
        let text = format!("ssid=Old\nbssid=aa:aa:aa:aa:aa:aa\nfreq=2412\nwpa_state={state}\n");
        let info = parse_status(&text).unwrap();
        assert!(!info.is_connected());
        assert_eq!(info.network, NetworkDetail::default(), "state {state}");
    }
}

#[test]
fn test_status_unknown_state() {
    assert!(matches!(
        parse_status("wpa_state=INTERFACE_GONE_WEIRD\n"),
        Err(StationError::UnexpectedReply { .. })
    ));
}

#[test]
fn test_security_examples() {
    assert_eq!(parse_security("[WPA2-PSK-CCMP][ESS]"), SecurityLabel::Wpa2);
    assert_eq!(parse_security("[ESS]"), SecurityLabel::None);
    assert_eq!(parse_security("[WPA-EAP-TKIP][ESS]"), SecurityLabel::Wpa);
    assert_eq!(parse_security("[WEP][ESS]"), SecurityLabel::Wep);
}

#[test]
fn test_hidden_examples() {
    assert!(is_hidden("\\x00\\x00\\x00\\x00\\x00"));
    assert!(!is_hidden("MyNet"));
}

#[test]
fn test_bss_end_of_list() {
    assert!(parse_bss("").unwrap().is_none());
    assert!(parse_bss("FAIL\n").unwrap().is_none());
}

#[test]
fn test_malformed_numbers_are_unexpected_replies() {
    let err = parse_bss("bssid=aa:bb:cc:dd:ee:ff\nfreq=2412\nlevel=strong\n").unwrap_err();
    match err {
        StationError::UnexpectedReply { command, reply } => {
            assert_eq!(command, "BSS");
            assert_eq!(reply, "level=strong");
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(matches!(
        parse_bss("bssid=aa:bb:cc:dd:ee:ff\nfreq=\n"),
        Err(StationError::UnexpectedReply { .. })
    ));
    assert!(matches!(
        parse_status("wpa_state=COMPLETED\nfreq=24x7\n"),
        Err(StationError::UnexpectedReply { .. })
    ));
}

#[test]
fn test_bss_full_record() {
    let text = "id=4\nbssid=de:ad:be:ef:00:01\nfreq=2462\nbeacon_int=100\nlevel=-52\nflags=[WPA-PSK-CCMP][WPA2-PSK-CCMP][WPS][ESS]\nssid=Guest \"Lounge\"\n";
    let net = parse_bss(text).unwrap().unwrap();

    assert_eq!(net.bssid, "de:ad:be:ef:00:01");
    assert_eq!(net.frequency, 2462);
    assert_eq!(net.level, -52);
    assert_eq!(net.security, SecurityLabel::Wpa2);
    assert_eq!(net.ssid, "Guest \"Lounge\"");
    assert_eq!(net.channel(), Some(11));
}

#[test]
fn test_network_id() {
    assert_eq!(parse_network_id("12\n").unwrap(), 12);
    assert!(parse_network_id("FAIL\n").is_err());
}
