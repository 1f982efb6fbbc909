//! Control socket tests against a real `UnixDatagram` peer.
//!
//! A fake supplicant is bound at `<tempdir>/<ifname>` and answers from a
//! background thread.

use std::os::unix::net::UnixDatagram;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use wpars::{ControlChannel, StationConfig, StationError, StationState, WifiStation};

const STATUS_REPLY: &[u8] =
    b"bssid=11:22:33:44:55:66\nfreq=2412\nssid=Lab\nkey_mgmt=WPA-PSK\nwpa_state=COMPLETED\n";

/// Answers `rounds` commands and returns them along with the client path.
fn serve(server: UnixDatagram, rounds: usize) -> thread::JoinHandle<(Vec<String>, Option<PathBuf>)> {
    thread::spawn(move || {
        let mut seen = Vec::new();
        let mut client = None;
        let mut buf = [0u8; 4096];

        for _ in 0..rounds {
            let (n, peer) = server.recv_from(&mut buf).unwrap();
            let command = String::from_utf8_lossy(&buf[..n]).into_owned();
            let peer = peer.as_pathname().unwrap().to_path_buf();

            if command == "STATUS" {
                server
                    .send_to(b"<3>CTRL-EVENT-SCAN-STARTED ", &peer)
                    .unwrap();
                server.send_to(STATUS_REPLY, &peer).unwrap();
            } else {
                server.send_to(b"OK\n", &peer).unwrap();
            }

            seen.push(command);
            client = Some(peer);
        }

        (seen, client)
    })
}

#[test]
fn test_round_trip_skips_events() {
    let dir = tempfile::tempdir().unwrap();
    let server = UnixDatagram::bind(dir.path().join("wlan0")).unwrap();
    let handle = serve(server, 2);

    let config = StationConfig::new()
        .with_ctrl_dir(dir.path())
        .with_command_timeout(Duration::from_secs(5));
    let mut station = WifiStation::with_config("wlan0", config).unwrap();

    let info = station.info().unwrap();
    assert_eq!(info.state, StationState::Connected);
    assert_eq!(info.network.ssid, "Lab");
    assert_eq!(info.network.frequency, 2412);

    station.save_config().unwrap();
    station.close();

    let (seen, client) = handle.join().unwrap();
    assert_eq!(seen, ["STATUS", "SAVE_CONFIG"]);

    let client = client.unwrap();
    assert!(!client.exists(), "client socket {client:?} left behind");
}

#[test]
fn test_raw_command_on_channel() {
    let dir = tempfile::tempdir().unwrap();
    let server = UnixDatagram::bind(dir.path().join("wlp3s0")).unwrap();
    let handle = serve(server, 1);

    let mut channel = ControlChannel::open_in(dir.path(), "wlp3s0").unwrap();
    assert_eq!(channel.interface(), "wlp3s0");
    assert_eq!(channel.command("PING").unwrap(), "OK\n");

    drop(channel);
    let (_, client) = handle.join().unwrap();
    assert!(!client.unwrap().exists());
}

#[test]
fn test_missing_socket_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = ControlChannel::open_in(dir.path(), "wlan0").unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(err, StationError::NotFound { .. }));
}

#[test]
fn test_stale_socket_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    drop(UnixDatagram::bind(dir.path().join("wlan0")).unwrap());

    let err = ControlChannel::open_in(dir.path(), "wlan0").unwrap_err();
    assert!(matches!(err, StationError::NotFound { .. }));
}

#[test]
fn test_silent_supplicant_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let _server = UnixDatagram::bind(dir.path().join("wlan0")).unwrap();

    let config = StationConfig::new()
        .with_ctrl_dir(dir.path())
        .with_command_timeout(Duration::from_millis(100));
    let mut station = WifiStation::with_config("wlan0", config).unwrap();

    let err = station.info().unwrap_err();
    assert!(matches!(
        err,
        StationError::CommandFailed { ref command, .. } if command == "STATUS"
    ));
}

#[test]
fn test_invalid_interface_never_touches_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        ControlChannel::open_in(dir.path(), "../wlan0"),
        Err(StationError::InvalidInterface(_))
    ));
}
