//! Scripted supplicant used by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use wpars::{ControlChannel, StationConfig, Transport, WifiStation};

pub type CommandLog = Rc<RefCell<Vec<String>>>;

pub const COMPLETED_STATUS: &str =
    "bssid=aa:bb:cc:dd:ee:ff\nfreq=2437\nssid=Home\nid=0\nmode=station\nkey_mgmt=WPA2-PSK\nwpa_state=COMPLETED\n";
pub const DISCONNECTED_STATUS: &str = "wpa_state=DISCONNECTED\n";

/// Records every command and answers through `respond`.
pub struct Scripted<F> {
    log: CommandLog,
    respond: F,
}

impl<F> Transport for Scripted<F>
where
    F: FnMut(&str) -> io::Result<String>,
{
    fn request(&mut self, command: &str) -> io::Result<String> {
        self.log.borrow_mut().push(command.to_string());
        (self.respond)(command)
    }
}

/// Replies of an idle supplicant with no scan results.
pub fn idle_reply(command: &str) -> io::Result<String> {
    let reply = match command {
        "STATUS" => DISCONNECTED_STATUS,
        "ADD_NETWORK" => "0\n",
        c if c.starts_with("BSS ") => "",
        _ => "OK\n",
    };
    Ok(reply.to_string())
}

pub fn bss_record(index: usize) -> String {
    format!(
        "id={index}\nbssid=02:00:00:00:00:{index:02x}\nfreq=2412\nlevel=-{}\nflags=[WPA2-PSK-CCMP][ESS]\nssid=net{index}\n",
        40 + index
    )
}

/// Station config that never sleeps.
pub fn fast_config() -> StationConfig {
    StationConfig::new().with_poll_interval(Duration::ZERO)
}

pub fn station<F>(respond: F) -> (WifiStation, CommandLog)
where
    F: FnMut(&str) -> io::Result<String> + 'static,
{
    station_with(fast_config(), respond)
}

pub fn station_with<F>(config: StationConfig, respond: F) -> (WifiStation, CommandLog)
where
    F: FnMut(&str) -> io::Result<String> + 'static,
{
    let log: CommandLog = Rc::new(RefCell::new(Vec::new()));
    let transport = Scripted {
        log: log.clone(),
        respond,
    };
    let channel = ControlChannel::from_transport("wlan0", transport);
    (WifiStation::from_channel(channel, config), log)
}

pub fn count(log: &CommandLog, command: &str) -> usize {
    log.borrow().iter().filter(|c| c.as_str() == command).count()
}
