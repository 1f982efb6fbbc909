//! Wi-Fi scanning and scan result collection.
//!
//! `SCAN` only starts a scan; results are read back with `BSS 0`, `BSS 1`,
//! ... until the supplicant returns an empty record.

use log::{debug, warn};
use std::thread;

use crate::Result;
use crate::api::models::{NetworkDetail, StationConfig, StationError};
use crate::ctrl::{Command, ControlChannel, Reply};
use crate::util::parser::parse_bss;

/// Sends `SCAN` until it is acknowledged, pausing between busy replies.
pub(crate) fn request_scan(channel: &mut ControlChannel, config: &StationConfig) -> Result<()> {
    let attempts = config.scan_busy_retries.max(1);
    let mut last = String::new();

    for attempt in 1..=attempts {
        match channel.send(Command::Scan)? {
            Reply::Ack => {
                debug!("Scan requested on {}", channel.interface());
                return Ok(());
            }
            reply => {
                warn!(
                    "SCAN not accepted ({}), attempt {attempt}/{attempts}",
                    reply.as_text()
                );
                last = reply.as_text().to_string();
            }
        }
        if attempt < attempts {
            thread::sleep(config.poll_interval);
        }
    }

    Err(StationError::ScanRejected(last))
}

/// Reads `BSS <n>` records until an empty one.
///
/// Fails with [`StationError::ScanCapacityExceeded`] as soon as a record
/// beyond `capacity` shows up.
pub(crate) fn collect_results(
    channel: &mut ControlChannel,
    capacity: usize,
) -> Result<Vec<NetworkDetail>> {
    let mut networks = Vec::new();

    for index in 0.. {
        let raw = channel.send_raw(Command::Bss(index))?;
        let Some(network) = parse_bss(&raw)? else {
            break;
        };
        if networks.len() >= capacity {
            return Err(StationError::ScanCapacityExceeded(capacity));
        }
        networks.push(network);
    }

    debug!("Collected {} scan results", networks.len());
    Ok(networks)
}

/// One scan-then-collect cycle.
pub(crate) fn scan_once(
    channel: &mut ControlChannel,
    capacity: usize,
    config: &StationConfig,
) -> Result<Vec<NetworkDetail>> {
    request_scan(channel, config)?;
    thread::sleep(config.poll_interval);
    collect_results(channel, capacity)
}

/// Repeats [`scan_once`] while it finds nothing, up to
/// `config.scan_attempts` cycles.
pub(crate) fn scan(
    channel: &mut ControlChannel,
    capacity: usize,
    config: &StationConfig,
) -> Result<Vec<NetworkDetail>> {
    let attempts = config.scan_attempts.max(1);

    for attempt in 1..=attempts {
        let networks = scan_once(channel, capacity, config)?;
        if !networks.is_empty() {
            return Ok(networks);
        }
        debug!("Scan cycle {attempt}/{attempts} found nothing");
        if attempt < attempts {
            thread::sleep(config.poll_interval);
        }
    }

    Ok(Vec::new())
}
