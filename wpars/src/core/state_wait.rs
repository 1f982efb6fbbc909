//! Connection state polling.
//!
//! The supplicant has no completion signal on the control socket we use,
//! so progress is observed by re-reading `STATUS` once per poll interval.

use log::debug;
use std::thread;
use std::time::Duration;

use crate::Result;
use crate::api::models::StationInfo;
use crate::core::connection::station_info;
use crate::ctrl::ControlChannel;

/// How a wait for `Connected` ended.
#[derive(Debug)]
pub(crate) enum WaitOutcome {
    Connected(StationInfo),
    /// Budget exhausted; carries the last observed info.
    TimedOut(StationInfo),
}

/// Polls `STATUS` until the station is connected or the budget runs out.
///
/// One poll happens immediately. Each further poll is preceded by one
/// `interval` sleep, which is charged against `timeout_secs`, so the wait
/// lasts at least `timeout_secs` seconds whatever the interval. A zero
/// interval does not sleep and charges one second per poll.
pub(crate) fn wait_for_connection(
    channel: &mut ControlChannel,
    timeout_secs: u32,
    interval: Duration,
) -> Result<WaitOutcome> {
    let budget = Duration::from_secs(u64::from(timeout_secs));
    let step = if interval.is_zero() {
        Duration::from_secs(1)
    } else {
        interval
    };

    let mut info = station_info(channel)?;
    let mut spent = Duration::ZERO;

    while !info.is_connected() && spent < budget {
        thread::sleep(interval);
        spent += step;
        info = station_info(channel)?;
        debug!(
            "Station state: {} ({:?} of {}s spent)",
            info.state, spent, timeout_secs
        );
    }

    if info.is_connected() {
        Ok(WaitOutcome::Connected(info))
    } else {
        Ok(WaitOutcome::TimedOut(info))
    }
}
