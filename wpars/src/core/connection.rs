//! Connect, disconnect and persistence over the control channel.

use log::{debug, info, warn};

use crate::Result;
use crate::api::models::{ConnectRequest, StationConfig, StationError, StationInfo};
use crate::core::state_wait::{WaitOutcome, wait_for_connection};
use crate::ctrl::{Command, ControlChannel, Reply};
use crate::util::parser::{parse_network_id, parse_status};
use crate::util::validation::validate_request;

/// Queries `STATUS` and parses it.
pub(crate) fn station_info(channel: &mut ControlChannel) -> Result<StationInfo> {
    let raw = channel.send_raw(Command::Status)?;
    parse_status(&raw)
}

/// Sends a configuration command that must be acknowledged with `OK`.
fn expect_ack(channel: &mut ControlChannel, command: Command<'_>) -> Result<()> {
    match channel.send(command)? {
        Reply::Ack => Ok(()),
        reply @ (Reply::Busy | Reply::Failure(_)) => Err(StationError::CommandRejected {
            command: command.to_string(),
            reply: reply.as_text().to_string(),
        }),
        Reply::Data(text) => Err(StationError::UnexpectedReply {
            command: command.to_string(),
            reply: text,
        }),
    }
}

fn add_network(channel: &mut ControlChannel) -> Result<u32> {
    match channel.send(Command::AddNetwork)? {
        Reply::Data(text) => parse_network_id(&text),
        reply => Err(StationError::CommandRejected {
            command: Command::AddNetwork.to_string(),
            reply: reply.as_text().to_string(),
        }),
    }
}

/// Configures a network block for `request` and waits until connected.
///
/// The sequence is `DISCONNECT`, optionally `REMOVE_NETWORK all`,
/// `ADD_NETWORK`, the `SET_NETWORK` calls on the returned id,
/// `ENABLE_NETWORK` and `RECONNECT`. If the station is not connected within
/// `request.timeout_secs`, one `DISCONNECT` abandons the attempt and
/// [`StationError::Timeout`] carries the last observed state.
pub(crate) fn connect(
    channel: &mut ControlChannel,
    request: &ConnectRequest,
    config: &StationConfig,
) -> Result<StationInfo> {
    validate_request(request)?;

    debug!(
        "Connecting {} to '{}' ({})",
        channel.interface(),
        request.ssid,
        if request.is_open() { "open" } else { "psk" }
    );

    // Clears any previous session; the reply does not matter.
    channel.send(Command::Disconnect)?;

    if request.remove_all {
        expect_ack(channel, Command::RemoveAllNetworks)?;
    }

    let id = add_network(channel)?;
    debug!("Added network {id}");

    expect_ack(
        channel,
        Command::SetSsid {
            id,
            ssid: &request.ssid,
        },
    )?;

    if request.is_open() {
        expect_ack(channel, Command::SetOpen { id })?;
    } else {
        expect_ack(
            channel,
            Command::SetPsk {
                id,
                psk: &request.psk,
            },
        )?;
    }

    expect_ack(channel, Command::EnableNetwork(id))?;
    expect_ack(channel, Command::Reconnect)?;

    match wait_for_connection(channel, request.timeout_secs, config.poll_interval)? {
        WaitOutcome::Connected(info) => {
            info!(
                "Connected to '{}' ({}, {} MHz)",
                info.network.ssid, info.network.bssid, info.network.frequency
            );
            Ok(info)
        }
        WaitOutcome::TimedOut(info) => {
            warn!(
                "Connection to '{}' timed out after {}s in state {}",
                request.ssid, request.timeout_secs, info.state
            );
            channel.send(Command::Disconnect)?;
            Err(StationError::Timeout(Box::new(info)))
        }
    }
}

/// Sends `DISCONNECT` and reports the resulting state.
///
/// The disconnect reply is not inspected; whatever `STATUS` says afterwards
/// is returned as data.
pub(crate) fn disconnect(channel: &mut ControlChannel) -> Result<StationInfo> {
    channel.send(Command::Disconnect)?;
    let info = station_info(channel)?;
    info!("Disconnected {} (state: {})", channel.interface(), info.state);
    Ok(info)
}

/// Sends `SAVE_CONFIG`.
///
/// Persistence depends on `update_config=1` in the supplicant
/// configuration, so a refusal is only logged.
pub(crate) fn save_config(channel: &mut ControlChannel) -> Result<()> {
    match channel.send(Command::SaveConfig)? {
        Reply::Ack => debug!("Configuration saved"),
        reply => warn!(
            "SAVE_CONFIG not accepted ({}); is update_config enabled?",
            reply.as_text()
        ),
    }
    Ok(())
}
