//! Control channel to a running `wpa_supplicant`.
//!
//! Each channel talks to one interface's control socket with blocking
//! request/reply round-trips. The socket itself sits behind the
//! [`Transport`] trait, so the channel logic can be driven by a scripted
//! peer in tests.
//!
//! # Example
//!
//! ```no_run
//! use wpars::{Command, ControlChannel, Reply};
//!
//! # fn example() -> wpars::Result<()> {
//! let mut channel = ControlChannel::open("wlan0")?;
//! let status = channel.command("STATUS")?;
//! println!("{status}");
//!
//! if let Reply::Busy = channel.send(Command::Scan)? {
//!     println!("scan already running");
//! }
//! channel.close();
//! # Ok(())
//! # }
//! ```

mod command;
mod socket;

use std::io;
use std::path::{Path, PathBuf};

use log::debug;

pub use command::{Command, Reply};
pub use socket::UnixTransport;

use crate::Result;
use crate::api::models::{StationConfig, StationError};
use crate::types::constants::ctrl;
use crate::util::validation::validate_interface;

/// One request/reply exchange with the supplicant.
pub trait Transport {
    /// Sends `command` and returns the raw reply text.
    fn request(&mut self, command: &str) -> io::Result<String>;
}

/// An open control channel bound to one interface.
///
/// The underlying socket is released by [`close`](ControlChannel::close) or
/// when the channel is dropped.
pub struct ControlChannel {
    interface: String,
    transport: Option<Box<dyn Transport>>,
}

impl ControlChannel {
    /// Opens the control socket of `interface` in the default locations.
    pub fn open(interface: &str) -> Result<Self> {
        Self::open_with(interface, &StationConfig::default())
    }

    /// Opens `<dir>/<interface>`.
    pub fn open_in(dir: impl AsRef<Path>, interface: &str) -> Result<Self> {
        let config = StationConfig::default().with_ctrl_dir(dir.as_ref());
        Self::open_with(interface, &config)
    }

    /// Opens the control socket using the directory and command timeout
    /// from `config`.
    pub fn open_with(interface: &str, config: &StationConfig) -> Result<Self> {
        validate_interface(interface)?;

        let dirs: Vec<PathBuf> = match &config.ctrl_dir {
            Some(dir) => vec![dir.clone()],
            None => ctrl::CTRL_DIR_CANDIDATES
                .iter()
                .map(PathBuf::from)
                .collect(),
        };

        let mut checked = Vec::with_capacity(dirs.len());
        for dir in dirs {
            let path = dir.join(interface);
            checked.push(path.display().to_string());

            if !path.exists() {
                debug!("No control socket at {}", path.display());
                continue;
            }

            match UnixTransport::connect(&path, config.command_timeout) {
                Ok(transport) => return Ok(Self::from_transport(interface, transport)),
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::NotFound | io::ErrorKind::ConnectionRefused
                    ) =>
                {
                    debug!("Nobody listening on {}: {e}", path.display());
                }
                Err(e) => return Err(StationError::Io(e)),
            }
        }

        Err(StationError::NotFound {
            interface: interface.to_string(),
            checked: checked.join(", "),
        })
    }

    /// Wraps an already connected transport.
    pub fn from_transport(interface: &str, transport: impl Transport + 'static) -> Self {
        Self {
            interface: interface.to_string(),
            transport: Some(Box::new(transport)),
        }
    }

    /// Sends raw command text and returns the reply untouched.
    ///
    /// Only the command verb is used in logs and errors, since the text may
    /// carry a key.
    pub fn command(&mut self, text: &str) -> Result<String> {
        let verb = text.split_whitespace().next().unwrap_or_default().to_string();
        self.round_trip(text, verb)
    }

    /// Sends a typed command and classifies the reply.
    pub fn send(&mut self, command: Command<'_>) -> Result<Reply> {
        self.round_trip(&command.encode(), command.to_string())
            .map(|raw| Reply::classify(&raw))
    }

    /// Like [`send`](Self::send) but returns the raw reply.
    pub fn send_raw(&mut self, command: Command<'_>) -> Result<String> {
        self.round_trip(&command.encode(), command.to_string())
    }

    fn round_trip(&mut self, wire: &str, shown: String) -> Result<String> {
        let transport = self
            .transport
            .as_mut()
            .ok_or(StationError::ChannelClosed)?;

        debug!("{}: > {shown}", self.interface);
        let reply = transport
            .request(wire)
            .map_err(|source| StationError::CommandFailed {
                command: shown,
                source,
            })?;
        debug!("{}: < {} bytes", self.interface, reply.len());
        Ok(reply)
    }

    /// Releases the socket. Calling it again is a no-op.
    pub fn close(&mut self) {
        if self.transport.take().is_some() {
            debug!("{}: control channel closed", self.interface);
        }
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }
}

impl std::fmt::Debug for ControlChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlChannel")
            .field("interface", &self.interface)
            .field("open", &self.is_open())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Echo {
        seen: Rc<RefCell<Vec<String>>>,
    }

    impl Transport for Echo {
        fn request(&mut self, command: &str) -> io::Result<String> {
            self.seen.borrow_mut().push(command.to_string());
            if command == "BROKEN" {
                return Err(io::Error::from(io::ErrorKind::TimedOut));
            }
            Ok("OK\n".to_string())
        }
    }

    fn channel() -> (ControlChannel, Rc<RefCell<Vec<String>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let echo = Echo { seen: seen.clone() };
        (ControlChannel::from_transport("wlan0", echo), seen)
    }

    #[test]
    fn raw_command_passes_reply_through() {
        let (mut ch, seen) = channel();
        assert_eq!(ch.command("PING").unwrap(), "OK\n");
        assert_eq!(seen.borrow().as_slice(), ["PING"]);
    }

    #[test]
    fn typed_command_is_encoded_and_classified() {
        let (mut ch, seen) = channel();
        let reply = ch.send(Command::SetPsk { id: 0, psk: "secret99" }).unwrap();
        assert_eq!(reply, Reply::Ack);
        assert_eq!(seen.borrow()[0], "SET_NETWORK 0 psk \"secret99\"");
    }

    #[test]
    fn transport_failure_is_command_failed() {
        let (mut ch, _) = channel();
        let err = ch.command("BROKEN").unwrap_err();
        assert!(matches!(err, StationError::CommandFailed { ref command, .. } if command == "BROKEN"));
    }

    #[test]
    fn close_is_idempotent() {
        let (mut ch, seen) = channel();
        assert!(ch.is_open());
        ch.close();
        ch.close();
        assert!(!ch.is_open());
        assert!(matches!(ch.command("STATUS"), Err(StationError::ChannelClosed)));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn open_rejects_bad_interface() {
        assert!(matches!(
            ControlChannel::open("../../etc"),
            Err(StationError::InvalidInterface(_))
        ));
    }

    #[test]
    fn open_missing_socket_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ControlChannel::open_in(dir.path(), "wlan7").unwrap_err();
        match err {
            StationError::NotFound { interface, checked } => {
                assert_eq!(interface, "wlan7");
                assert!(checked.ends_with("wlan7"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
