//! Unix datagram transport to the supplicant's control socket.

use std::fs;
use std::io;
use std::os::unix::net::UnixDatagram;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, trace};
use rand::{Rng, distributions::Alphanumeric};

use super::Transport;
use crate::types::constants::ctrl;

/// Removes the client-side socket file when dropped.
struct LocalSocketCleanup {
    path: PathBuf,
}

impl Drop for LocalSocketCleanup {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                debug!("Failed to remove {}: {e}", self.path.display());
            }
        }
    }
}

fn local_socket_path(interface: &str) -> PathBuf {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    std::env::temp_dir().join(format!(
        "{}_{interface}_{suffix}",
        ctrl::LOCAL_SOCKET_PREFIX
    ))
}

/// A `UnixDatagram` bound to a unique temporary path and connected to
/// `<ctrl_dir>/<interface>`.
pub struct UnixTransport {
    socket: UnixDatagram,
    remote: PathBuf,
    _cleanup: LocalSocketCleanup,
}

impl UnixTransport {
    /// Binds a client socket and connects it to `remote`.
    ///
    /// A zero `timeout` leaves the socket fully blocking.
    pub fn connect(remote: &Path, timeout: Duration) -> io::Result<Self> {
        let interface = remote
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let local = local_socket_path(&interface);

        let socket = UnixDatagram::bind(&local)?;
        let cleanup = LocalSocketCleanup { path: local };

        let timeout = Some(timeout).filter(|t| !t.is_zero());
        socket.set_read_timeout(timeout)?;
        socket.set_write_timeout(timeout)?;
        socket.connect(remote)?;

        debug!(
            "Control socket {} connected to {}",
            cleanup.path.display(),
            remote.display()
        );

        Ok(Self {
            socket,
            remote: remote.to_path_buf(),
            _cleanup: cleanup,
        })
    }

    /// Path of the supplicant socket.
    pub fn remote(&self) -> &Path {
        &self.remote
    }
}

impl Transport for UnixTransport {
    fn request(&mut self, command: &str) -> io::Result<String> {
        self.socket.send(command.as_bytes())?;

        let mut buf = vec![0u8; ctrl::REPLY_BUF_SIZE];
        for _ in 0..ctrl::MAX_EVENT_SKIPS {
            let n = self.socket.recv(&mut buf)?;
            let reply = String::from_utf8_lossy(&buf[..n]).into_owned();
            if reply.starts_with(ctrl::EVENT_PREFIX) {
                trace!("Skipping event: {}", reply.trim_end());
                continue;
            }
            return Ok(reply);
        }

        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "only unsolicited events received",
        ))
    }
}
