use fs2::FileExt;
use std::fs::File;
use std::path::PathBuf;

/// Lock file guarding one interface's control socket.
pub fn lock_path(ifname: &str) -> PathBuf {
    let mut lock_path = dirs::runtime_dir().unwrap_or(std::env::temp_dir());
    lock_path.push(format!("wpars-{ifname}.lock"));
    lock_path
}

/// Takes an exclusive lock for `ifname`; held until the file is dropped.
pub fn acquire_interface_lock(ifname: &str) -> Result<File, String> {
    let lock_path = lock_path(ifname);

    let file = File::create(&lock_path).map_err(|e| format!("Failed to create lock file: {e}"))?;

    // Exclusive lock; fails if another instance holds it
    file.try_lock_exclusive()
        .map_err(|_| format!("Another wpars instance is already managing {ifname}"))?;

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_path_is_per_interface() {
        assert_ne!(lock_path("wlan0"), lock_path("wlan1"));
        assert!(lock_path("wlan0").ends_with("wpars-wlan0.lock"));
    }

    #[test]
    fn second_lock_is_refused_until_release() {
        let first = acquire_interface_lock("wpt-lock0").unwrap();
        let err = acquire_interface_lock("wpt-lock0").unwrap_err();
        assert!(err.contains("wpt-lock0"));

        drop(first);
        assert!(acquire_interface_lock("wpt-lock0").is_ok());
    }
}
