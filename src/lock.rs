//! Path locks
//!
//! Advisory, file-based mutual exclusion keyed by a directory path. A lock
//! for `<path>` is held by whoever owns the marker file `<path>.lock`;
//! acquisition polls with a bounded wait and forcibly reclaims markers left
//! behind by dead holders once they pass the staleness threshold.

use log::{info, warn};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::LockError;

/// Tuning knobs for lock acquisition
#[derive(Debug, Clone)]
pub struct LockOptions {
    /// Upper bound on the total time spent waiting for a contended lock
    pub wait: Duration,
    /// Age past which an existing marker is treated as abandoned
    pub stale: Duration,
    /// Sleep between acquisition attempts on a contended lock
    pub poll: Duration,
}

impl Default for LockOptions {
    fn default() -> Self {
        Self {
            wait: Duration::from_secs(50),
            stale: Duration::from_secs(2),
            poll: Duration::from_millis(100),
        }
    }
}

/// A held path lock; releasing removes the marker file.
///
/// Dropping an unreleased guard removes the marker on a best-effort basis so
/// an early return cannot leave the path dead-locked, but callers that need
/// to surface release failures must call [`LockGuard::release`].
#[derive(Debug)]
pub struct LockGuard {
    marker: PathBuf,
    released: bool,
}

impl LockGuard {
    /// Release the lock, removing its marker file
    pub fn release(mut self) -> Result<(), LockError> {
        self.released = true;
        match fs::remove_file(&self.marker) {
            Ok(()) => Ok(()),
            // Already reclaimed as stale by another caller
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LockError::ReleaseFailed(
                self.marker.to_string_lossy().to_string(),
                e,
            )),
        }
    }

    /// Path of the marker file backing this lock
    pub fn marker_path(&self) -> &Path {
        &self.marker
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if !self.released {
            if let Err(e) = fs::remove_file(&self.marker) {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!(
                        "Failed to remove lock marker {} on drop: {}",
                        self.marker.display(),
                        e
                    );
                }
            }
        }
    }
}

/// Acquire the advisory lock for `path`
///
/// Atomically creates `<path>.lock`; if the marker already exists the call
/// polls until it can be created, reclaiming markers older than
/// `opts.stale`, and fails with [`LockError::Timeout`] once `opts.wait` has
/// elapsed. A caller that times out holds nothing.
pub fn acquire(path: &Path, opts: &LockOptions) -> Result<LockGuard, LockError> {
    let marker = marker_path(path);
    let started = Instant::now();

    loop {
        match OpenOptions::new().write(true).create_new(true).open(&marker) {
            Ok(_) => {
                return Ok(LockGuard {
                    marker,
                    released: false,
                });
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                if marker_is_stale(&marker, opts.stale)? {
                    info!("Reclaiming stale lock marker {}", marker.display());
                    match fs::remove_file(&marker) {
                        Ok(()) => continue,
                        // Lost the reclaim race to another caller
                        Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                        Err(e) => return Err(LockError::IoError(e)),
                    }
                }

                if started.elapsed() >= opts.wait {
                    return Err(LockError::Timeout(path.to_string_lossy().to_string()));
                }
                thread::sleep(opts.poll);
            }
            Err(e) => return Err(LockError::IoError(e)),
        }
    }
}

/// Marker file path for a locked path: `<path>.lock`
fn marker_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".lock");
    PathBuf::from(os)
}

fn marker_is_stale(marker: &Path, stale: Duration) -> Result<bool, LockError> {
    match fs::metadata(marker) {
        Ok(meta) => {
            let age = meta
                .modified()
                .ok()
                .and_then(|mtime| mtime.elapsed().ok())
                .unwrap_or(Duration::ZERO);
            Ok(age > stale)
        }
        // Holder released between our create attempt and this stat
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(LockError::IoError(e)),
    }
}
