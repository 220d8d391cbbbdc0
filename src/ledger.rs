//! Upload timestamp ledger
//!
//! A single flat JSON document mapping absolute upload paths to formatted
//! timestamp strings. Every mutation re-reads, re-parses, and rewrites the
//! whole document; a parse failure aborts the mutation before anything is
//! written, so a corrupt document is surfaced loudly rather than overwritten.
//!
//! Mutations serialize through a path lock scoped to the document, so
//! concurrent upserts cannot lose each other's writes. Reads stay unlocked
//! and are best-effort snapshots.

use chrono::{DateTime, Datelike, Local, Timelike};
use log::error;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::LedgerError;
use crate::lock::{self, LockOptions};

/// Ledger document filename under the upload root, kept byte-compatible
/// with existing deployments
pub const LEDGER_FILENAME: &str = "uploadTimes.json";

/// JSON-backed mapping from absolute file path to upload timestamp
#[derive(Debug)]
pub struct UploadLedger {
    path: PathBuf,
    lock_opts: LockOptions,
}

impl UploadLedger {
    pub fn new(path: PathBuf, lock_opts: LockOptions) -> Self {
        Self { path, lock_opts }
    }

    /// Path of the backing JSON document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the backing document as an empty mapping if it is absent
    pub fn ensure_exists(&self) -> Result<(), LedgerError> {
        self.mutate(|_| {})
    }

    /// Set or overwrite the timestamp recorded for `key`
    ///
    /// Keys are stored as the exact bytes the caller constructed, not
    /// canonicalized; callers should pass absolute paths to avoid
    /// unintentional collisions.
    pub fn upsert(&self, key: &str, timestamp: &str) -> Result<(), LedgerError> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), timestamp.to_string());
        })
    }

    /// Delete the entry recorded for `key`, if any
    pub fn remove(&self, key: &str) -> Result<(), LedgerError> {
        self.mutate(|entries| {
            entries.remove(key);
        })
    }

    /// Read the whole mapping; unlocked, best-effort snapshot
    pub fn read_all(&self) -> Result<HashMap<String, String>, LedgerError> {
        self.load()
    }

    /// Read-modify-write cycle over the whole document, under the
    /// document-scoped lock
    fn mutate<F>(&self, apply: F) -> Result<(), LedgerError>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        let guard = lock::acquire(&self.path, &self.lock_opts)?;
        let outcome = self.mutate_locked(apply);
        match guard.release() {
            Ok(()) => outcome,
            Err(release_err) => {
                if outcome.is_err() {
                    error!(
                        "Lock release failed after ledger error on {}: {}",
                        self.path.display(),
                        release_err
                    );
                    outcome
                } else {
                    Err(release_err.into())
                }
            }
        }
    }

    fn mutate_locked<F>(&self, apply: F) -> Result<(), LedgerError>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        let mut entries = self.load()?;
        apply(&mut entries);
        let serialized = serde_json::to_vec(&entries)?;
        fs::write(&self.path, serialized)?;
        Ok(())
    }

    fn load(&self) -> Result<HashMap<String, String>, LedgerError> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                let entries = serde_json::from_slice(&bytes).map_err(|e| {
                    error!("Ledger document {} failed to parse: {}", self.path.display(), e);
                    LedgerError::Parse(e)
                })?;
                Ok(entries)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(LedgerError::IoError(e)),
        }
    }
}

/// Current wall-clock time formatted as `M/D/YYYY  H:MM:SS`
pub fn current_timestamp() -> String {
    format_timestamp(&Local::now())
}

/// Format a timestamp as `M/D/YYYY  H:MM:SS`
///
/// Month, day, and hour are not zero-padded; minutes and seconds are. Two
/// spaces separate date and time, and no timezone is carried. Existing
/// ledger files use exactly this shape, so it must not change.
pub fn format_timestamp(t: &DateTime<Local>) -> String {
    format!(
        "{}/{}/{}  {}:{:02}:{:02}",
        t.month(),
        t.day(),
        t.year(),
        t.hour(),
        t.minute(),
        t.second()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    fn ledger_in(dir: &TempDir) -> UploadLedger {
        UploadLedger::new(dir.path().join(LEDGER_FILENAME), LockOptions::default())
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_in(&dir);

        ledger.upsert("/uploads/image/cat.png", "1/2/2024  3:04:05").unwrap();
        let all = ledger.read_all().unwrap();
        assert_eq!(
            all.get("/uploads/image/cat.png").map(String::as_str),
            Some("1/2/2024  3:04:05")
        );

        ledger.remove("/uploads/image/cat.png").unwrap();
        assert!(!ledger.read_all().unwrap().contains_key("/uploads/image/cat.png"));
    }

    #[test]
    fn test_first_upsert_creates_document() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_in(&dir);
        assert!(!ledger.path().exists());

        ledger.upsert("/a", "t").unwrap();
        assert!(ledger.path().exists());
        assert_eq!(ledger.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_ensure_exists_writes_empty_mapping() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_in(&dir);
        ledger.ensure_exists().unwrap();

        let raw = fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(raw, "{}");

        // Must not clobber existing entries
        ledger.upsert("/a", "t").unwrap();
        ledger.ensure_exists().unwrap();
        assert_eq!(ledger.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_document_fails_loudly_and_is_preserved() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger_in(&dir);
        fs::write(ledger.path(), b"{not json").unwrap();

        assert!(matches!(ledger.upsert("/a", "t"), Err(LedgerError::Parse(_))));
        assert!(matches!(ledger.read_all(), Err(LedgerError::Parse(_))));
        // Failed mutation must not rewrite the document
        assert_eq!(fs::read(ledger.path()).unwrap(), b"{not json");
        // And must not leave the lock held
        assert!(ledger.upsert("/a", "t").is_err());
    }

    #[test]
    fn test_concurrent_upserts_all_land() {
        let dir = TempDir::new().unwrap();
        let ledger = Arc::new(ledger_in(&dir));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || ledger.upsert(&format!("/uploads/image/{}.png", i), "t"))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let all = ledger.read_all().unwrap();
        assert_eq!(all.len(), 8);
        for i in 0..8 {
            assert!(all.contains_key(&format!("/uploads/image/{}.png", i)));
        }
    }

    #[test]
    fn test_timestamp_format() {
        let t = Local.with_ymd_and_hms(2024, 3, 5, 9, 4, 7).unwrap();
        assert_eq!(format_timestamp(&t), "3/5/2024  9:04:07");

        let t = Local.with_ymd_and_hms(2024, 12, 25, 23, 59, 0).unwrap();
        assert_eq!(format_timestamp(&t), "12/25/2024  23:59:00");
    }

    #[test]
    fn test_current_timestamp_shape() {
        let stamp = current_timestamp();
        let (date, time) = stamp.split_once("  ").expect("two-space separator");
        assert_eq!(date.split('/').count(), 3);
        let time_parts: Vec<&str> = time.split(':').collect();
        assert_eq!(time_parts.len(), 3);
        assert_eq!(time_parts[1].len(), 2);
        assert_eq!(time_parts[2].len(), 2);
    }
}
