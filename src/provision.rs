//! Directory provisioning
//!
//! Lock-protected "ensure directory exists" plus the unlocked
//! "create new, fail if present" variant used when provisioning a freshly
//! named collection.

use log::{error, info};
use std::fs;
use std::io;
use std::path::Path;

use crate::error::ProvisionError;
use crate::lock::{self, LockOptions};

/// Ensure a directory exists at `path`
///
/// Serialized per-path through the advisory lock: acquire, lstat, create or
/// no-op, release. A path occupied by anything other than a directory is a
/// terminal conflict and is never replaced. The lock is released on every
/// exit, and a release failure after an otherwise successful provisioning is
/// still reported to the caller.
pub fn ensure_directory(path: &Path, opts: &LockOptions) -> Result<(), ProvisionError> {
    let guard = lock::acquire(path, opts)?;
    let outcome = provision_locked(path);
    match guard.release() {
        Ok(()) => outcome,
        Err(release_err) => {
            if let Err(op_err) = outcome {
                error!(
                    "Lock release failed after provisioning error on {}: {}",
                    path.display(),
                    release_err
                );
                Err(op_err)
            } else {
                Err(release_err.into())
            }
        }
    }
}

/// The critical section of [`ensure_directory`]; caller holds the path lock
fn provision_locked(path: &Path) -> Result<(), ProvisionError> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ProvisionError::NotADirectory(
            path.to_string_lossy().to_string(),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => match fs::create_dir(path) {
            Ok(()) => {
                info!("Created directory {}", path.display());
                Ok(())
            }
            // Another process won the create; accept it if it made a directory
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                if path.is_dir() {
                    Ok(())
                } else {
                    Err(ProvisionError::NotADirectory(
                        path.to_string_lossy().to_string(),
                    ))
                }
            }
            Err(e) => {
                error!("Failed to create directory {}: {}", path.display(), e);
                Err(ProvisionError::IoError(e))
            }
        },
        Err(e) => Err(ProvisionError::IoError(e)),
    }
}

/// Create a directory that must not already exist
///
/// Unlocked: concurrent calls for the same path are collapsed by the
/// atomicity of the underlying directory-create primitive into one winner
/// and n-1 [`ProvisionError::AlreadyExists`] failures.
pub fn create_new(path: &Path) -> Result<(), ProvisionError> {
    match fs::create_dir(path) {
        Ok(()) => {
            info!("Created directory {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(ProvisionError::AlreadyExists(
            path.to_string_lossy().to_string(),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ProvisionError::ParentNotFound(
            path.parent().unwrap_or(path).to_string_lossy().to_string(),
        )),
        Err(e) => {
            error!("Failed to create directory {}: {}", path.display(), e);
            Err(ProvisionError::IoError(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tempfile::TempDir;

    fn opts() -> LockOptions {
        LockOptions {
            wait: std::time::Duration::from_secs(5),
            ..LockOptions::default()
        }
    }

    #[test]
    fn test_ensure_directory_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("uploads");

        ensure_directory(&target, &opts()).unwrap();
        assert!(target.is_dir());
        ensure_directory(&target, &opts()).unwrap();
        assert!(target.is_dir());

        // No lock marker left behind
        assert!(!dir.path().join("uploads.lock").exists());
    }

    #[test]
    fn test_ensure_directory_rejects_file_at_path() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("uploads");
        fs::write(&target, b"occupied").unwrap();

        let err = ensure_directory(&target, &opts()).unwrap_err();
        assert!(matches!(err, ProvisionError::NotADirectory(_)));
        // Conflict is surfaced, never auto-resolved
        assert!(target.is_file());
    }

    #[test]
    fn test_create_new_rejects_existing() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("my-deck");

        create_new(&target).unwrap();
        let err = create_new(&target).unwrap_err();
        assert!(matches!(err, ProvisionError::AlreadyExists(_)));
    }

    #[test]
    fn test_create_new_requires_parent() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("missing").join("my-deck");

        let err = create_new(&target).unwrap_err();
        assert!(matches!(err, ProvisionError::ParentNotFound(_)));
    }

    #[test]
    fn test_concurrent_create_new_same_name_single_winner() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("my-deck");

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let target = target.clone();
                thread::spawn(move || create_new(&target))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let wins = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(ProvisionError::AlreadyExists(_))))
            .count();

        assert_eq!(wins, 1);
        assert_eq!(conflicts, 15);
        assert!(target.is_dir());
    }

    #[test]
    fn test_concurrent_create_new_distinct_names_all_win() {
        let dir = TempDir::new().unwrap();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let target = dir.path().join(format!("deck-{}", i));
                thread::spawn(move || create_new(&target))
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().unwrap();
        }
        for i in 0..16 {
            assert!(dir.path().join(format!("deck-{}", i)).is_dir());
        }
    }

    #[test]
    fn test_concurrent_ensure_directory_same_path() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("uploads");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let target = target.clone();
                thread::spawn(move || ensure_directory(&target, &opts()))
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().unwrap();
        }
        assert!(target.is_dir());
    }
}
