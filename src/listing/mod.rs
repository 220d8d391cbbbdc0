//! Listing aggregation
//!
//! Reads the four category trees, classifies collection subdirectories,
//! applies the numeric file ordering, and joins every listed file with its
//! ledger timestamp in index-aligned order. Reads take no locks; the result
//! is a best-effort snapshot of a filesystem that may be in flux. Any stage
//! failure fails the whole aggregation with no partial result.

pub mod results;

pub use results::{CollectionListing, FlatListing, ListingSnapshot};

use log::{error, info};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::ContentError;
use crate::ledger::UploadLedger;
use crate::validation::parse_int_prefix;

/// Produce the full render listing for the four base category paths
pub fn aggregate(
    decks_path: &Path,
    scrubbing_path: &Path,
    image_path: &Path,
    video_path: &Path,
    ledger: &UploadLedger,
) -> Result<ListingSnapshot, ContentError> {
    let times = ledger.read_all()?;

    let snapshot = ListingSnapshot {
        decks: collection_listing(decks_path, &times)?,
        scrubbing: collection_listing(scrubbing_path, &times)?,
        images: flat_listing(image_path, &times)?,
        videos: flat_listing(video_path, &times)?,
    };

    info!(
        "Aggregated listing: {} decks, {} scrubbing folders, {} images, {} videos",
        snapshot.decks.names.len(),
        snapshot.scrubbing.names.len(),
        snapshot.images.files.len(),
        snapshot.videos.files.len()
    );

    Ok(snapshot)
}

/// List a collection category: subdirectory names plus per-subdirectory
/// sorted files and aligned timestamps
fn collection_listing(
    base: &Path,
    times: &HashMap<String, String>,
) -> Result<CollectionListing, ContentError> {
    let mut listing = CollectionListing::default();

    for entry in read_dir_logged(base)? {
        let entry = entry.map_err(ContentError::IoError)?;
        let name = entry.file_name().to_string_lossy().to_string();
        // lstat classification: symlinks are not collections
        let meta = fs::symlink_metadata(entry.path())?;
        if meta.is_dir() {
            listing.names.push(name);
        }
    }

    for name in &listing.names {
        let dir = base.join(name);
        let mut files = Vec::new();
        for entry in read_dir_logged(&dir)? {
            let entry = entry.map_err(ContentError::IoError)?;
            files.push(entry.file_name().to_string_lossy().to_string());
        }
        sort_numeric(&mut files);

        let file_times = copy_times(&files, times, &dir);
        listing.files.push(files);
        listing.times.push(file_times);
    }

    Ok(listing)
}

/// List a flat category: filenames and aligned timestamps, original order
fn flat_listing(base: &Path, times: &HashMap<String, String>) -> Result<FlatListing, ContentError> {
    let mut files = Vec::new();
    for entry in read_dir_logged(base)? {
        let entry = entry.map_err(ContentError::IoError)?;
        files.push(entry.file_name().to_string_lossy().to_string());
    }

    let file_times = copy_times(&files, times, base);
    Ok(FlatListing {
        files,
        times: file_times,
    })
}

fn read_dir_logged(path: &Path) -> Result<fs::ReadDir, ContentError> {
    fs::read_dir(path).map_err(|e| {
        error!("Failed to read directory {}: {}", path.display(), e);
        ContentError::IoError(e)
    })
}

/// Look up each filename's ledger entry by reconstructing the absolute path
/// convention used at upload time, keeping index alignment
fn copy_times(
    files: &[String],
    times: &HashMap<String, String>,
    dir: &Path,
) -> Vec<Option<String>> {
    files
        .iter()
        .map(|f| {
            let key = dir.join(f).to_string_lossy().to_string();
            times.get(&key).cloned()
        })
        .collect()
}

/// Numeric ordering for collection file listings
///
/// Only entries whose filename carries a leading integer prefix take part:
/// they are sorted ascending among themselves while every other entry keeps
/// its original index. The pinning of non-numeric entries is a deliberately
/// weak ordering that existing render output depends on; do not generalize
/// it into a full stable sort.
pub(crate) fn sort_numeric(entries: &mut [String]) {
    let mut slots = Vec::new();
    let mut numeric = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        if let Some(n) = parse_int_prefix(entry) {
            slots.push(i);
            numeric.push((n, entry.clone()));
        }
    }
    numeric.sort_by_key(|(n, _)| *n);
    for (slot, (_, value)) in slots.into_iter().zip(numeric) {
        entries[slot] = value;
    }
}
