//! Videoscrubbing pair validation
//!
//! A scrubbing folder holds at most one `forward` and one `backward` clip.
//! Position matching is case-insensitive and ignores the extension, the
//! same identity rule decks use for floors.

use std::fs;
use std::path::Path;

use crate::error::ValidationError;
use crate::validation::strip_extension;

const FORWARD: &str = "forward";
const BACKWARD: &str = "backward";

/// Validate that `filename` may join the scrubbing folder at `folder_path`
pub fn validate_pair(filename: &str, folder_path: &Path) -> Result<(), ValidationError> {
    match fs::symlink_metadata(folder_path) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) | Err(_) => {
            return Err(ValidationError::FolderNotFound(
                folder_path.to_string_lossy().to_string(),
            ));
        }
    }

    let lowered = filename.to_lowercase();
    let stem = strip_extension(&lowered);
    if stem != FORWARD && stem != BACKWARD {
        return Err(ValidationError::BadPosition(filename.to_string()));
    }

    for entry in fs::read_dir(folder_path)? {
        let entry = entry?;
        let existing = entry.file_name().to_string_lossy().to_lowercase();
        if strip_extension(&existing) == stem {
            return Err(ValidationError::PositionTaken(stem.to_string()));
        }
    }

    Ok(())
}
