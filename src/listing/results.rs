//! Listing result types
//!
//! Structures handed to the render layer. Timestamp arrays are
//! index-aligned with their file arrays; `None` marks a file the ledger
//! has no record of.

use serde::Serialize;

/// Listing of a collection category (decks or videoscrubbing folders)
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectionListing {
    /// Immediate subdirectory names under the category
    pub names: Vec<String>,
    /// Per-subdirectory file listing, aligned with `names`
    pub files: Vec<Vec<String>>,
    /// Per-subdirectory upload timestamps, aligned with `files`
    pub times: Vec<Vec<Option<String>>>,
}

/// Listing of a flat category (image or video)
#[derive(Debug, Clone, Default, Serialize)]
pub struct FlatListing {
    pub files: Vec<String>,
    /// Upload timestamps aligned with `files`
    pub times: Vec<Option<String>>,
}

/// Complete listing across the four base categories
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListingSnapshot {
    pub decks: CollectionListing,
    pub scrubbing: CollectionListing,
    pub images: FlatListing,
    pub videos: FlatListing,
}
