//! Content manager core
//!
//! Concurrent, lock-protected provisioning and validation engine for
//! user-submitted media assets: image decks organized as numbered floors,
//! paired forward/backward video-scrubbing clips, and standalone images and
//! videos, with an upload-timestamp ledger and a directory listing for
//! rendering.

pub mod config;
pub mod error;
pub mod ledger;
pub mod listing;
pub mod lock;
pub mod manager;
pub mod provision;
pub mod validation;

pub use config::ContentConfig;
pub use error::ContentError;
pub use listing::ListingSnapshot;
pub use manager::{Category, ContentManager};
