//! Content manager facade
//!
//! Ties the provisioning, validation, ledger, and listing modules together
//! behind the operations the web layer calls: folder creation, upload
//! validation, upload recording, and the render listing.

use log::warn;
use std::path::{Path, PathBuf};

use crate::config::ContentConfig;
use crate::error::{ContentError, ProvisionError, ValidationError};
use crate::ledger::{self, LEDGER_FILENAME, UploadLedger};
use crate::listing::{self, ListingSnapshot};
use crate::lock::LockOptions;
use crate::provision;
use crate::validation::{self, SlotRules};

/// Upload category tokens consumed from the web layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Decks,
    Image,
    Video,
    Videoscrubbing,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Decks,
        Category::Image,
        Category::Video,
        Category::Videoscrubbing,
    ];

    /// The literal directory/token name for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Decks => "decks",
            Category::Image => "image",
            Category::Video => "video",
            Category::Videoscrubbing => "videoscrubbing",
        }
    }

    /// Parse a category token from the web layer
    pub fn from_token(token: &str) -> Option<Category> {
        match token {
            "decks" => Some(Category::Decks),
            "image" => Some(Category::Image),
            "video" => Some(Category::Video),
            "videoscrubbing" => Some(Category::Videoscrubbing),
            _ => None,
        }
    }

    /// Whether this category holds named collections rather than flat files
    pub fn is_collection(&self) -> bool {
        matches!(self, Category::Decks | Category::Videoscrubbing)
    }
}

/// Facade over the content tree at a configured upload root
#[derive(Debug)]
pub struct ContentManager {
    upload_root: PathBuf,
    lock_opts: LockOptions,
    slot_rules: SlotRules,
    ledger: UploadLedger,
}

impl ContentManager {
    pub fn new(config: ContentConfig) -> Self {
        let upload_root = config.upload_root_path();
        let lock_opts = config.lock_options();
        let ledger = UploadLedger::new(upload_root.join(LEDGER_FILENAME), lock_opts.clone());
        Self {
            upload_root,
            lock_opts,
            slot_rules: config.slot_rules(),
            ledger,
        }
    }

    pub fn upload_root(&self) -> &Path {
        &self.upload_root
    }

    pub fn ledger(&self) -> &UploadLedger {
        &self.ledger
    }

    /// Base directory for a category
    pub fn category_path(&self, category: Category) -> PathBuf {
        self.upload_root.join(category.as_str())
    }

    /// Directory of a named collection within a category
    pub fn collection_path(&self, category: Category, name: &str) -> PathBuf {
        self.category_path(category).join(name)
    }

    /// Ensure a directory exists, serialized through the path lock
    pub fn ensure_directory(&self, path: &Path) -> Result<(), ProvisionError> {
        provision::ensure_directory(path, &self.lock_opts)
    }

    /// Create a new named deck or videoscrubbing folder
    ///
    /// The name must pass the character-set check and the target must not
    /// already exist; concurrent requests for the same name collapse to one
    /// winner.
    pub fn create_named_folder(&self, category: Category, name: &str) -> Result<(), ContentError> {
        if !category.is_collection() {
            return Err(ValidationError::NotACollection(category.as_str().to_string()).into());
        }
        if !validation::is_valid_name(name) {
            return Err(ValidationError::InvalidName(name.to_string()).into());
        }

        self.ensure_directory(&self.upload_root)?;
        self.ensure_directory(&self.category_path(category))?;
        provision::create_new(&self.collection_path(category, name))?;
        Ok(())
    }

    /// Validate a proposed upload against its category's rules
    ///
    /// Decks require an integer floor slot within the configured bounds;
    /// videoscrubbing folders require a free `forward`/`backward` position.
    /// The flat image and video categories impose no filename constraint.
    pub fn validate_upload(
        &self,
        category: Category,
        filename: &str,
        collection: Option<&str>,
    ) -> Result<(), ContentError> {
        match category {
            Category::Decks => {
                let name = collection.ok_or_else(|| {
                    ValidationError::MissingCollection(category.as_str().to_string())
                })?;
                let deck = self.collection_path(category, name);
                validation::validate_slot(filename, &deck, &self.slot_rules)?;
                Ok(())
            }
            Category::Videoscrubbing => {
                let name = collection.ok_or_else(|| {
                    ValidationError::MissingCollection(category.as_str().to_string())
                })?;
                self.ensure_directory(&self.upload_root)?;
                self.ensure_directory(&self.category_path(category))?;
                validation::validate_pair(filename, &self.collection_path(category, name))?;
                Ok(())
            }
            Category::Image | Category::Video => Ok(()),
        }
    }

    /// Record an upload timestamp for a stored file
    ///
    /// The path should be absolute; it is used verbatim as the ledger key.
    pub fn record_upload(&self, absolute_path: &Path) -> Result<(), ContentError> {
        self.ensure_directory(&self.upload_root)?;
        let key = absolute_path.to_string_lossy().to_string();
        self.ledger.upsert(&key, &ledger::current_timestamp())?;
        Ok(())
    }

    /// Drop the upload record for a file; failures are logged, not surfaced
    pub fn remove_upload_record(&self, absolute_path: &Path) {
        let key = absolute_path.to_string_lossy().to_string();
        if let Err(e) = self.ledger.remove(&key) {
            warn!("Failed to remove upload record for {}: {}", key, e);
        }
    }

    /// Produce the full listing for rendering
    ///
    /// Provisions the upload root, all four category directories, and the
    /// ledger document first, so a fresh tree yields empty listings rather
    /// than errors.
    pub fn list_for_render(&self) -> Result<ListingSnapshot, ContentError> {
        self.ensure_directory(&self.upload_root)?;
        for category in Category::ALL {
            self.ensure_directory(&self.category_path(category))?;
        }
        self.ledger.ensure_exists()?;

        listing::aggregate(
            &self.category_path(Category::Decks),
            &self.category_path(Category::Videoscrubbing),
            &self.category_path(Category::Image),
            &self.category_path(Category::Video),
            &self.ledger,
        )
    }
}
