//! Error types
//!
//! Defines domain-specific error types for each module of the content manager.

use std::fmt;
use std::io;

/// Path lock module errors
#[derive(Debug)]
pub enum LockError {
    /// Lock could not be acquired within the configured wait bound
    Timeout(String),
    /// Marker file could not be removed on release
    ReleaseFailed(String, io::Error),
    IoError(io::Error),
}

impl fmt::Display for LockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockError::Timeout(p) => write!(f, "Timed out waiting for lock on: {}", p),
            LockError::ReleaseFailed(p, e) => write!(f, "Failed to release lock on {}: {}", p, e),
            LockError::IoError(e) => write!(f, "Lock IO error: {}", e),
        }
    }
}

impl std::error::Error for LockError {}

impl From<io::Error> for LockError {
    fn from(error: io::Error) -> Self {
        LockError::IoError(error)
    }
}

/// Directory provisioning errors
#[derive(Debug)]
pub enum ProvisionError {
    /// A non-directory occupies a path expected to be a directory
    NotADirectory(String),
    AlreadyExists(String),
    ParentNotFound(String),
    Lock(LockError),
    IoError(io::Error),
}

impl fmt::Display for ProvisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvisionError::NotADirectory(p) => {
                write!(f, "Is a file, not a directory: {}", p)
            }
            ProvisionError::AlreadyExists(p) => write!(f, "Already exists: {}", p),
            ProvisionError::ParentNotFound(p) => write!(f, "Parent directory not found: {}", p),
            ProvisionError::Lock(e) => write!(f, "Lock error: {}", e),
            ProvisionError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ProvisionError {}

impl From<io::Error> for ProvisionError {
    fn from(error: io::Error) -> Self {
        ProvisionError::IoError(error)
    }
}

impl From<LockError> for ProvisionError {
    fn from(error: LockError) -> Self {
        ProvisionError::Lock(error)
    }
}

/// Upload validation errors
#[derive(Debug)]
pub enum ValidationError {
    /// Name fails the character-set check
    InvalidName(String),
    /// Filename stem is not a base-10 integer
    NotInteger(String),
    /// Floor number is outside the accepted bounds
    OutOfRange { floor: i64, min: i64, max: i64 },
    DeckNotFound(String),
    /// A file for this floor already exists
    SlotTaken(i64),
    FolderNotFound(String),
    /// Filename is neither `forward` nor `backward`
    BadPosition(String),
    /// A file for this position already exists
    PositionTaken(String),
    /// Upload targets a collection category but no collection was named
    MissingCollection(String),
    /// Named-folder creation requested for a flat category
    NotACollection(String),
    IoError(io::Error),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidName(n) => write!(f, "Invalid name: {}", n),
            ValidationError::NotInteger(n) => write!(f, "Filename isn't an integer: {}", n),
            ValidationError::OutOfRange { floor, min, max } => write!(
                f,
                "Floor {} is outside of accepted bounds [{}, {}]",
                floor, min, max
            ),
            ValidationError::DeckNotFound(p) => write!(f, "No deck exists at: {}", p),
            ValidationError::SlotTaken(n) => write!(f, "File for floor {} already exists", n),
            ValidationError::FolderNotFound(p) => {
                write!(f, "No videoscrubbing folder exists at: {}", p)
            }
            ValidationError::BadPosition(n) => {
                write!(f, "File name is neither 'forward' nor 'backward': {}", n)
            }
            ValidationError::PositionTaken(n) => {
                write!(f, "File for position '{}' already exists", n)
            }
            ValidationError::MissingCollection(c) => {
                write!(f, "No collection named for category: {}", c)
            }
            ValidationError::NotACollection(c) => {
                write!(f, "Category does not hold named collections: {}", c)
            }
            ValidationError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<io::Error> for ValidationError {
    fn from(error: io::Error) -> Self {
        ValidationError::IoError(error)
    }
}

/// Upload timestamp ledger errors
#[derive(Debug)]
pub enum LedgerError {
    IoError(io::Error),
    /// Backing document is not a flat string-to-string JSON object
    Parse(serde_json::Error),
    Lock(LockError),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::IoError(e) => write!(f, "Ledger IO error: {}", e),
            LedgerError::Parse(e) => write!(f, "Ledger parse error: {}", e),
            LedgerError::Lock(e) => write!(f, "Ledger lock error: {}", e),
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<io::Error> for LedgerError {
    fn from(error: io::Error) -> Self {
        LedgerError::IoError(error)
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(error: serde_json::Error) -> Self {
        LedgerError::Parse(error)
    }
}

impl From<LockError> for LedgerError {
    fn from(error: LockError) -> Self {
        LedgerError::Lock(error)
    }
}

/// General content manager error that encompasses all error types
#[derive(Debug)]
pub enum ContentError {
    Lock(LockError),
    Provision(ProvisionError),
    Validation(ValidationError),
    Ledger(LedgerError),
    IoError(io::Error),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Lock(e) => write!(f, "Lock error: {}", e),
            ContentError::Provision(e) => write!(f, "Provisioning error: {}", e),
            ContentError::Validation(e) => write!(f, "Validation error: {}", e),
            ContentError::Ledger(e) => write!(f, "Ledger error: {}", e),
            ContentError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ContentError {}

impl From<LockError> for ContentError {
    fn from(error: LockError) -> Self {
        ContentError::Lock(error)
    }
}

impl From<ProvisionError> for ContentError {
    fn from(error: ProvisionError) -> Self {
        ContentError::Provision(error)
    }
}

impl From<ValidationError> for ContentError {
    fn from(error: ValidationError) -> Self {
        ContentError::Validation(error)
    }
}

impl From<LedgerError> for ContentError {
    fn from(error: LedgerError) -> Self {
        ContentError::Ledger(error)
    }
}

impl From<io::Error> for ContentError {
    fn from(error: io::Error) -> Self {
        ContentError::IoError(error)
    }
}
