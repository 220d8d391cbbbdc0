//! Error handling
//!
//! Defines error types for the content manager core.

pub mod types;

pub use types::*;
