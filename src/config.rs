//! Configuration management
//!
//! Loads content manager settings from an optional `config.toml` with
//! environment overrides, and derives the option structs consumed by the
//! lock and validation modules.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::lock::LockOptions;
use crate::validation::slot::SlotRules;

/// Content manager configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    /// Root directory holding the category trees and the upload ledger
    pub upload_root: String,

    /// Upper bound on waiting for a path lock, in seconds
    pub lock_wait_secs: u64,

    /// Age past which a lock marker is considered abandoned, in seconds
    pub lock_stale_secs: u64,

    /// Inclusive floor bounds for deck uploads
    pub min_floor: i64,
    pub max_floor: i64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            upload_root: "./uploads".to_string(),
            lock_wait_secs: 50,
            lock_stale_secs: 2,
            min_floor: 0,
            max_floor: 25,
        }
    }
}

impl ContentConfig {
    /// Load configuration from `config.toml` (if present) with
    /// `CONTENT_MGR_*` environment overrides on top of the defaults
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = ContentConfig::default();

        let settings = Config::builder()
            .set_default("upload_root", defaults.upload_root)?
            .set_default("lock_wait_secs", defaults.lock_wait_secs)?
            .set_default("lock_stale_secs", defaults.lock_stale_secs)?
            .set_default("min_floor", defaults.min_floor)?
            .set_default("max_floor", defaults.max_floor)?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("CONTENT_MGR"))
            .build()?;

        let config: ContentConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.upload_root.is_empty() {
            return Err(config::ConfigError::Message(
                "upload_root cannot be empty".into(),
            ));
        }

        if self.lock_wait_secs == 0 {
            return Err(config::ConfigError::Message(
                "lock_wait_secs must be greater than 0".into(),
            ));
        }

        if self.min_floor > self.max_floor {
            return Err(config::ConfigError::Message(
                "min_floor must not exceed max_floor".into(),
            ));
        }

        Ok(())
    }

    /// Get the upload root as a path
    pub fn upload_root_path(&self) -> PathBuf {
        PathBuf::from(&self.upload_root)
    }

    /// Lock options derived from the configured wait and staleness bounds
    pub fn lock_options(&self) -> LockOptions {
        LockOptions {
            wait: Duration::from_secs(self.lock_wait_secs),
            stale: Duration::from_secs(self.lock_stale_secs),
            ..LockOptions::default()
        }
    }

    /// Floor bounds for deck slot validation
    pub fn slot_rules(&self) -> SlotRules {
        SlotRules {
            min_floor: self.min_floor,
            max_floor: self.max_floor,
        }
    }
}
