//! Content manager - entry point
//!
//! Provisions the upload tree for the configured root and prints the
//! current listing snapshot as JSON.

use env_logger;
use log::{error, info};

use content_manager::{ContentConfig, ContentManager};

fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let config = match ContentConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Upload root: {}", config.upload_root);
    let manager = ContentManager::new(config);

    match manager.list_for_render() {
        Ok(snapshot) => match serde_json::to_string_pretty(&snapshot) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => {
                error!("Failed to serialize listing: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to list content: {}", e);
            std::process::exit(1);
        }
    }
}
