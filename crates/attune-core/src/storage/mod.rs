//! Host persistence: TOML settings and the JSON planner state.
//!
//! The scheduling engine never touches these; they exist for hosts such as
//! the CLI that keep tasks and timelines across invocations.

mod config;
pub mod state;

pub use config::CONFIG_FILE_NAME;
pub use state::{StateStore, STATE_FILE_NAME};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/attune[-dev]/` based on ATTUNE_ENV.
///
/// Set ATTUNE_ENV=dev to use the development data directory, or
/// ATTUNE_DATA_DIR to use an explicit directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("ATTUNE_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("ATTUNE_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("attune-dev")
            } else {
                base_dir.join("attune")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
