//! JSON persistence for the planner.
//!
//! The whole [`Planner`] (tasks, timeline, cursor, last break) is written to
//! `state.json` in the data directory. Settings are not part of the file.

use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::Result;
use crate::planner::Planner;
use crate::settings::BehaviorConfig;

/// File name of the planner state inside the data directory.
pub const STATE_FILE_NAME: &str = "state.json";

/// Reads and writes the planner state file.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Store at the default location in the data directory.
    pub fn open() -> Result<Self> {
        Ok(Self::at(data_dir()?.join(STATE_FILE_NAME)))
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the planner, attaching `settings`.
    ///
    /// A missing file yields an empty planner.
    pub fn load(&self, settings: BehaviorConfig) -> Result<Planner> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let planner: Planner = serde_json::from_str(&content)?;
                Ok(planner.with_settings(settings))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(Planner::new(settings))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Write the planner, replacing any previous state.
    pub fn save(&self, planner: &Planner) -> Result<()> {
        let content = serde_json::to_string_pretty(planner)?;
        // Replaced atomically via rename.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "planner state saved");
        Ok(())
    }

    /// Remove the state file if present.
    pub fn reset(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
