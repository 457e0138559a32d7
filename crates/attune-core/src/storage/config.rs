//! TOML-based settings persistence.
//!
//! Stores the behavioral model:
//! - `[attention]` day-segment attention percentages
//! - `[scheduling]` ordering weights and switches
//! - `[breaks]` break formula inputs
//!
//! Configuration is stored at `~/.config/attune/config.toml`.

use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, CoreError, Result};
use crate::settings::BehaviorConfig;

/// File name of the settings file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

impl BehaviorConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the settings file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, writing defaults there if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed or is out of
    /// range, or if the defaults cannot be written.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: BehaviorConfig =
                    toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(err) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
            .into()),
        }
    }

    /// Load from the data directory or return default.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| {
            CoreError::Config(ConfigError::SaveFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        })?;
        tracing::debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Persist to the data directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Get a value as string by dot-separated key, e.g. `breaks.max_break_duration`.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed or
    /// the result is out of range. `self` is left unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: BehaviorConfig =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default settings");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = BehaviorConfig::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: BehaviorConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert!(toml_str.contains("[scheduling]"));
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = BehaviorConfig::default();
        assert_eq!(cfg.get("attention.morning_peak").as_deref(), Some("85"));
        assert_eq!(cfg.get("scheduling.priority_weight").as_deref(), Some("1.5"));
        assert_eq!(cfg.get("scheduling.adaptive_scheduling").as_deref(), Some("true"));
        assert!(cfg.get("breaks.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = BehaviorConfig::default();
        cfg.set("scheduling.alternate_task_difficulty", "false").unwrap();
        cfg.set("scheduling.difficulty_weight", "0.8").unwrap();
        cfg.set("scheduling.priority_weight", "2").unwrap();
        cfg.set("breaks.max_break_duration", "20").unwrap();
        assert!(!cfg.scheduling.alternate_task_difficulty);
        assert_eq!(cfg.scheduling.difficulty_weight, 0.8);
        assert_eq!(cfg.scheduling.priority_weight, 2.0);
        assert_eq!(cfg.breaks.max_break_duration, 20);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = BehaviorConfig::default();
        let err = cfg.set("breaks.nonexistent_key", "1").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::UnknownKey(_))));
        assert!(cfg.set("breaks", "1").is_err());
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = BehaviorConfig::default();
        assert!(cfg.set("scheduling.adaptive_scheduling", "not_a_bool").is_err());
        assert!(cfg.set("attention.morning_peak", "high").is_err());
        // Integer field cannot take a fraction.
        assert!(cfg.set("attention.morning_peak", "85.5").is_err());
    }

    #[test]
    fn set_rejects_out_of_range_and_keeps_old_value() {
        let mut cfg = BehaviorConfig::default();
        let err = cfg.set("breaks.max_break_duration", "90").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(cfg.breaks.max_break_duration, 15);
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let cfg = BehaviorConfig::load_from(&path).unwrap();
        assert_eq!(cfg, BehaviorConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut cfg = BehaviorConfig::default();
        cfg.set("attention.afternoon_dip", "45").unwrap();
        cfg.save_to(&path).unwrap();
        let loaded = BehaviorConfig::load_from(&path).unwrap();
        assert_eq!(loaded.attention.afternoon_dip, 45);
    }

    #[test]
    fn load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[attention\nmorning_peak = ").unwrap();
        assert!(BehaviorConfig::load_from(&path).is_err());
    }

    #[test]
    fn load_rejects_out_of_range_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[breaks]\nmax_break_duration = 120\n").unwrap();
        assert!(matches!(
            BehaviorConfig::load_from(&path),
            Err(CoreError::Validation(_))
        ));
    }
}
