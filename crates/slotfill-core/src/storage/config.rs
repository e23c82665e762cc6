//! TOML-based application configuration.
//!
//! Stores planner preferences:
//! - Default horizon length
//! - Overnight scheduling toggle
//! - Working-hours band used when overnight scheduling is off
//!
//! Configuration is stored at `~/.config/slotfill/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, ValidationError};
use crate::scheduler::SchedulerConfig;
use crate::schedule::DayWindow;

/// Planner configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlannerConfig {
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    /// When set, the day window is 00:00–23:59.
    #[serde(default)]
    pub overnight: bool,
    #[serde(default = "default_day_start")]
    pub day_start: String,
    #[serde(default = "default_day_end")]
    pub day_end: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/slotfill/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerConfig,
}

fn default_horizon_days() -> u32 {
    7
}
fn default_day_start() -> String {
    "08:00".into()
}
fn default_day_end() -> String {
    "20:00".into()
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            overnight: false,
            day_start: default_day_start(),
            day_end: default_day_end(),
        }
    }
}

impl Config {
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
        if parts.peek().is_none() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
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

    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed,
    /// or the resulting config no longer yields a valid day window or a
    /// horizon of at least one day.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.day_window().map_err(|e| invalid(e.to_string()))?;
        if updated.planner.horizon_days == 0 {
            return Err(invalid("horizon must span at least one day".to_string()));
        }
        *self = updated;
        Ok(())
    }

    /// Planning band implied by this config.
    pub fn day_window(&self) -> Result<DayWindow, ValidationError> {
        if self.planner.overnight {
            Ok(DayWindow::FULL_DAY)
        } else {
            DayWindow::parse(&self.planner.day_start, &self.planner.day_end)
        }
    }

    pub fn scheduler_config(&self) -> Result<SchedulerConfig, ValidationError> {
        Ok(SchedulerConfig {
            window: self.day_window()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.planner.horizon_days, 7);
        assert!(!parsed.planner.overnight);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let parsed: Config = toml::from_str("[planner]\novernight = true\n").unwrap();
        assert!(parsed.planner.overnight);
        assert_eq!(parsed.planner.day_start, "08:00");
        assert_eq!(parsed.day_window().unwrap(), DayWindow::FULL_DAY);
    }

    #[test]
    fn get_and_set_by_dot_path() {
        let mut cfg = Config::default();
        assert_eq!(cfg.get("planner.horizon_days").as_deref(), Some("7"));
        assert_eq!(cfg.get("planner.day_end").as_deref(), Some("20:00"));
        assert!(cfg.get("planner").is_none());
        assert!(cfg.get("nope").is_none());

        cfg.set("planner.horizon_days", "3").unwrap();
        cfg.set("planner.overnight", "true").unwrap();
        cfg.set("planner.day_start", "07:30").unwrap();
        assert_eq!(cfg.planner.horizon_days, 3);
        assert!(cfg.planner.overnight);
        assert_eq!(cfg.planner.day_start, "07:30");
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("planner.colour", "blue"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            cfg.set("planner.overnight", "maybe"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.set("planner.day_end", "25:00"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.set("planner.horizon_days", "0"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut changed = cfg.clone();
        changed.set("planner.horizon_days", "14").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().planner.horizon_days, 14);
    }

    #[test]
    fn load_from_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "planner = 5").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
