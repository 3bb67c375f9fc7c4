//! Project configuration stored in `.resolve/config.yaml`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, Result};
use crate::reminder::{DEFAULT_REMINDER_DAYS, MAX_REMINDER_DAYS};
use crate::storage::DEFAULT_SLOT_KEY;

pub const CONFIG_FILE: &str = "config.yaml";

/// Which key-value backend holds the decision-log slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    File,
    Sqlite,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::File => write!(f, "file"),
            Backend::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "json" => Ok(Backend::File),
            "sqlite" => Ok(Backend::Sqlite),
            _ => Err(format!("Invalid backend: {} (expected file or sqlite)", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: Backend,
    /// Key of the slot holding the serialized collection
    pub slot_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    /// Days between logging a pending decision and the review reminder
    pub days: i64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            days: DEFAULT_REMINDER_DAYS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ResolveConfig {
    pub storage: StorageConfig,
    pub reminders: ReminderConfig,
}

impl ResolveConfig {
    /// Load `config.yaml` from the project directory, falling back to defaults if absent
    pub fn load(resolve_dir: &Path) -> Result<Self> {
        let path = resolve_dir.join(CONFIG_FILE);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        let config: Self = if raw.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&raw)
                .map_err(|e| ResolveError::Config(format!("{}: {}", path.display(), e)))?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, resolve_dir: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(resolve_dir.join(CONFIG_FILE), yaml)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage.slot_key.trim().is_empty() {
            return Err(ResolveError::Config("storage.slot_key must not be empty".to_string()));
        }
        if !(1..=MAX_REMINDER_DAYS).contains(&self.reminders.days) {
            return Err(ResolveError::Config(format!(
                "reminders.days must be between 1 and {} (got {})",
                MAX_REMINDER_DAYS, self.reminders.days
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ResolveConfig::default();
        assert_eq!(config.storage.backend, Backend::File);
        assert_eq!(config.storage.slot_key, "resolve_decision_logs");
        assert_eq!(config.reminders.days, 7);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = ResolveConfig::load(tmp.path()).unwrap();
        assert_eq!(config, ResolveConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "storage:\n  backend: sqlite\n").unwrap();

        let config = ResolveConfig::load(tmp.path()).unwrap();
        assert_eq!(config.storage.backend, Backend::Sqlite);
        assert_eq!(config.storage.slot_key, DEFAULT_SLOT_KEY);
        assert_eq!(config.reminders.days, 7);
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let mut config = ResolveConfig::default();
        config.reminders.days = 14;
        config.save(tmp.path()).unwrap();

        let loaded = ResolveConfig::load(tmp.path()).unwrap();
        assert_eq!(loaded.reminders.days, 14);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "storage: [unclosed\n").unwrap();

        let result = ResolveConfig::load(tmp.path());
        assert!(matches!(result, Err(ResolveError::Config(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "reminders:\n  days: 0\n").unwrap();
        assert!(matches!(
            ResolveConfig::load(tmp.path()),
            Err(ResolveError::Config(_))
        ));

        fs::write(tmp.path().join(CONFIG_FILE), "reminders:\n  days: 100000000\n").unwrap();
        assert!(matches!(
            ResolveConfig::load(tmp.path()),
            Err(ResolveError::Config(ref msg)) if msg.contains("between 1 and 3650")
        ));
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("SQLite".parse::<Backend>().unwrap(), Backend::Sqlite);
        assert_eq!("file".parse::<Backend>().unwrap(), Backend::File);
        assert!("redis".parse::<Backend>().is_err());
    }
}
