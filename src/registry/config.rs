//! Registry location and configuration file handling

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use lazy_static::lazy_static;
use log::{debug, LevelFilter};

use crate::srs::errors::{SrsError, SrsResult};

/// Environment variable naming the registry folder
pub const REGISTRY_DIR_ENV: &str = "CRSKIT_REGISTRY_DIR";

/// Registry folder shipped with the crate
const BUILTIN_REGISTRY_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

lazy_static! {
    static ref EXPLICIT_DIR: RwLock<Option<PathBuf>> = RwLock::new(None);
    static ref CONFIG_DIR: RwLock<Option<PathBuf>> = RwLock::new(None);
}

/// Overrides the registry folder for the rest of the process
pub fn set_registry_dir(dir: impl Into<PathBuf>) {
    if let Ok(mut slot) = EXPLICIT_DIR.write() {
        *slot = Some(dir.into());
    }
}

/// Removes an override set with [`set_registry_dir`]
pub fn clear_registry_dir() {
    if let Ok(mut slot) = EXPLICIT_DIR.write() {
        *slot = None;
    }
}

/// Registry folder in effect: explicit override, then the environment
/// variable, then a configuration file, then the built-in folder
pub fn registry_dir() -> PathBuf {
    if let Some(dir) = EXPLICIT_DIR.read().ok().and_then(|d| d.clone()) {
        return dir;
    }
    if let Ok(dir) = std::env::var(REGISTRY_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    if let Some(dir) = CONFIG_DIR.read().ok().and_then(|d| d.clone()) {
        return dir;
    }
    PathBuf::from(BUILTIN_REGISTRY_DIR)
}

/// Settings read from a TOML configuration file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Folder holding the registry tables
    pub registry_dir: Option<PathBuf>,
    /// Log level name
    pub log_level: Option<String>,
}

impl Config {
    /// Parses configuration text
    ///
    /// ```toml
    /// [registry]
    /// dir = "/usr/share/crskit"
    ///
    /// [logging]
    /// level = "info"
    /// ```
    pub fn from_str(content: &str) -> SrsResult<Self> {
        let value: toml::Value = content
            .parse()
            .map_err(|e| SrsError::InvalidConfig(format!("Failed to parse TOML: {}", e)))?;

        let registry_dir = match value.get("registry").and_then(|r| r.get("dir")) {
            Some(dir) => Some(PathBuf::from(dir.as_str().ok_or_else(|| {
                SrsError::InvalidConfig("registry.dir must be a string".to_string())
            })?)),
            None => None,
        };

        let log_level = match value.get("logging").and_then(|l| l.get("level")) {
            Some(level) => {
                let level = level.as_str().ok_or_else(|| {
                    SrsError::InvalidConfig("logging.level must be a string".to_string())
                })?;
                if level.parse::<LevelFilter>().is_err() {
                    return Err(SrsError::InvalidConfig(format!("Unknown log level: {}", level)));
                }
                Some(level.to_string())
            },
            None => None,
        };

        Ok(Config { registry_dir, log_level })
    }

    /// Loads configuration from a file
    pub fn from_file(path: &Path) -> SrsResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Makes the configured registry folder the configuration-level default
    pub fn apply(&self) {
        if let Some(dir) = &self.registry_dir {
            debug!("Registry folder from configuration: {}", dir.display());
            if let Ok(mut slot) = CONFIG_DIR.write() {
                *slot = Some(dir.clone());
            }
        }
    }

    /// Configured log level, if any
    pub fn level_filter(&self) -> Option<LevelFilter> {
        self.log_level.as_deref().and_then(|l| l.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_str() {
        let config = Config::from_str("[registry]\ndir = \"/tmp/reg\"\n[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.registry_dir, Some(PathBuf::from("/tmp/reg")));
        assert_eq!(config.level_filter(), Some(LevelFilter::Debug));
    }

    #[test]
    fn test_config_rejects_bad_values() {
        assert!(matches!(Config::from_str("[registry]\ndir = 3\n"), Err(SrsError::InvalidConfig(_))));
        assert!(matches!(Config::from_str("[logging]\nlevel = \"loud\"\n"), Err(SrsError::InvalidConfig(_))));
        assert!(matches!(Config::from_str("not toml ["), Err(SrsError::InvalidConfig(_))));
        assert_eq!(Config::from_str("").unwrap(), Config::default());
    }
}
