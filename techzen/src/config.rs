//! Configuration for the techzen CLI.
//!
//! Loads settings from a `techzen.toml`, searching the current directory,
//! then the user's config directory, then the platform config directory.

use std::path::{Path, PathBuf};

use dirs::{config_dir, home_dir};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TechZenError};

pub const CONFIG_FILE_NAME: &str = "techzen.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub verbose: bool,

    /// Directory `run <path>`/`include`/`run(fn)` resolve relative paths
    /// against when the given path is not itself absolute.
    #[serde(default = "default_search_dir")]
    pub search_dir: String,
}

fn default_search_dir() -> String {
    ".".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            search_dir: default_search_dir(),
        }
    }
}

impl Config {
    /// Searches the current directory, then `~/.config/techzen`, then the
    /// platform config directory; falls back to defaults if none exist.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TechZenError::Config(format!("Configuration file not found: {}", path.display())));
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| TechZenError::Config(format!("Failed to parse configuration: {e}")))
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| TechZenError::Config(format!("Failed to serialize configuration: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    fn check_home_config() -> Option<PathBuf> {
        home_dir().map(|dir| dir.join(".config").join("techzen").join(CONFIG_FILE_NAME)).filter(|p| p.exists())
    }

    fn check_system_config() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("techzen").join(CONFIG_FILE_NAME)).filter(|p| p.exists())
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config().or_else(Self::check_home_config).or_else(Self::check_system_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_sensible_values() {
        let config = Config::default();
        assert!(!config.verbose);
        assert_eq!(config.search_dir, ".");
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("techzen.toml");
        let original = Config {
            verbose: true,
            search_dir: "/scripts".to_string(),
        };
        original.save_to_path(&path).unwrap();
        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(original, loaded);
    }

    #[test]
    fn missing_path_is_an_error() {
        let result = Config::load_from_path(Path::new("/nonexistent/techzen.toml"));
        assert!(result.is_err());
    }
}
