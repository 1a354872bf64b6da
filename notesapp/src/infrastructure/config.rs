use crate::constants::{DEFAULT_PAGE_TITLE, DEFAULT_ROOT_ID, DEFAULT_STORAGE_KEY};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// TOML configuration for the notes app
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding the storage slots; empty means the platform data dir.
    #[serde(default = "default_dir")]
    pub dir: String,
    #[serde(default = "default_key")]
    pub key: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ViewConfig {
    #[serde(default = "default_root_id")]
    pub root_id: String,
    /// Title of the page rendered by `show`
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_dir() -> String { String::new() }
fn default_key() -> String { DEFAULT_STORAGE_KEY.to_string() }
fn default_root_id() -> String { DEFAULT_ROOT_ID.to_string() }
fn default_title() -> String { DEFAULT_PAGE_TITLE.to_string() }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            key: default_key(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            root_id: default_root_id(),
            title: default_title(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Load from `path` if given, else from the default location if a file
    /// exists there, else fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!(?path, "Loading config from default location");
                Self::load(path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("notesapp").join("config.toml"))
    }

    /// Storage directory: explicit override, then the config value, then the
    /// platform data directory.
    pub fn storage_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = override_dir {
            return Ok(dir.to_path_buf());
        }
        if !self.storage.dir.is_empty() {
            return Ok(PathBuf::from(&self.storage.dir));
        }
        let data = dirs::data_dir().context("Could not find data directory")?;
        Ok(data.join("notesapp"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn given_toml_file_when_loading_then_reads_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("load_test.toml");

        let toml_content = r#"
[storage]
dir = "/var/lib/notes"
key = "work-notes"

[view]
root_id = "notes-root"
title = "Work notes"
"#;
        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load(&config_path).unwrap();

        assert_eq!(config.storage.dir, "/var/lib/notes");
        assert_eq!(config.storage.key, "work-notes");
        assert_eq!(config.view.root_id, "notes-root");
        assert_eq!(config.view.title, "Work notes");
    }

    #[test]
    fn given_partial_toml_when_loading_then_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");

        fs::write(&config_path, "[storage]\ndir = \"/tmp/notes\"\n").unwrap();

        let config = Config::load(&config_path).unwrap();

        // Specified value
        assert_eq!(config.storage.dir, "/tmp/notes");
        // Default values
        assert_eq!(config.storage.key, "notesapp-notes");
        assert_eq!(config.view.root_id, "app");
        assert_eq!(config.view.title, "Notes");
    }

    #[test]
    fn given_nonexistent_file_when_loading_then_returns_error() {
        let result = Config::load("/nonexistent/path/config.toml");

        assert!(result.is_err());
    }

    #[test]
    fn given_explicit_path_when_loading_or_default_then_requires_file() {
        let result = Config::load_or_default(Some(Path::new("/nonexistent/notesapp.toml")));

        assert!(result.is_err());
    }

    #[test]
    fn given_empty_file_when_loading_then_equals_default() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("empty.toml");
        fs::write(&config_path, "").unwrap();

        let config = Config::load(&config_path).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn given_override_when_resolving_storage_dir_then_override_wins() {
        let config = Config {
            storage: StorageConfig {
                dir: "/from/config".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let dir = config.storage_dir(Some(Path::new("/from/flag"))).unwrap();
        assert_eq!(dir, PathBuf::from("/from/flag"));

        let dir = config.storage_dir(None).unwrap();
        assert_eq!(dir, PathBuf::from("/from/config"));
    }
}
