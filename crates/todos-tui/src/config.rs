//! Configuration file handling.
//!
//! Reads from `~/.config/todos/todos.toml`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the todo snapshot.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Key the snapshot is stored under (file `<key>.json` in `data_dir`).
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("todos"))
        .unwrap_or_else(|| PathBuf::from(".todos"))
}

fn default_storage_key() -> String {
    todos_core::DEFAULT_KEY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
        }
    }
}

impl Config {
    /// Load configuration from the config file.
    ///
    /// If `custom_path` is provided, load from that path.
    /// Otherwise, load from the default XDG config location.
    /// Creates a default config file if it doesn't exist (only for default path).
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self> {
        let is_custom = custom_path.is_some();
        let config_path = match custom_path {
            Some(path) => path,
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            if is_custom {
                anyhow::bail!("Config file not found: {}", config_path.display());
            }
            let config = Config::default();
            config.save_to(&config_path)?;
            tracing::info!("Created default config: {:?}", config);
            return Ok(config);
        }

        let config = Self::read(&config_path)?;
        tracing::info!("Loaded config from {}: {:?}", config_path.display(), config);
        Ok(config)
    }

    /// Parse a config file.
    pub fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// The storage key becomes a file name inside `data_dir`, so it must not
    /// be able to point anywhere else.
    pub fn validate(&self) -> Result<()> {
        let key = self.storage_key.as_str();
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
            anyhow::bail!("Invalid storage_key {:?}: must be a plain file name", key);
        }
        Ok(())
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Get the path to the config file.
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("todos").join("todos.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_custom_path_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = Config::load(Some(tmp.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("todos.toml");
        std::fs::write(&path, "data_dir = \"/tmp/my-todos\"\n").unwrap();

        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/my-todos"));
        assert_eq!(config.storage_key, "todos");
    }

    #[test]
    fn save_then_read_keeps_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("todos.toml");
        let config = Config {
            data_dir: tmp.path().join("data"),
            storage_key: "work".to_string(),
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::read(&path).unwrap(), config);
    }

    #[test]
    fn storage_key_cannot_leave_data_dir() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("todos.toml");

        for key in ["../x", "a/b", "a\\b", "..", ""] {
            std::fs::write(&path, format!("storage_key = {key:?}\n")).unwrap();
            let err = Config::read(&path).unwrap_err();
            assert!(err.to_string().contains("Invalid storage_key"), "key {key:?}");
        }

        std::fs::write(&path, "storage_key = \"work-todos\"\n").unwrap();
        assert_eq!(Config::read(&path).unwrap().storage_key, "work-todos");
    }

    #[test]
    fn invalid_toml_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.toml");
        std::fs::write(&path, "storage_key = [").unwrap();

        let err = Config::read(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
