//! Configuration management for wifictl.
//!
//! Loads configuration from ${WIFICTL_HOME}/config.toml. A missing or
//! unreadable file loads as an empty configuration (no tracked networks, no
//! interface override); the store is rewritten wholesale on every commit.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::store::KnownNetwork;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wireless interface to manage; auto-detected when absent.
    pub interface: Option<String>,

    /// Tracked networks with their priorities and credentials.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<KnownNetwork>,
}

pub mod paths {
    //! Path resolution for wifictl configuration and data directories.
    //!
    //! WIFICTL_HOME resolution order:
    //! 1. WIFICTL_HOME environment variable (if set)
    //! 2. ~/.config/wifictl (default)

    use std::path::PathBuf;

    /// Returns the wifictl home directory.
    pub fn wifictl_home() -> PathBuf {
        if let Ok(home) = std::env::var("WIFICTL_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("wifictl"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        wifictl_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        wifictl_home().join("logs")
    }
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Self {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    ///
    /// A missing file yields the empty default. A file that fails to read or
    /// parse also yields the default: startup must not be blocked on a
    /// corrupt config, so the error only goes to the log.
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable config");
                }
                return Config::default();
            }
        };
        match toml::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring malformed config");
                Config::default()
            }
        }
    }

    /// Writes the full configuration to the default config path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&paths::config_path())
    }

    /// Writes the full configuration to a specific path.
    ///
    /// The file is rewritten wholesale. Uses atomic write (temp file +
    /// rename) to prevent corruption.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("serialize config")?;
        Self::write_config(path, &contents)
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        Config::default().save_to(path)
    }

    /// Writes config content to a file, creating parent directories as needed.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}
