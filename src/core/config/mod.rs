//! core::config
//!
//! User settings file loading and writing.
//!
//! # Locations
//!
//! Searched in order:
//! 1. `$TEAMSFX_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/teamsfx/config.toml`
//! 3. `~/.teamsfx/config.toml` (canonical write location)
//!
//! A missing file is not an error; defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use teamsfx::core::config::{SettingKey, SettingsStore};
//!
//! let store = SettingsStore::locate().unwrap();
//! let mut settings = store.load().unwrap();
//! settings.set(SettingKey::Telemetry, "off").unwrap();
//! store.save(&settings).unwrap();
//! ```

pub mod schema;

pub use schema::{SettingKey, TelemetrySetting, UserSettings};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Reads and writes the user settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Find the settings file in the standard locations.
    ///
    /// Returns the first existing candidate, or the canonical location if
    /// none exists yet.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` if no location can be determined.
    pub fn locate() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var("TEAMSFX_CONFIG") {
            return Ok(Self::with_path(PathBuf::from(path)));
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("teamsfx/config.toml");
            if path.exists() {
                return Ok(Self::with_path(path));
            }
        }

        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::with_path(home.join(".teamsfx/config.toml")))
    }

    /// Use a specific settings file.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the settings file; telemetry logs live here too.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Load settings, falling back to defaults when the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<UserSettings, ConfigError> {
        if !self.path.exists() {
            return Ok(UserSettings::default());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| ConfigError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Write settings atomically.
    ///
    /// Creates parent directories if needed and writes through a temp file
    /// that is renamed into place.
    pub fn save(&self, settings: &UserSettings) -> Result<(), ConfigError> {
        let path = self.path.as_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(settings).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }
}
