//! core::config::schema
//!
//! User settings schema.
//!
//! # Example
//!
//! ```toml
//! telemetry = "off"
//! interactive = false
//! ```
//!
//! # Validation
//!
//! Unknown keys are rejected when the file is parsed. Values written through
//! `teamsfx config set` are checked against [`SettingKey::allowed_values`]
//! before they reach disk.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ConfigError;

/// Whether usage telemetry is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TelemetrySetting {
    On,
    Off,
}

/// Settings persisted in the user's config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct UserSettings {
    /// Telemetry collection (default: on)
    pub telemetry: Option<TelemetrySetting>,

    /// Default for `--interactive` when the flag is not given (default: true)
    pub interactive: Option<bool>,
}

/// Keys accepted by `teamsfx config get/set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Telemetry,
    Interactive,
}

impl SettingKey {
    pub const ALL: [SettingKey; 2] = [SettingKey::Telemetry, SettingKey::Interactive];

    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::Telemetry => "telemetry",
            SettingKey::Interactive => "interactive",
        }
    }

    pub fn allowed_values(self) -> &'static [&'static str] {
        match self {
            SettingKey::Telemetry => &["on", "off"],
            SettingKey::Interactive => &["true", "false"],
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidValue(format!("unknown setting '{}'", s)))
    }
}

impl UserSettings {
    /// Effective telemetry flag.
    pub fn telemetry_enabled(&self) -> bool {
        self.telemetry != Some(TelemetrySetting::Off)
    }

    /// Effective interactive default.
    pub fn interactive(&self) -> bool {
        self.interactive.unwrap_or(true)
    }

    /// Effective value of `key` as JSON.
    pub fn get(&self, key: SettingKey) -> serde_json::Value {
        match key {
            SettingKey::Telemetry => {
                let on = self.telemetry_enabled();
                serde_json::Value::String(if on { "on" } else { "off" }.to_string())
            }
            SettingKey::Interactive => serde_json::Value::Bool(self.interactive()),
        }
    }

    /// Set `key` from its textual form.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `raw` is not allowed for `key`.
    pub fn set(&mut self, key: SettingKey, raw: &str) -> Result<(), ConfigError> {
        match (key, raw) {
            (SettingKey::Telemetry, "on") => self.telemetry = Some(TelemetrySetting::On),
            (SettingKey::Telemetry, "off") => self.telemetry = Some(TelemetrySetting::Off),
            (SettingKey::Interactive, "true") => self.interactive = Some(true),
            (SettingKey::Interactive, "false") => self.interactive = Some(false),
            _ => {
                return Err(ConfigError::InvalidValue(format!(
                    "'{}' is not a valid value for '{}', must be one of: {}",
                    raw,
                    key,
                    key.allowed_values().join(", ")
                )))
            }
        }
        Ok(())
    }

    /// All effective settings as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for key in SettingKey::ALL {
            map.insert(key.to_string(), self.get(key));
        }
        serde_json::Value::Object(map)
    }
}
