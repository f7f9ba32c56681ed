//! config command - Read or change user settings

use anyhow::Result;

use crate::core::config::{ConfigError, SettingKey, SettingsStore, UserSettings};
use crate::core::{CliContext, FxError, CLI_SOURCE};
use crate::engine::format_option_name;
use crate::ui::output;

/// Print one setting, or every setting as JSON when no key is given.
pub fn get(store: &SettingsStore, ctx: &CliContext<'_>) -> Result<()> {
    let settings = load(store)?;

    match ctx.argument("option") {
        Some(raw) => {
            let key = parse_key(ctx, raw)?;
            match settings.get(key) {
                serde_json::Value::String(s) => output::info(s),
                other => output::info(other),
            }
        }
        None => output::info(serde_json::to_string_pretty(&settings.to_json())?),
    }
    Ok(())
}

/// Change one setting and write the file back.
pub fn set(store: &SettingsStore, ctx: &CliContext<'_>) -> Result<()> {
    let raw_key = ctx.argument("option").unwrap_or_default();
    let raw_value = ctx.argument("value").unwrap_or_default();
    let key = parse_key(ctx, raw_key)?;

    let mut settings = load(store)?;
    settings.set(key, raw_value).map_err(|err| match err {
        ConfigError::InvalidValue(reason) => {
            FxError::input_validation(&display_name(ctx, "value"), &reason)
        }
        other => config_error(other),
    })?;
    store.save(&settings).map_err(config_error)?;

    tracing::info!(path = %store.path().display(), key = %key, "saved user settings");
    output::info("Configure user settings successful.");
    Ok(())
}

fn load(store: &SettingsStore) -> Result<UserSettings, FxError> {
    store.load().map_err(config_error)
}

fn parse_key(ctx: &CliContext<'_>, raw: &str) -> Result<SettingKey, FxError> {
    raw.parse::<SettingKey>()
        .map_err(|err| FxError::input_validation(&display_name(ctx, "option"), &err.to_string()))
}

fn display_name(ctx: &CliContext<'_>, argument: &str) -> String {
    ctx.command
        .arguments
        .iter()
        .find(|a| a.name == argument)
        .map(|a| format_option_name(a, true))
        .unwrap_or_else(|| format!("<{}>", argument))
}

fn config_error(err: ConfigError) -> FxError {
    match err {
        ConfigError::ParseError { .. } => {
            FxError::user(CLI_SOURCE, "InvalidConfigFileError", err.to_string())
        }
        ConfigError::InvalidValue(_) => {
            FxError::user(CLI_SOURCE, "InvalidConfigValueError", err.to_string())
        }
        ConfigError::ReadError { .. } | ConfigError::WriteError { .. } | ConfigError::NoHomeDir => {
            FxError::system(CLI_SOURCE, "ConfigFileError", err.to_string())
        }
    }
}
