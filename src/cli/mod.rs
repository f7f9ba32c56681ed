//! cli
//!
//! Command-line interface layer for teamsfx.
//!
//! # Responsibilities
//!
//! - Load user settings and set up telemetry
//! - Build the command tree
//! - Hand argv to the [`crate::engine`]
//!
//! # Architecture
//!
//! The CLI layer is thin. Argument parsing, validation and error reporting
//! all happen in the engine; this module only wires the pieces together.

pub mod commands;

use std::sync::Arc;

use crate::core::config::{SettingsStore, UserSettings};
use crate::engine::{CliEngine, ExitStatus};
use crate::telemetry::{CliTelemetry, FileTelemetryReporter};
use crate::ui::output;

use commands::{root_command, Toolkit};

/// Run the CLI application.
///
/// `args` excludes the program name. This is the entry point called from
/// `main.rs`.
pub async fn run(args: Vec<String>) -> ExitStatus {
    let store = match SettingsStore::locate() {
        Ok(store) => store,
        Err(err) => {
            output::warn(&err);
            let engine = CliEngine::new(UserSettings::default(), CliTelemetry::disabled());
            let fallback = SettingsStore::with_path(std::env::temp_dir().join("teamsfx-config.toml"));
            return engine.start(&root_command(), &args, &Toolkit::new(fallback)).await;
        }
    };

    let settings = match store.load() {
        Ok(settings) => settings,
        Err(err) => {
            output::warn(format!("{}; using default settings", err));
            UserSettings::default()
        }
    };

    let telemetry = if settings.telemetry_enabled() {
        CliTelemetry::new(Arc::new(FileTelemetryReporter::in_dir(store.dir())))
    } else {
        CliTelemetry::disabled()
    };

    let engine = CliEngine::new(settings, telemetry);
    engine
        .start(&root_command(), &args, &Toolkit::new(store))
        .await
}
