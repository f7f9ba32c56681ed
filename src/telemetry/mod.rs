//! telemetry
//!
//! Fire-and-forget usage events.
//!
//! # Design
//!
//! Commands that carry a [`TelemetryEvent`] report one event per run, on
//! success and on failure. Events are handed to a [`TelemetryReporter`];
//! a reporter failure is logged at debug level and never changes the outcome
//! of the command.
//!
//! Values that could identify a user or project (the `env` option, the
//! project folder) are only ever recorded as SHA-256 hashes.
//!
//! # Reporters
//!
//! - [`FileTelemetryReporter`] appends JSON lines next to the settings file
//! - [`MemoryTelemetryReporter`] keeps events in memory for tests

mod reporter;

pub use reporter::{FileTelemetryReporter, MemoryTelemetryReporter};

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::core::{ErrorKind, FxError};

/// Telemetry property names.
pub mod property {
    pub const COMMAND: &str = "command";
    pub const SUCCESS: &str = "success";
    pub const ENV: &str = "env";
    pub const PROJECT: &str = "project";
    pub const ERROR_TYPE: &str = "error-type";
    pub const ERROR_CODE: &str = "error-code";
    pub const INTERACTIVE: &str = "interactive";
}

/// Events reported by commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TelemetryEvent {
    ConfigGet,
    ConfigSet,
    CreateProject,
}

impl TelemetryEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            TelemetryEvent::ConfigGet => "config-get",
            TelemetryEvent::ConfigSet => "config-set",
            TelemetryEvent::CreateProject => "create-project",
        }
    }
}

impl fmt::Display for TelemetryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub event: String,
    pub properties: BTreeMap<String, String>,
}

/// Errors from telemetry reporters.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to write telemetry: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode telemetry: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A sink for telemetry records.
pub trait TelemetryReporter: Send + Sync {
    fn send(&self, record: &TelemetryRecord) -> Result<(), TelemetryError>;
}

/// Hex-encoded SHA-256 of `value`.
pub fn hash_value(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}

/// Telemetry client used by the engine.
#[derive(Clone, Default)]
pub struct CliTelemetry {
    reporter: Option<Arc<dyn TelemetryReporter>>,
    project_hash: Option<String>,
}

impl fmt::Debug for CliTelemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliTelemetry")
            .field("enabled", &self.reporter.is_some())
            .field("project_hash", &self.project_hash)
            .finish()
    }
}

impl CliTelemetry {
    pub fn new(reporter: Arc<dyn TelemetryReporter>) -> Self {
        Self {
            reporter: Some(reporter),
            project_hash: None,
        }
    }

    /// A client that drops every event.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.reporter.is_some()
    }

    /// Tag subsequent events with a hash of the project folder.
    pub fn with_root_folder(mut self, folder: &Path) -> Self {
        self.project_hash = Some(hash_value(&folder.to_string_lossy()));
        self
    }

    /// Report a successful run.
    pub fn send_event(&self, event: TelemetryEvent, properties: &BTreeMap<String, String>) {
        let mut properties = properties.clone();
        properties.insert(property::SUCCESS.to_string(), "yes".to_string());
        self.emit(event, properties);
    }

    /// Report a failed run.
    pub fn send_error_event(
        &self,
        event: TelemetryEvent,
        error: &FxError,
        properties: &BTreeMap<String, String>,
    ) {
        let mut properties = properties.clone();
        properties.insert(property::SUCCESS.to_string(), "no".to_string());
        let error_type = match error.kind() {
            ErrorKind::User => "user",
            ErrorKind::System => "system",
            ErrorKind::UserCancel => "cancel",
        };
        properties.insert(property::ERROR_TYPE.to_string(), error_type.to_string());
        properties.insert(
            property::ERROR_CODE.to_string(),
            format!("{}.{}", error.source_name(), error.name()),
        );
        self.emit(event, properties);
    }

    fn emit(&self, event: TelemetryEvent, mut properties: BTreeMap<String, String>) {
        let Some(reporter) = &self.reporter else {
            return;
        };
        if let Some(hash) = &self.project_hash {
            properties.insert(property::PROJECT.to_string(), hash.clone());
        }
        let record = TelemetryRecord {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event: event.to_string(),
            properties,
        };
        if let Err(e) = reporter.send(&record) {
            tracing::debug!(event = %event, error = %e, "telemetry dropped");
        }
    }
}
