//! telemetry::reporter
//!
//! Reporter implementations.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::{TelemetryError, TelemetryRecord, TelemetryReporter};

/// Appends one JSON object per line to a local file.
#[derive(Debug, Clone)]
pub struct FileTelemetryReporter {
    path: PathBuf,
}

impl FileTelemetryReporter {
    /// Write to `telemetry.jsonl` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join("telemetry.jsonl"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TelemetryReporter for FileTelemetryReporter {
    fn send(&self, record: &TelemetryRecord) -> Result<(), TelemetryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Keeps records in memory.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryTelemetryReporter {
    records: Arc<Mutex<Vec<TelemetryRecord>>>,
}

impl MemoryTelemetryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn records(&self) -> Vec<TelemetryRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl TelemetryReporter for MemoryTelemetryReporter {
    fn send(&self, record: &TelemetryRecord) -> Result<(), TelemetryError> {
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
        Ok(())
    }
}
