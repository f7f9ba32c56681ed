//! core::context
//!
//! Per-invocation state produced by argument parsing.
//!
//! # Design
//!
//! A [`CliContext`] is created fresh for each CLI run. It borrows the
//! resolved command from the (immutable) command tree and owns every value
//! parsed from argv. Ambient configuration that other subsystems need
//! (verbosity, interactivity, project folder) is collected in a
//! [`RuntimeConfig`] and passed explicitly instead of being stored in
//! process-wide state.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::command::CliCommand;
use super::option::OptionValue;
use crate::ui::output::Verbosity;

/// Ambient configuration derived from the global options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub verbosity: Verbosity,
    pub interactive: bool,
    /// Value of `--folder`, when given.
    pub project_folder: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            interactive: true,
            project_folder: None,
        }
    }
}

/// Everything known about one invocation.
#[derive(Debug, Clone)]
pub struct CliContext<'a> {
    /// The resolved command.
    pub command: &'a CliCommand,
    /// Space-joined path from the root, e.g. `teamsfx config get`.
    pub full_name: String,
    /// Values for the command's own options.
    pub option_values: BTreeMap<String, OptionValue>,
    /// Values for the root's global options.
    pub global_option_values: BTreeMap<String, OptionValue>,
    /// Values for positional arguments, keyed by argument name.
    pub argument_values: BTreeMap<String, OptionValue>,
    pub telemetry_properties: BTreeMap<String, String>,
    pub runtime: RuntimeConfig,
}

impl<'a> CliContext<'a> {
    /// An empty context for `command`.
    pub fn new(command: &'a CliCommand, full_name: impl Into<String>) -> Self {
        Self {
            command,
            full_name: full_name.into(),
            option_values: BTreeMap::new(),
            global_option_values: BTreeMap::new(),
            argument_values: BTreeMap::new(),
            telemetry_properties: BTreeMap::new(),
            runtime: RuntimeConfig::default(),
        }
    }

    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.option_values.get(name)
    }

    pub fn global_option(&self, name: &str) -> Option<&OptionValue> {
        self.global_option_values.get(name)
    }

    /// Text value of a positional argument.
    pub fn argument(&self, name: &str) -> Option<&str> {
        self.argument_values.get(name).and_then(OptionValue::as_str)
    }

    /// Positional values in declaration order; unset arguments are skipped.
    pub fn positional(&self) -> Vec<&OptionValue> {
        self.command
            .arguments
            .iter()
            .filter_map(|a| self.argument_values.get(&a.name))
            .collect()
    }

    /// Whether a boolean global option was set to `true`.
    pub fn global_flag(&self, name: &str) -> bool {
        self.global_option(name).and_then(OptionValue::as_bool) == Some(true)
    }
}
