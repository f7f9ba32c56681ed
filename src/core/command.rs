//! core::command
//!
//! The command tree and the typed handler seam.
//!
//! # Design
//!
//! Commands form a tree declared once at startup. Leaf commands name their
//! handler with a [`CommandId`]; the binary supplies one [`CommandHandler`]
//! that matches exhaustively over the ids. Adding a command therefore fails
//! to compile until its handler exists.

use async_trait::async_trait;

use super::context::CliContext;
use super::option::{CommandArgument, CommandOption};
use crate::telemetry::TelemetryEvent;

/// Every handler the toolkit knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    ConfigGet,
    ConfigSet,
    New,
}

/// Runs the handler behind a [`CommandId`].
///
/// Handlers return `anyhow::Result`. Errors that are not already an
/// [`crate::core::FxError`] are normalized by the engine.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, id: CommandId, ctx: &mut CliContext<'_>) -> anyhow::Result<()>;
}

/// A node in the command tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliCommand {
    pub name: String,
    pub description: String,
    /// Only meaningful on the root; printed by `--version`.
    pub version: Option<String>,
    pub commands: Vec<CliCommand>,
    pub options: Vec<CommandOption>,
    pub arguments: Vec<CommandArgument>,
    pub handler: Option<CommandId>,
    pub telemetry: Option<TelemetryEvent>,
    /// `(command line, explanation)` pairs shown in help.
    pub examples: Vec<(String, String)>,
}

impl CliCommand {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            version: None,
            commands: Vec::new(),
            options: Vec::new(),
            arguments: Vec::new(),
            handler: None,
            telemetry: None,
            examples: Vec::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn subcommand(mut self, command: CliCommand) -> Self {
        self.commands.push(command);
        self
    }

    pub fn option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn argument(mut self, argument: CommandArgument) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn handler(mut self, id: CommandId) -> Self {
        self.handler = Some(id);
        self
    }

    pub fn telemetry(mut self, event: TelemetryEvent) -> Self {
        self.telemetry = Some(event);
        self
    }

    pub fn example(mut self, command: impl Into<String>, explanation: impl Into<String>) -> Self {
        self.examples.push((command.into(), explanation.into()));
        self
    }

    /// Direct child with exactly this name.
    pub fn child(&self, name: &str) -> Option<&CliCommand> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn find_option(&self, name: &str) -> Option<&CommandOption> {
        self.options.iter().find(|o| o.name == name)
    }
}
