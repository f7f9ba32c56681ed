//! engine
//!
//! Runs one CLI invocation: Resolve -> Parse -> Validate -> Dispatch -> Report.
//!
//! # Architecture
//!
//! The command tree is declared once and only ever read. Everything that
//! varies per invocation lives in a [`CliContext`] that borrows the resolved
//! command:
//!
//! 1. **Resolve**: [`resolve::find_command`] walks argv down the tree
//! 2. **Parse**: [`parse::parse_args`] fills option and argument values and
//!    derives the [`crate::core::RuntimeConfig`]
//! 3. **Validate**: [`validate::validate_options_and_arguments`]
//! 4. **Dispatch**: the command's [`CommandId`] is handed to a
//!    [`CommandHandler`]
//! 5. **Report**: [`report::process_result`] sends telemetry, prints errors
//!    and picks the exit status
//!
//! # Invariants
//!
//! - Parsing never fails; every input problem surfaces as a validation error
//! - Handlers never see unvalidated values
//! - Every handler error leaves the engine as an [`FxError`]
//! - `--version` and `--help` short-circuit before validation

pub mod help;
pub mod parse;
pub mod report;
pub mod resolve;
pub mod validate;

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::core::config::UserSettings;
use crate::core::{
    assemble_error, CliCommand, CliContext, CommandHandler, CommandId, CommandOption, FxError,
};
use crate::telemetry::CliTelemetry;
use crate::ui::{logging, output};

pub use help::{format_help, format_option_name};
pub use parse::{parse_args, parse_args_with};
pub use report::{process_result, render_error, ExitStatus};
pub use resolve::{find_command, Resolved};
pub use validate::{validate_option, validate_options_and_arguments};

/// Names of the options every command accepts.
pub mod global {
    pub const VERSION: &str = "version";
    pub const HELP: &str = "help";
    pub const VERBOSE: &str = "verbose";
    pub const DEBUG: &str = "debug";
    pub const INTERACTIVE: &str = "interactive";
    pub const FOLDER: &str = "folder";
}

/// Declarations for the global options, for the root command.
pub fn global_options() -> Vec<CommandOption> {
    vec![
        CommandOption::boolean(global::VERSION)
            .short("v")
            .describe("Print the version number."),
        CommandOption::boolean(global::HELP)
            .short("h")
            .describe("Show help for the command."),
        CommandOption::boolean(global::VERBOSE).describe("Print additional diagnostics."),
        CommandOption::boolean(global::DEBUG).describe("Print debug diagnostics."),
        CommandOption::boolean(global::INTERACTIVE)
            .short("i")
            .describe("Prompt for missing inputs."),
        CommandOption::string(global::FOLDER).describe("Project folder."),
    ]
}

/// Drives a single invocation.
#[derive(Debug, Clone, Default)]
pub struct CliEngine {
    settings: UserSettings,
    telemetry: CliTelemetry,
}

impl CliEngine {
    pub fn new(settings: UserSettings, telemetry: CliTelemetry) -> Self {
        Self {
            settings,
            telemetry,
        }
    }

    /// Parse with the user's saved `interactive` preference as the default.
    pub fn parse_args<'a>(&self, resolved: &Resolved<'a>, root: &CliCommand) -> CliContext<'a> {
        parse_args_with(resolved, root, self.settings.interactive())
    }

    /// Run `args` (without the program name) against the tree under `root`.
    pub async fn start(
        &self,
        root: &CliCommand,
        args: &[String],
        handler: &dyn CommandHandler,
    ) -> ExitStatus {
        let resolved = find_command(root, args);
        let mut ctx = self.parse_args(&resolved, root);
        logging::init(&ctx.runtime);

        let telemetry = match &ctx.runtime.project_folder {
            Some(folder) => self.telemetry.clone().with_root_folder(folder),
            None => self.telemetry.clone(),
        };

        if ctx.global_flag(global::VERSION) {
            output::info(root.version.as_deref().unwrap_or("unknown"));
            return ExitStatus::Success;
        }

        let id = match ctx.command.handler {
            Some(id) if !ctx.global_flag(global::HELP) => id,
            _ => {
                output::info(format_help(ctx.command, &ctx.full_name, Some(root)));
                return ExitStatus::Success;
            }
        };

        tracing::info!(command = %ctx.full_name, ?id, "running command");

        let outcome = match validate_options_and_arguments(&ctx) {
            Ok(()) => dispatch(handler, id, &mut ctx).await,
            Err(err) => Err(err),
        };

        process_result(&mut ctx, outcome.as_ref().err(), &telemetry)
    }
}

/// Run the handler. Errors and panics both come back as an [`FxError`].
async fn dispatch(
    handler: &dyn CommandHandler,
    id: CommandId,
    ctx: &mut CliContext<'_>,
) -> Result<(), FxError> {
    match AssertUnwindSafe(handler.handle(id, ctx)).catch_unwind().await {
        Ok(result) => result.map_err(assemble_error),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(?id, %message, "command handler panicked");
            Err(assemble_error(anyhow::anyhow!(message)))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "command handler panicked".to_string()
    }
}
