//! engine::report
//!
//! Turning a command outcome into telemetry, user-facing output and an exit
//! status.

use std::process::ExitCode;

use crate::core::{CliContext, ErrorKind, FxError, OptionValue};
use crate::telemetry::{hash_value, property, CliTelemetry};
use crate::ui::output;

/// How the process ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// The user backed out of a prompt. Not a failure.
    Cancelled,
    UserError,
    SystemError,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success | ExitStatus::Cancelled => 0,
            ExitStatus::UserError => 1,
            ExitStatus::SystemError => 2,
        }
    }

    pub fn for_error(error: &FxError) -> Self {
        match error.kind() {
            ErrorKind::UserCancel => ExitStatus::Cancelled,
            ErrorKind::User => ExitStatus::UserError,
            ErrorKind::System => ExitStatus::SystemError,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// Lines shown on stderr for a failed command.
pub fn render_error(error: &FxError) -> Vec<String> {
    let mut lines = vec![error.to_string()];
    if let Some(link) = error.help_link() {
        lines.push(format!("Get help from {}", output::hyperlink(link)));
    }
    if let Some(link) = error.issue_link() {
        lines.push(format!("Report this issue at {}", output::hyperlink(link)));
    }
    lines
}

/// Record telemetry for the run and print the outcome.
///
/// Telemetry is only sent when the command declares an event. The `env`
/// option, if set, is sent hashed.
pub fn process_result(
    ctx: &mut CliContext<'_>,
    error: Option<&FxError>,
    telemetry: &CliTelemetry,
) -> ExitStatus {
    if let Some(event) = ctx.command.telemetry {
        ctx.telemetry_properties
            .insert(property::COMMAND.to_string(), ctx.full_name.clone());
        ctx.telemetry_properties.insert(
            property::INTERACTIVE.to_string(),
            ctx.runtime.interactive.to_string(),
        );
        if let Some(env) = ctx.option(property::ENV).and_then(OptionValue::as_str) {
            let hashed = hash_value(env);
            ctx.telemetry_properties
                .insert(property::ENV.to_string(), hashed);
        }

        match error {
            Some(error) => telemetry.send_error_event(event, error, &ctx.telemetry_properties),
            None => telemetry.send_event(event, &ctx.telemetry_properties),
        }
    }

    let Some(error) = error else {
        return ExitStatus::Success;
    };

    if error.is_user_cancel() {
        output::info("User canceled.");
    } else {
        tracing::debug!(error = ?error, command = %ctx.full_name, "command failed");
        for line in render_error(error) {
            output::error(line);
        }
    }
    ExitStatus::for_error(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CliCommand, CommandOption, CLI_SOURCE};
    use crate::telemetry::{MemoryTelemetryReporter, TelemetryEvent};
    use std::sync::Arc;

    #[test]
    fn exit_codes() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::Cancelled.code(), 0);
        assert_eq!(ExitStatus::for_error(&FxError::missing_required_input("--x")).code(), 1);
        assert_eq!(
            ExitStatus::for_error(&FxError::system(CLI_SOURCE, "Boom", "boom")).code(),
            2
        );
    }

    #[test]
    fn render_includes_links() {
        let err = FxError::user("Core", "NoProject", "No project found.")
            .with_help_link("https://aka.ms/help")
            .with_issue_link("https://example.com/issues");
        let lines = render_error(&err);
        assert_eq!(lines[0], "Core.NoProject: No project found.");
        assert!(lines[1].starts_with("Get help from "));
        assert!(lines[1].contains("https://aka.ms/help"));
        assert!(lines[2].contains("https://example.com/issues"));
        assert_eq!(render_error(&FxError::user_cancel()).len(), 1);
    }

    #[test]
    fn telemetry_hashes_env_and_marks_failure() {
        let reporter = MemoryTelemetryReporter::new();
        let telemetry = CliTelemetry::new(Arc::new(reporter.clone()));
        let cmd = CliCommand::new("deploy", "")
            .option(CommandOption::string("env"))
            .telemetry(TelemetryEvent::ConfigSet);
        let mut ctx = CliContext::new(&cmd, "teamsfx deploy");
        ctx.option_values.insert("env".into(), "dev".into());

        let err = FxError::missing_required_input("--name");
        let status = process_result(&mut ctx, Some(&err), &telemetry);
        assert_eq!(status, ExitStatus::UserError);

        let records = reporter.records();
        assert_eq!(records.len(), 1);
        let props = &records[0].properties;
        assert_eq!(props[property::ENV], hash_value("dev"));
        assert_ne!(props[property::ENV], "dev");
        assert_eq!(props[property::SUCCESS], "no");
        assert_eq!(props[property::COMMAND], "teamsfx deploy");
    }

    #[test]
    fn commands_without_event_send_nothing() {
        let reporter = MemoryTelemetryReporter::new();
        let telemetry = CliTelemetry::new(Arc::new(reporter.clone()));
        let cmd = CliCommand::new("config", "");
        let mut ctx = CliContext::new(&cmd, "teamsfx config");

        assert_eq!(process_result(&mut ctx, None, &telemetry), ExitStatus::Success);
        assert!(reporter.records().is_empty());
    }
}
