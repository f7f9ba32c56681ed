//! Integration tests for the command engine.
//!
//! These tests run the real command tree through resolution, parsing,
//! validation and dispatch, with a recording handler in place of the real
//! command implementations.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use teamsfx::cli::commands::root_command;
use teamsfx::core::config::UserSettings;
use teamsfx::core::{CliCommand, CliContext, CommandHandler, CommandId, CommandOption, OptionValue};
use teamsfx::engine::{
    find_command, global_options, parse_args, validate_options_and_arguments, CliEngine,
    ExitStatus,
};
use teamsfx::telemetry::{property, CliTelemetry, MemoryTelemetryReporter};

// =============================================================================
// Test Fixtures
// =============================================================================

fn argv(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Records every dispatch along with the parsed positional values.
#[derive(Default, Clone)]
struct RecordingHandler {
    calls: Arc<Mutex<Vec<(CommandId, Vec<String>)>>>,
}

#[async_trait]
impl CommandHandler for RecordingHandler {
    async fn handle(&self, id: CommandId, ctx: &mut CliContext<'_>) -> anyhow::Result<()> {
        let values = ctx.positional().iter().map(|v| v.to_string()).collect();
        self.calls.lock().unwrap().push((id, values));
        Ok(())
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn config_get_resolves_to_its_handler() {
    let root = root_command();
    let handler = RecordingHandler::default();
    let engine = CliEngine::new(UserSettings::default(), CliTelemetry::disabled());

    let status = engine
        .start(&root, &argv(&["config", "get", "telemetry"]), &handler)
        .await;

    assert_eq!(status, ExitStatus::Success);
    let calls = handler.calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![(CommandId::ConfigGet, vec!["telemetry".to_string()])]
    );
}

#[test]
fn config_get_context_has_option_argument() {
    let root = root_command();
    let resolved = find_command(&root, &argv(&["config", "get", "telemetry"]));
    let ctx = parse_args(&resolved, &root);

    assert_eq!(ctx.full_name, "teamsfx config get");
    assert_eq!(ctx.command.handler, Some(CommandId::ConfigGet));
    assert_eq!(ctx.argument("option"), Some("telemetry"));
}

#[test]
fn required_default_is_filled_and_valid() {
    let mut root = CliCommand::new("teamsfx", "");
    root.options = global_options();
    let root = root.subcommand(
        CliCommand::new("preview", "")
            .option(
                CommandOption::single_select("telemetry", ["on", "off"])
                    .required()
                    .default_value("on"),
            )
            .handler(CommandId::ConfigSet),
    );

    let resolved = find_command(&root, &argv(&["preview"]));
    let ctx = parse_args(&resolved, &root);

    assert_eq!(ctx.option("telemetry"), Some(&OptionValue::from("on")));
    assert!(validate_options_and_arguments(&ctx).is_ok());
}

#[test]
fn parsing_does_not_touch_the_tree() {
    let root = root_command();
    let before = root.clone();
    let args = argv(&["config", "set", "telemetry", "off", "--debug"]);

    let first = parse_args(&find_command(&root, &args), &root);
    let second = parse_args(&find_command(&root, &args), &root);

    assert_eq!(first.option_values, second.option_values);
    assert_eq!(first.argument_values, second.argument_values);
    assert_eq!(first.global_option_values, second.global_option_values);
    assert_eq!(root, before);
}

#[tokio::test]
async fn missing_required_argument_is_a_user_error() {
    let root = root_command();
    let handler = RecordingHandler::default();
    let status = CliEngine::default()
        .start(&root, &argv(&["config", "set", "telemetry"]), &handler)
        .await;

    assert_eq!(status, ExitStatus::UserError);
    assert_eq!(status.code(), 1);
    assert!(handler.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn telemetry_records_command_and_outcome() {
    let reporter = MemoryTelemetryReporter::new();
    let engine = CliEngine::new(
        UserSettings::default(),
        CliTelemetry::new(Arc::new(reporter.clone())),
    );
    let root = root_command();
    let handler = RecordingHandler::default();

    engine
        .start(&root, &argv(&["config", "get", "--folder", "/tmp/app"]), &handler)
        .await;
    engine
        .start(&root, &argv(&["config", "get", "colour"]), &handler)
        .await;

    let records = reporter.records();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].event, "config-get");
    assert_eq!(records[0].properties[property::SUCCESS], "yes");
    assert_eq!(records[0].properties[property::COMMAND], "teamsfx config get");
    assert!(records[0].properties.contains_key(property::PROJECT));

    assert_eq!(records[1].properties[property::SUCCESS], "no");
    assert_eq!(
        records[1].properties[property::ERROR_CODE],
        "TeamsfxCLI.InputValidationError"
    );
}

#[tokio::test]
async fn saved_interactive_setting_is_the_default() {
    let root = root_command();
    let mut settings = UserSettings::default();
    settings.interactive = Some(false);
    let engine = CliEngine::new(settings, CliTelemetry::disabled());

    let resolved = find_command(&root, &argv(&["new"]));
    assert!(!engine.parse_args(&resolved, &root).runtime.interactive);

    let resolved = find_command(&root, &argv(&["new", "--interactive", "true"]));
    assert!(engine.parse_args(&resolved, &root).runtime.interactive);
}
