//! cli::commands
//!
//! The command tree and its handlers.
//!
//! # Architecture
//!
//! [`root_command`] declares every command once. Leaf commands carry a
//! [`CommandId`]; [`Toolkit`] maps each id to its handler with an exhaustive
//! match, so adding a command without a handler does not compile.
//!
//! Each handler:
//! 1. Reads its already-validated values from the [`CliContext`]
//! 2. Asks for anything missing through the [`UserInteraction`]
//! 3. Prints its result

mod config_cmd;
mod new;

pub use config_cmd::{get as config_get, set as config_set};
pub use new::{create_project_questions, new_project, ProjectFile, ScaffoldTask, PROJECT_FILE};

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::core::config::{SettingKey, SettingsStore};
use crate::core::{CliCommand, CliContext, CommandHandler, CommandId, CommandOption};
use crate::engine::{global, global_options};
use crate::telemetry::TelemetryEvent;
use crate::ui::{TerminalUi, UserInteraction};

/// The full `teamsfx` command tree.
pub fn root_command() -> CliCommand {
    let keys: Vec<&str> = SettingKey::ALL.iter().map(|k| k.as_str()).collect();

    let get = CliCommand::new("get", "Get user settings.")
        .argument(
            CommandOption::single_select("option", keys.clone())
                .describe("User setting to show. All settings are shown when omitted."),
        )
        .handler(CommandId::ConfigGet)
        .telemetry(TelemetryEvent::ConfigGet)
        .example("teamsfx config get telemetry", "Show the telemetry setting.");

    let set = CliCommand::new("set", "Set user settings.")
        .argument(
            CommandOption::single_select("option", keys)
                .describe("User setting to change.")
                .required(),
        )
        .argument(
            CommandOption::string("value")
                .describe("New value of the setting.")
                .required(),
        )
        .handler(CommandId::ConfigSet)
        .telemetry(TelemetryEvent::ConfigSet)
        .example("teamsfx config set telemetry off", "Stop sending usage data.");

    let mut new = CliCommand::new("new", "Create a new Teams application.")
        .handler(CommandId::New)
        .telemetry(TelemetryEvent::CreateProject)
        .example(
            "teamsfx new --interactive false --capability tab --app-name myapp",
            "Create a tab app without prompts.",
        );
    new.options = create_project_questions()
        .to_options()
        .into_iter()
        .filter(|o| o.name != global::FOLDER)
        .collect();

    let mut root = CliCommand::new("teamsfx", "Teams Toolkit command line interface.")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(
            CliCommand::new("config", "Manage user settings.")
                .subcommand(get)
                .subcommand(set),
        )
        .subcommand(new);
    root.options = global_options();
    root
}

/// Handlers for every [`CommandId`].
pub struct Toolkit {
    settings: SettingsStore,
    ui: Option<Arc<dyn UserInteraction>>,
}

impl Toolkit {
    pub fn new(settings: SettingsStore) -> Self {
        Self { settings, ui: None }
    }

    /// Use `ui` instead of a terminal for prompts.
    pub fn with_ui(mut self, ui: Arc<dyn UserInteraction>) -> Self {
        self.ui = Some(ui);
        self
    }

    fn ui_for(&self, ctx: &CliContext<'_>) -> Arc<dyn UserInteraction> {
        match &self.ui {
            Some(ui) => Arc::clone(ui),
            None => Arc::new(TerminalUi::stdio(ctx.runtime.interactive)),
        }
    }
}

#[async_trait]
impl CommandHandler for Toolkit {
    async fn handle(&self, id: CommandId, ctx: &mut CliContext<'_>) -> Result<()> {
        match id {
            CommandId::ConfigGet => config_get(&self.settings, ctx),
            CommandId::ConfigSet => config_set(&self.settings, ctx),
            CommandId::New => {
                let ui = self.ui_for(ctx);
                new_project(ctx, ui.as_ref()).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{OptionKind, OptionValue};
    use crate::engine::validate_option;

    #[test]
    fn every_leaf_has_a_handler_and_event() {
        let root = root_command();
        let mut stack = vec![&root];
        let mut leaves = 0;
        while let Some(cmd) = stack.pop() {
            if cmd.commands.is_empty() {
                assert!(cmd.handler.is_some(), "{} has no handler", cmd.name);
                assert!(cmd.telemetry.is_some(), "{} has no telemetry", cmd.name);
                leaves += 1;
            }
            stack.extend(cmd.commands.iter());
        }
        assert_eq!(leaves, 3);
    }

    #[test]
    fn new_options_come_from_questions() {
        let root = root_command();
        let new = root.child("new").unwrap();
        let capability = new.find_option("capability").unwrap();
        assert_eq!(capability.kind, OptionKind::SingleSelect);
        assert_eq!(
            capability.choices.as_deref(),
            Some(&["tab".to_string(), "bot".to_string(), "message-extension".to_string()][..])
        );
        assert!(new.find_option("folder").is_none());
        assert!(new.find_option("function-triggers").is_some());
    }

    #[test]
    fn derived_defaults_are_valid_choices() {
        let root = root_command();
        let new = root.child("new").unwrap();
        for option in &new.options {
            let (Some(choices), Some(default)) = (&option.choices, &option.default) else {
                continue;
            };
            for value in default.as_list() {
                assert!(
                    choices.iter().any(|c| c == value),
                    "--{} default {} not in {:?}",
                    option.name,
                    value,
                    choices
                );
            }
            assert!(validate_option(option, Some(default), false).is_ok());
        }
    }

    #[test]
    fn select_options_take_cli_names_only() {
        let root = root_command();
        let tab_kind = root.child("new").unwrap().find_option("tab-kind").unwrap();
        assert_eq!(tab_kind.default, Some(OptionValue::Text("react".into())));

        let by_name = OptionValue::Text("react".into());
        assert!(validate_option(tab_kind, Some(&by_name), false).is_ok());
        let by_id = OptionValue::Text("tab-react".into());
        assert!(validate_option(tab_kind, Some(&by_id), false).is_err());
    }
}
