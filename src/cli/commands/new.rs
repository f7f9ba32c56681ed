//! new command - Create a Teams app project from a few questions

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{CliContext, FxError, CLI_SOURCE};
use crate::engine::global;
use crate::question::{
    traverse, Answers, Condition, OptionItem, Question, QuestionNode, StringValidation,
};
use crate::ui::{InteractionResult, MessageLevel, ProgressHandler, TimeConsumingTask, UserInteraction};

/// Name of the project file written into every new project.
pub const PROJECT_FILE: &str = "teamsapp.json";

pub mod question {
    pub const CAPABILITY: &str = "capability";
    pub const TAB_KIND: &str = "tab-kind";
    pub const BOT_HOST: &str = "bot-host";
    pub const FUNCTION_TRIGGERS: &str = "function-triggers";
    pub const ME_KIND: &str = "me-kind";
    pub const LANGUAGE: &str = "programming-language";
    pub const FOLDER: &str = "folder";
    pub const APP_NAME: &str = "app-name";
}

/// The questions asked by `teamsfx new`.
///
/// Follow-up questions only appear for the capability they refine.
pub fn create_project_questions() -> QuestionNode {
    let capability = QuestionNode::new(
        Question::single_select(
            question::CAPABILITY,
            "Select a capability",
            vec![
                OptionItem::new("tab", "Tab").detail("A web page embedded in Teams"),
                OptionItem::new("bot", "Bot").detail("A conversational agent"),
                OptionItem::new("message-extension", "Message Extension")
                    .detail("Search or act on content from the compose box"),
            ],
        )
        .describe("Capability of the new app"),
    )
    .child(
        QuestionNode::new(
            Question::single_select(
                question::TAB_KIND,
                "Select a tab type",
                vec![
                    OptionItem::new("tab-spfx", "SPFx tab").cli_name("spfx"),
                    OptionItem::new("tab-react", "React tab").cli_name("react"),
                    OptionItem::new("tab-non-sso", "Basic tab").cli_name("basic"),
                ],
            )
            .default_answer("tab-react"),
        )
        .with_condition(Condition::Equals("tab".into())),
    )
    .child(
        QuestionNode::new(
            Question::single_select(
                question::BOT_HOST,
                "Select a hosting type for the bot",
                vec![
                    OptionItem::new("app-service", "Azure App Service"),
                    OptionItem::new("azure-functions", "Azure Functions"),
                ],
            )
            .default_answer("app-service"),
        )
        .with_condition(Condition::Equals("bot".into()))
        .child(
            QuestionNode::new(
                Question::multi_select(
                    question::FUNCTION_TRIGGERS,
                    "Select triggers for the function",
                    vec![
                        OptionItem::new("http-trigger", "HTTP trigger").cli_name("http"),
                        OptionItem::new("timer-trigger", "Timer trigger").cli_name("timer"),
                    ],
                )
                .default_answer(vec!["http-trigger".to_string()]),
            )
            .with_condition(Condition::Equals("azure-functions".into())),
        ),
    )
    .child(
        QuestionNode::new(
            Question::single_select(
                question::ME_KIND,
                "Select a message extension type",
                vec![
                    OptionItem::new("search", "Search command"),
                    OptionItem::new("action", "Action command"),
                ],
            )
            .skip_single_option()
            .default_answer("search"),
        )
        .with_condition(Condition::Equals("message-extension".into())),
    );

    QuestionNode::group()
        .child(capability)
        .child(QuestionNode::new(
            Question::single_select(
                question::LANGUAGE,
                "Select a programming language",
                vec![
                    OptionItem::new("javascript", "JavaScript"),
                    OptionItem::new("typescript", "TypeScript"),
                ],
            )
            .default_answer("javascript"),
        ))
        .child(QuestionNode::new(
            Question::folder(question::FOLDER, "Workspace folder")
                .describe("Directory where the project folder will be created")
                .default_answer("./"),
        ))
        .child(QuestionNode::new(
            Question::text(question::APP_NAME, "Application name")
                .describe("Name of the app, also used as the project folder name")
                .validation(
                    StringValidation::new()
                        .pattern("[a-zA-Z][\\da-zA-Z]+")
                        .max_length(30),
                ),
        ))
}

/// Contents of `teamsapp.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub project_id: String,
    pub app_name: String,
    pub created_at: DateTime<Utc>,
    pub answers: Answers,
}

/// Writes the project folder, reporting one step per file.
pub struct ScaffoldTask {
    target: PathBuf,
    project: ProjectFile,
}

impl ScaffoldTask {
    pub fn new(answers: &Answers) -> Result<Self, FxError> {
        let missing = |name: &str| FxError::missing_required_input(&format!("--{}", name));
        let folder = answers
            .get_str(question::FOLDER)
            .ok_or_else(|| missing(question::FOLDER))?;
        let app_name = answers
            .get_str(question::APP_NAME)
            .ok_or_else(|| missing(question::APP_NAME))?;

        Ok(Self {
            target: Path::new(folder).join(app_name),
            project: ProjectFile {
                project_id: Uuid::new_v4().to_string(),
                app_name: app_name.to_string(),
                created_at: Utc::now(),
                answers: answers.clone(),
            },
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    fn readme(&self) -> String {
        let mut text = format!("# {}\n\n", self.project.app_name);
        for (name, answer) in self.project.answers.iter() {
            text.push_str(&format!("- {}: {}\n", name, answer.as_list().join(", ")));
        }
        text
    }
}

#[async_trait]
impl TimeConsumingTask for ScaffoldTask {
    fn title(&self) -> &str {
        "Scaffolding project"
    }

    fn total_steps(&self) -> usize {
        3
    }

    async fn run(&mut self, progress: &dyn ProgressHandler) -> InteractionResult<()> {
        progress.next("Creating project folder");
        let occupied = fs::read_dir(&self.target)
            .map(|mut entries| entries.next().is_some())
            .unwrap_or(false);
        if occupied {
            return Err(FxError::user(
                CLI_SOURCE,
                "ProjectFolderExistError",
                format!(
                    "Path {} already exists. Select a different folder.",
                    self.target.display()
                ),
            ));
        }
        fs::create_dir_all(&self.target).map_err(|e| write_error(&self.target, e))?;

        progress.next("Writing project file");
        let path = self.target.join(PROJECT_FILE);
        let json = serde_json::to_string_pretty(&self.project).map_err(|e| {
            FxError::system(CLI_SOURCE, "WriteFileError", e.to_string())
        })?;
        fs::write(&path, json).map_err(|e| write_error(&path, e))?;

        progress.next("Writing README");
        let path = self.target.join("README.md");
        fs::write(&path, self.readme()).map_err(|e| write_error(&path, e))?;

        Ok(())
    }
}

fn write_error(path: &Path, err: std::io::Error) -> FxError {
    FxError::system(
        CLI_SOURCE,
        "WriteFileError",
        format!("failed to write '{}': {}", path.display(), err),
    )
}

/// Ask the remaining questions and scaffold the project.
pub async fn new_project(ctx: &mut CliContext<'_>, ui: &dyn UserInteraction) -> Result<()> {
    let questions = create_project_questions();

    let mut answers = Answers::from_options(ctx.option_values.iter());
    if let Some(folder) = &ctx.runtime.project_folder {
        answers.insert(global::FOLDER, folder.to_string_lossy().into_owned());
    }

    traverse(&questions, &mut answers, ui).await?;

    if let Some(capability) = answers.get_str(question::CAPABILITY) {
        ctx.telemetry_properties
            .insert(question::CAPABILITY.to_string(), capability.to_string());
    }

    let mut task = ScaffoldTask::new(&answers)?;
    ui.run_with_progress(&mut task).await?;

    tracing::info!(path = %task.target().display(), "project created");
    ui.show_message(
        MessageLevel::Info,
        &format!("Successfully created project at {}", task.target().display()),
        false,
        &[],
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::QuestionKind;

    #[test]
    fn question_order_is_preorder() {
        let root = create_project_questions();
        let names: Vec<&str> = root
            .flatten()
            .into_iter()
            .map(|q| q.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "capability",
                "tab-kind",
                "bot-host",
                "function-triggers",
                "me-kind",
                "programming-language",
                "folder",
                "app-name",
            ]
        );
    }

    #[test]
    fn app_name_rule() {
        let tree = create_project_questions();
        let app_name = tree
            .flatten()
            .into_iter()
            .find(|q| q.name == question::APP_NAME)
            .unwrap()
            .clone();
        let QuestionKind::Text {
            validation: Some(rule),
        } = app_name.kind
        else {
            panic!("app-name should be validated text");
        };
        assert!(rule.validate("myapp1").is_ok());
        assert!(rule.validate("1app").is_err());
        assert!(rule.validate(&"a".repeat(31)).is_err());
    }

    #[tokio::test]
    async fn scaffolds_project_from_flags_and_prompts() {
        use crate::cli::commands::root_command;
        use crate::engine::{find_command, parse_args};
        use crate::ui::mock::{MockResponse, MockUi};

        let dir = tempfile::TempDir::new().unwrap();
        let root = root_command();
        let args: Vec<String> = [
            "new",
            "--capability",
            "bot",
            "--bot-host",
            "azure-functions",
            "--app-name",
            "demo",
            "--folder",
        ]
        .iter()
        .map(|s| s.to_string())
        .chain(std::iter::once(dir.path().to_string_lossy().into_owned()))
        .collect();
        let resolved = find_command(&root, &args);
        let mut ctx = parse_args(&resolved, &root);

        let ui = MockUi::new();
        ui.push(MockResponse::MultiSelect(vec!["timer-trigger".into()]));
        ui.push(MockResponse::Select("typescript".into()));

        new_project(&mut ctx, &ui).await.unwrap();

        assert_eq!(ui.prompt_names(), vec!["function-triggers", "programming-language"]);
        assert_eq!(ui.progress().len(), 4);

        let written = fs::read_to_string(dir.path().join("demo").join(PROJECT_FILE)).unwrap();
        let project: ProjectFile = serde_json::from_str(&written).unwrap();
        assert_eq!(project.app_name, "demo");
        assert_eq!(project.answers.get_str("programming-language"), Some("typescript"));
        assert_eq!(ctx.telemetry_properties["capability"], "bot");
    }

    #[tokio::test]
    async fn refuses_occupied_folder() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("demo")).unwrap();
        fs::write(dir.path().join("demo").join("keep.txt"), "x").unwrap();

        let mut answers = Answers::new();
        answers.insert("folder", dir.path().to_string_lossy().into_owned());
        answers.insert("app-name", "demo");
        let mut task = ScaffoldTask::new(&answers).unwrap();

        let ui = crate::ui::mock::MockUi::new();
        let err = ui.run_with_progress(&mut task).await.unwrap_err();
        assert_eq!(err.name(), "ProjectFolderExistError");
    }
}
