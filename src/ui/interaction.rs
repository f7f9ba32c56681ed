//! ui::interaction
//!
//! The host-independent "ask the human" abstraction.
//!
//! # Design
//!
//! Every method returns `Result<T, FxError>`: `Ok` is the answer, `Err` is a
//! cancellation ([`FxError::user_cancel`]), a host that cannot perform the
//! interaction ([`FxError::not_supported`]) or a missing answer in
//! non-interactive mode. Callers stop at the first error.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::core::FxError;
use crate::question::{OptionItem, StringValidation};

/// Result of an interaction.
pub type InteractionResult<T> = Result<T, FxError>;

/// Prompt for one choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleSelectConfig {
    pub name: String,
    pub title: String,
    pub options: Vec<OptionItem>,
    /// Id of the default option.
    pub default: Option<String>,
}

/// Prompt for any number of choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSelectConfig {
    pub name: String,
    pub title: String,
    pub options: Vec<OptionItem>,
    pub default: Vec<String>,
}

/// Prompt for free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTextConfig {
    pub name: String,
    pub title: String,
    pub default: Option<String>,
    /// Do not echo the input.
    pub password: bool,
    pub validation: Option<StringValidation>,
}

/// Prompt for a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectPathConfig {
    pub name: String,
    pub title: String,
    pub default: Option<String>,
}

pub type SelectFolderConfig = SelectPathConfig;
pub type SelectFileConfig = SelectPathConfig;
pub type SelectFilesConfig = SelectPathConfig;

/// Severity of a message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warn,
    Error,
}

/// Receives step notifications from a running task.
pub trait ProgressHandler: Send + Sync {
    fn next(&self, detail: &str);
}

/// Work shown to the user with a progress indicator.
#[async_trait]
pub trait TimeConsumingTask: Send {
    fn title(&self) -> &str;

    fn total_steps(&self) -> usize;

    async fn run(&mut self, progress: &dyn ProgressHandler) -> InteractionResult<()>;
}

/// Asks the human.
#[async_trait]
pub trait UserInteraction: Send + Sync {
    /// Returns the id of the selected option.
    async fn select_option(&self, config: SingleSelectConfig) -> InteractionResult<String>;

    /// Returns the ids of the selected options.
    async fn select_options(&self, config: MultiSelectConfig) -> InteractionResult<Vec<String>>;

    async fn input_text(&self, config: InputTextConfig) -> InteractionResult<String>;

    async fn select_folder(&self, config: SelectFolderConfig) -> InteractionResult<PathBuf>;

    async fn select_file(&self, config: SelectFileConfig) -> InteractionResult<PathBuf>;

    async fn select_files(&self, config: SelectFilesConfig) -> InteractionResult<Vec<PathBuf>>;

    async fn open_url(&self, link: &str) -> InteractionResult<()>;

    /// Show a message; returns the chosen item, if any were offered.
    async fn show_message(
        &self,
        level: MessageLevel,
        message: &str,
        modal: bool,
        items: &[String],
    ) -> InteractionResult<Option<String>>;

    async fn run_with_progress(
        &self,
        task: &mut (dyn TimeConsumingTask + '_),
    ) -> InteractionResult<()>;
}
