//! ui::mock
//!
//! Scripted [`UserInteraction`] for deterministic testing.
//!
//! # Design
//!
//! Responses are queued up front and consumed in prompt order. Every prompt
//! is recorded so tests can assert which questions were asked. A prompt with
//! no queued response fails with a `NotSupportedError`, which makes a missing
//! script line show up as a test failure rather than a hang.
//!
//! # Example
//!
//! ```
//! use teamsfx::ui::mock::{MockResponse, MockUi};
//! use teamsfx::ui::{SingleSelectConfig, UserInteraction};
//!
//! # tokio_test::block_on(async {
//! let ui = MockUi::new();
//! ui.push(MockResponse::Select("bot".into()));
//!
//! let id = ui.select_option(SingleSelectConfig {
//!     name: "capability".into(),
//!     title: "Capability".into(),
//!     options: vec!["tab".into(), "bot".into()],
//!     default: None,
//! }).await.unwrap();
//!
//! assert_eq!(id, "bot");
//! assert_eq!(ui.prompt_names(), vec!["capability"]);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::interaction::{
    InputTextConfig, InteractionResult, MessageLevel, MultiSelectConfig, ProgressHandler,
    SelectPathConfig, SingleSelectConfig, TimeConsumingTask, UserInteraction,
};
use crate::core::{FxError, CLI_SOURCE};

/// A scripted answer.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Select(String),
    MultiSelect(Vec<String>),
    Text(String),
    Path(PathBuf),
    Paths(Vec<PathBuf>),
    Cancel,
    Fail(FxError),
}

/// Which kind of prompt was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    SingleSelect,
    MultiSelect,
    Text,
    Password,
    Folder,
    File,
    Files,
}

/// A recorded prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockPrompt {
    pub kind: PromptKind,
    pub name: String,
    pub title: String,
}

type Selector = Arc<dyn Fn(&SingleSelectConfig) -> String + Send + Sync>;

#[derive(Default)]
struct MockUiInner {
    responses: VecDeque<MockResponse>,
    prompts: Vec<MockPrompt>,
    messages: Vec<(MessageLevel, String)>,
    opened: Vec<String>,
    progress: Vec<String>,
    selector: Option<Selector>,
}

/// Scripted user interaction.
///
/// Clones share the same script and recordings.
#[derive(Clone, Default)]
pub struct MockUi {
    inner: Arc<Mutex<MockUiInner>>,
}

impl fmt::Debug for MockUi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockUi")
            .field("prompts", &self.prompts())
            .finish()
    }
}

impl MockUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next response.
    pub fn push(&self, response: MockResponse) {
        self.lock().responses.push_back(response);
    }

    /// Answer single-select prompts by calling `selector` instead of the queue.
    pub fn with_selector<F>(self, selector: F) -> Self
    where
        F: Fn(&SingleSelectConfig) -> String + Send + Sync + 'static,
    {
        self.lock().selector = Some(Arc::new(selector));
        self
    }

    pub fn prompts(&self) -> Vec<MockPrompt> {
        self.lock().prompts.clone()
    }

    pub fn prompt_names(&self) -> Vec<String> {
        self.lock().prompts.iter().map(|p| p.name.clone()).collect()
    }

    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.lock().messages.clone()
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.lock().opened.clone()
    }

    /// Progress details reported by tasks, in order.
    pub fn progress(&self) -> Vec<String> {
        self.lock().progress.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockUiInner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn next(&self, kind: PromptKind, name: &str, title: &str) -> InteractionResult<MockResponse> {
        let mut inner = self.lock();
        inner.prompts.push(MockPrompt {
            kind,
            name: name.to_string(),
            title: title.to_string(),
        });
        match inner.responses.pop_front() {
            Some(MockResponse::Cancel) => Err(FxError::user_cancel()),
            Some(MockResponse::Fail(e)) => Err(e),
            Some(response) => Ok(response),
            None => Err(FxError::not_supported(&format!("unscripted prompt '{}'", name))),
        }
    }
}

fn mismatch(name: &str, response: &MockResponse) -> FxError {
    FxError::system(
        CLI_SOURCE,
        "MockMismatchError",
        format!("prompt '{}' got scripted {:?}", name, response),
    )
}

struct RecordingProgress<'a> {
    ui: &'a MockUi,
}

impl ProgressHandler for RecordingProgress<'_> {
    fn next(&self, detail: &str) {
        self.ui.lock().progress.push(detail.to_string());
    }
}

#[async_trait]
impl UserInteraction for MockUi {
    async fn select_option(&self, config: SingleSelectConfig) -> InteractionResult<String> {
        let selector = self.lock().selector.clone();
        if let Some(selector) = selector {
            self.lock().prompts.push(MockPrompt {
                kind: PromptKind::SingleSelect,
                name: config.name.clone(),
                title: config.title.clone(),
            });
            return Ok(selector(&config));
        }
        match self.next(PromptKind::SingleSelect, &config.name, &config.title)? {
            MockResponse::Select(id) => Ok(id),
            other => Err(mismatch(&config.name, &other)),
        }
    }

    async fn select_options(&self, config: MultiSelectConfig) -> InteractionResult<Vec<String>> {
        match self.next(PromptKind::MultiSelect, &config.name, &config.title)? {
            MockResponse::MultiSelect(ids) => Ok(ids),
            other => Err(mismatch(&config.name, &other)),
        }
    }

    async fn input_text(&self, config: InputTextConfig) -> InteractionResult<String> {
        let kind = if config.password {
            PromptKind::Password
        } else {
            PromptKind::Text
        };
        match self.next(kind, &config.name, &config.title)? {
            MockResponse::Text(text) => Ok(text),
            other => Err(mismatch(&config.name, &other)),
        }
    }

    async fn select_folder(&self, config: SelectPathConfig) -> InteractionResult<PathBuf> {
        match self.next(PromptKind::Folder, &config.name, &config.title)? {
            MockResponse::Path(path) => Ok(path),
            other => Err(mismatch(&config.name, &other)),
        }
    }

    async fn select_file(&self, config: SelectPathConfig) -> InteractionResult<PathBuf> {
        match self.next(PromptKind::File, &config.name, &config.title)? {
            MockResponse::Path(path) => Ok(path),
            other => Err(mismatch(&config.name, &other)),
        }
    }

    async fn select_files(&self, config: SelectPathConfig) -> InteractionResult<Vec<PathBuf>> {
        match self.next(PromptKind::Files, &config.name, &config.title)? {
            MockResponse::Paths(paths) => Ok(paths),
            other => Err(mismatch(&config.name, &other)),
        }
    }

    async fn open_url(&self, link: &str) -> InteractionResult<()> {
        self.lock().opened.push(link.to_string());
        Ok(())
    }

    async fn show_message(
        &self,
        level: MessageLevel,
        message: &str,
        _modal: bool,
        items: &[String],
    ) -> InteractionResult<Option<String>> {
        self.lock().messages.push((level, message.to_string()));
        Ok(items.first().cloned())
    }

    async fn run_with_progress(
        &self,
        task: &mut (dyn TimeConsumingTask + '_),
    ) -> InteractionResult<()> {
        self.lock().progress.push(format!("start: {}", task.title()));
        task.run(&RecordingProgress { ui: self }).await
    }
}
