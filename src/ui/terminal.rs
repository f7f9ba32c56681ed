//! ui::terminal
//!
//! Line-oriented [`UserInteraction`] over a reader/writer pair.
//!
//! # Design
//!
//! Production uses stdin/stdout ([`TerminalUi::stdio`]); tests script the
//! input ([`TerminalUi::scripted`]). Invalid input re-prompts; end of input
//! is treated as the user canceling.
//!
//! In non-interactive mode no prompt is shown: a question resolves to its
//! default, a select with a single option resolves to that option, and
//! anything else fails with `MissingRequiredInputError` naming the flag that
//! would have answered it.

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use super::interaction::{
    InputTextConfig, InteractionResult, MessageLevel, MultiSelectConfig, ProgressHandler,
    SelectPathConfig, SingleSelectConfig, TimeConsumingTask, UserInteraction,
};
use crate::core::{FxError, CLI_SOURCE};
use crate::question::OptionItem;

struct TerminalIo {
    input: Box<dyn BufRead + Send>,
    output: Box<dyn Write + Send>,
}

/// Terminal host for prompts.
pub struct TerminalUi {
    io: Mutex<TerminalIo>,
    interactive: bool,
    /// Input is a real terminal; passwords are read without echo.
    tty: bool,
}

impl std::fmt::Debug for TerminalUi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalUi")
            .field("interactive", &self.interactive)
            .field("tty", &self.tty)
            .finish()
    }
}

fn io_error(e: io::Error) -> FxError {
    FxError::system(CLI_SOURCE, "TerminalIoError", e.to_string())
}

fn missing(name: &str) -> FxError {
    FxError::missing_required_input(&format!("--{}", name))
}

impl TerminalUi {
    /// Prompt on stdin/stdout.
    pub fn stdio(interactive: bool) -> Self {
        let tty = io::stdin().is_terminal();
        Self {
            io: Mutex::new(TerminalIo {
                input: Box::new(BufReader::new(io::stdin())),
                output: Box::new(io::stdout()),
            }),
            interactive,
            tty,
        }
    }

    /// Prompt on arbitrary streams.
    pub fn scripted<R, W>(input: R, output: W, interactive: bool) -> Self
    where
        R: BufRead + Send + 'static,
        W: Write + Send + 'static,
    {
        Self {
            io: Mutex::new(TerminalIo {
                input: Box::new(input),
                output: Box::new(output),
            }),
            interactive,
            tty: false,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn io(&self) -> MutexGuard<'_, TerminalIo> {
        self.io.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_line(&self, line: &str) -> InteractionResult<()> {
        let mut io = self.io();
        writeln!(io.output, "{}", line).map_err(io_error)?;
        io.output.flush().map_err(io_error)
    }

    /// Show `prompt` and read one trimmed line.
    fn ask(&self, prompt: &str) -> InteractionResult<String> {
        let mut io = self.io();
        write!(io.output, "{}", prompt).map_err(io_error)?;
        io.output.flush().map_err(io_error)?;

        let mut line = String::new();
        let read = io.input.read_line(&mut line).map_err(io_error)?;
        if read == 0 {
            return Err(FxError::user_cancel());
        }
        Ok(line.trim().to_string())
    }

    fn ask_secret(&self, prompt: &str) -> InteractionResult<String> {
        if self.tty {
            rpassword::prompt_password(prompt).map_err(io_error)
        } else {
            self.ask(prompt)
        }
    }

    fn list_options(&self, title: &str, options: &[OptionItem]) -> InteractionResult<()> {
        self.write_line(&format!("? {}", title))?;
        for (i, option) in options.iter().enumerate() {
            let line = match &option.detail {
                Some(detail) => format!("  {}) {} - {}", i + 1, option.label, detail),
                None => format!("  {}) {}", i + 1, option.label),
            };
            self.write_line(&line)?;
        }
        Ok(())
    }

    /// Map a typed token (1-based number, id or CLI name) to an option id.
    fn pick(options: &[OptionItem], token: &str) -> Option<String> {
        if let Ok(n) = token.parse::<usize>() {
            return options.get(n.checked_sub(1)?).map(|o| o.id.clone());
        }
        options
            .iter()
            .find(|o| o.matches(token))
            .map(|o| o.id.clone())
    }

    fn choose_one(
        &self,
        title: &str,
        options: &[OptionItem],
        default: Option<&str>,
    ) -> InteractionResult<String> {
        if options.is_empty() {
            return Err(FxError::user(
                CLI_SOURCE,
                "EmptyOptionsError",
                format!("no options available for '{}'", title),
            ));
        }
        self.list_options(title, options)?;
        let prompt = match default {
            Some(d) => format!("Select an option [{}]: ", d),
            None => "Select an option: ".to_string(),
        };
        loop {
            let line = self.ask(&prompt)?;
            if line.is_empty() {
                if let Some(d) = default {
                    return Ok(d.to_string());
                }
            } else if let Some(id) = Self::pick(options, &line) {
                return Ok(id);
            }
            self.write_line(&format!(
                "Invalid selection, enter a number between 1 and {}",
                options.len()
            ))?;
        }
    }

    fn ask_path(&self, config: &SelectPathConfig) -> InteractionResult<String> {
        if !self.interactive {
            return config.default.clone().ok_or_else(|| missing(&config.name));
        }
        let prompt = match &config.default {
            Some(d) => format!("? {} [{}]: ", config.title, d),
            None => format!("? {}: ", config.title),
        };
        loop {
            let line = self.ask(&prompt)?;
            if !line.is_empty() {
                return Ok(line);
            }
            if let Some(d) = &config.default {
                return Ok(d.clone());
            }
            self.write_line("A value is required.")?;
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Progress for one task: a bar on a terminal, plain step lines otherwise.
struct TerminalProgress<'a> {
    bar: ProgressBar,
    /// Set when the bar is hidden; steps are echoed as lines instead.
    echo: Option<&'a TerminalUi>,
}

impl<'a> TerminalProgress<'a> {
    fn new(ui: &'a TerminalUi, title: &str, total: usize) -> Self {
        let target = if ui.tty {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let bar = ProgressBar::with_draw_target(Some(total as u64), target);
        if let Ok(style) = ProgressStyle::with_template("{prefix} [{bar:30}] {pos}/{len} {msg}") {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_prefix(title.to_string());
        let echo = bar.is_hidden().then_some(ui);
        Self { bar, echo }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressHandler for TerminalProgress<'_> {
    fn next(&self, detail: &str) {
        self.bar.set_message(detail.to_string());
        self.bar.inc(1);
        let Some(ui) = self.echo else {
            return;
        };
        let line = match self.bar.length() {
            Some(total) => format!("  [{}/{}] {}", self.bar.position(), total, detail),
            None => format!("  {}", detail),
        };
        if let Err(e) = ui.write_line(&line) {
            tracing::debug!(error = %e, "failed to report progress");
        }
    }
}

#[async_trait]
impl UserInteraction for TerminalUi {
    async fn select_option(&self, config: SingleSelectConfig) -> InteractionResult<String> {
        if !self.interactive {
            if let Some(d) = config.default {
                return Ok(d);
            }
            if let [only] = config.options.as_slice() {
                return Ok(only.id.clone());
            }
            return Err(missing(&config.name));
        }
        self.choose_one(&config.title, &config.options, config.default.as_deref())
    }

    async fn select_options(&self, config: MultiSelectConfig) -> InteractionResult<Vec<String>> {
        if !self.interactive {
            if config.default.is_empty() {
                return Err(missing(&config.name));
            }
            return Ok(config.default);
        }
        self.list_options(&config.title, &config.options)?;
        let prompt = if config.default.is_empty() {
            "Select options (comma separated): ".to_string()
        } else {
            format!("Select options (comma separated) [{}]: ", config.default.join(","))
        };
        loop {
            let line = self.ask(&prompt)?;
            if line.is_empty() {
                return Ok(config.default.clone());
            }
            let picked: Option<Vec<String>> = split_list(&line)
                .iter()
                .map(|token| Self::pick(&config.options, token))
                .collect();
            match picked {
                Some(ids) => return Ok(ids),
                None => self.write_line("Invalid selection, use numbers or option names")?,
            }
        }
    }

    async fn input_text(&self, config: InputTextConfig) -> InteractionResult<String> {
        if !self.interactive {
            return config.default.ok_or_else(|| missing(&config.name));
        }
        let prompt = match (&config.default, config.password) {
            (Some(d), false) => format!("? {} [{}]: ", config.title, d),
            _ => format!("? {}: ", config.title),
        };
        loop {
            let line = if config.password {
                self.ask_secret(&prompt)?
            } else {
                self.ask(&prompt)?
            };
            let value = match (line.is_empty(), &config.default) {
                (true, Some(d)) => d.clone(),
                (true, None) => {
                    self.write_line("A value is required.")?;
                    continue;
                }
                (false, _) => line,
            };
            match config.validation.as_ref().map(|rule| rule.validate(&value)) {
                Some(Err(reason)) => self.write_line(&format!("Invalid input: {}", reason))?,
                _ => return Ok(value),
            }
        }
    }

    async fn select_folder(&self, config: SelectPathConfig) -> InteractionResult<PathBuf> {
        self.ask_path(&config).map(PathBuf::from)
    }

    async fn select_file(&self, config: SelectPathConfig) -> InteractionResult<PathBuf> {
        self.ask_path(&config).map(PathBuf::from)
    }

    async fn select_files(&self, config: SelectPathConfig) -> InteractionResult<Vec<PathBuf>> {
        let raw = self.ask_path(&config)?;
        Ok(split_list(&raw).into_iter().map(PathBuf::from).collect())
    }

    async fn open_url(&self, link: &str) -> InteractionResult<()> {
        self.write_line(&format!("Opening {}", link))?;
        if !self.interactive {
            return Ok(());
        }
        open::that(link).map_err(|e| {
            FxError::system(
                CLI_SOURCE,
                "OpenUrlError",
                format!("failed to open {}: {}", link, e),
            )
        })
    }

    async fn show_message(
        &self,
        level: MessageLevel,
        message: &str,
        _modal: bool,
        items: &[String],
    ) -> InteractionResult<Option<String>> {
        let line = match level {
            MessageLevel::Info => message.to_string(),
            MessageLevel::Warn => format!("warning: {}", message),
            MessageLevel::Error => format!("error: {}", message),
        };
        self.write_line(&line)?;
        if items.is_empty() || !self.interactive {
            return Ok(None);
        }
        let options: Vec<OptionItem> = items.iter().map(|i| OptionItem::from(i.as_str())).collect();
        self.choose_one(message, &options, None).map(Some)
    }

    async fn run_with_progress(
        &self,
        task: &mut (dyn TimeConsumingTask + '_),
    ) -> InteractionResult<()> {
        if !self.tty {
            self.write_line(task.title())?;
        }
        let progress = TerminalProgress::new(self, task.title(), task.total_steps());
        let result = task.run(&progress).await;
        progress.finish();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::StringValidation;
    use std::io::Cursor;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Shared {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn ui(input: &str) -> (TerminalUi, Shared) {
        let out = Shared::default();
        let ui = TerminalUi::scripted(Cursor::new(input.to_string()), out.clone(), true);
        (ui, out)
    }

    fn select(default: Option<&str>) -> SingleSelectConfig {
        SingleSelectConfig {
            name: "capability".into(),
            title: "Capability".into(),
            options: vec![
                OptionItem::new("tab", "Tab"),
                OptionItem::new("bot", "Bot").cli_name("bot-app"),
            ],
            default: default.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn select_by_number_after_invalid_input() {
        let (ui, out) = ui("7\n2\n");
        assert_eq!(ui.select_option(select(None)).await.unwrap(), "bot");
        let text = out.text();
        assert!(text.contains("? Capability"));
        assert!(text.contains("  1) Tab"));
        assert!(text.contains("Invalid selection"));
    }

    #[tokio::test]
    async fn select_by_cli_name_or_default() {
        let (ui, _) = ui("bot-app\n\n");
        assert_eq!(ui.select_option(select(None)).await.unwrap(), "bot");
        assert_eq!(ui.select_option(select(Some("tab"))).await.unwrap(), "tab");
    }

    #[tokio::test]
    async fn end_of_input_cancels() {
        let (ui, _) = ui("");
        assert!(ui.select_option(select(None)).await.unwrap_err().is_user_cancel());
    }

    #[tokio::test]
    async fn multi_select_lists() {
        let (ui, _) = ui("1, bot\n");
        let ids = ui
            .select_options(MultiSelectConfig {
                name: "features".into(),
                title: "Features".into(),
                options: select(None).options,
                default: vec![],
            })
            .await
            .unwrap();
        assert_eq!(ids, vec!["tab", "bot"]);
    }

    #[tokio::test]
    async fn text_reprompts_until_valid() {
        let (ui, out) = ui("\nwaytoolong\nok\n");
        let text = ui
            .input_text(InputTextConfig {
                name: "app-name".into(),
                title: "App name".into(),
                default: None,
                password: false,
                validation: Some(StringValidation::new().max_length(4)),
            })
            .await
            .unwrap();
        assert_eq!(text, "ok");
        let shown = out.text();
        assert!(shown.contains("A value is required."));
        assert!(shown.contains("Invalid input: must be at most 4 characters"));
    }

    #[tokio::test]
    async fn non_interactive_uses_defaults_or_fails() {
        let ui = TerminalUi::scripted(Cursor::new(String::new()), Shared::default(), false);

        assert_eq!(ui.select_option(select(Some("bot"))).await.unwrap(), "bot");
        let err = ui.select_option(select(None)).await.unwrap_err();
        assert_eq!(err.name(), "MissingRequiredInputError");
        assert!(err.message().contains("--capability"));

        let folder = ui
            .select_folder(SelectPathConfig {
                name: "folder".into(),
                title: "Folder".into(),
                default: Some("./".into()),
            })
            .await
            .unwrap();
        assert_eq!(folder, PathBuf::from("./"));
    }

    #[tokio::test]
    async fn files_are_comma_separated() {
        let (ui, _) = ui("a.json, b.json\n");
        let files = ui
            .select_files(SelectPathConfig {
                name: "files".into(),
                title: "Files".into(),
                default: None,
            })
            .await
            .unwrap();
        assert_eq!(files, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
    }

    #[tokio::test]
    async fn message_with_items_returns_choice() {
        let (ui, out) = ui("2\n");
        let choice = ui
            .show_message(
                MessageLevel::Warn,
                "Folder exists",
                true,
                &["Overwrite".to_string(), "Cancel".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(choice.as_deref(), Some("Cancel"));
        assert!(out.text().starts_with("warning: Folder exists"));
    }

    struct Steps(Vec<&'static str>);

    #[async_trait]
    impl TimeConsumingTask for Steps {
        fn title(&self) -> &str {
            "Scaffolding"
        }
        fn total_steps(&self) -> usize {
            self.0.len()
        }
        async fn run(&mut self, progress: &dyn ProgressHandler) -> InteractionResult<()> {
            for step in &self.0 {
                progress.next(step);
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn progress_counts_steps() {
        let (ui, out) = ui("");
        ui.run_with_progress(&mut Steps(vec!["copy", "write"]))
            .await
            .unwrap();
        assert_eq!(out.text(), "Scaffolding\n  [1/2] copy\n  [2/2] write\n");
    }

    #[test]
    fn scripted_progress_bar_is_hidden_and_advances() {
        let (ui, out) = ui("");
        let progress = TerminalProgress::new(&ui, "Scaffolding", 3);
        assert!(progress.bar.is_hidden());

        progress.next("copy");
        progress.next("write");
        assert_eq!(progress.bar.position(), 2);
        assert_eq!(progress.bar.length(), Some(3));

        progress.finish();
        assert!(progress.bar.is_finished());
        assert_eq!(out.text(), "  [1/3] copy\n  [2/3] write\n");
    }
}
