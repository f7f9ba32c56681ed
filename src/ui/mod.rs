//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`interaction`] - The `UserInteraction` abstraction and prompt configs
//! - [`terminal`] - Terminal implementation of `UserInteraction`
//! - [`mock`] - Scripted implementation for tests
//! - [`output`] - Output formatting and display
//! - [`logging`] - Diagnostic logging setup
//!
//! # Design
//!
//! All prompts go through [`UserInteraction`] so the question traversal never
//! touches a terminal directly. Whether prompts may be shown is decided once
//! per invocation from the parsed runtime configuration and handed to the
//! implementation when it is created.

pub mod interaction;
pub mod logging;
pub mod mock;
pub mod output;
pub mod terminal;

pub use interaction::{
    InputTextConfig, InteractionResult, MessageLevel, MultiSelectConfig, ProgressHandler,
    SelectFileConfig, SelectFilesConfig, SelectFolderConfig, SelectPathConfig, SingleSelectConfig,
    TimeConsumingTask, UserInteraction,
};
pub use terminal::TerminalUi;
