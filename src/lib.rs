//! teamsfx - Command and question engine for the Teams Toolkit CLI
//!
//! A declarative command tree is resolved against argv, its options are
//! parsed and validated, and the matching handler collects whatever is still
//! missing by walking a tree of questions.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command tree, handlers and the process entry point
//! - [`engine`] - Resolve -> Parse -> Validate -> Dispatch -> Report
//! - [`core`] - Command declarations, per-invocation context, errors, settings
//! - [`question`] - Question trees and their traversal
//! - [`ui`] - User interaction, output and logging
//! - [`telemetry`] - Usage events
//!
//! # Invariants
//!
//! 1. The command tree is never mutated after it is built
//! 2. Handlers only run on validated input
//! 3. Every failure leaves the engine as a structured [`core::FxError`]
//! 4. Prompts only ever go through [`ui::UserInteraction`]

pub mod cli;
pub mod core;
pub mod engine;
pub mod question;
pub mod telemetry;
pub mod ui;
