//! core
//!
//! Domain types shared by every layer.
//!
//! # Modules
//!
//! - [`option`] - Option and positional argument declarations
//! - [`command`] - The command tree and the typed handler seam
//! - [`context`] - Per-invocation parse results and runtime configuration
//! - [`errors`] - Structured error values
//! - [`config`] - User settings file

pub mod command;
pub mod config;
pub mod context;
pub mod errors;
pub mod option;

pub use command::{CliCommand, CommandHandler, CommandId};
pub use context::{CliContext, RuntimeConfig};
pub use errors::{assemble_error, ErrorKind, FxError, CLI_SOURCE, ISSUE_LINK};
pub use option::{CommandArgument, CommandOption, OptionKind, OptionValue};
