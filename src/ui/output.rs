//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Command results go to stdout; errors and warnings go to stderr. Links are
//! underlined when stderr is a color-capable terminal. Diagnostics that only
//! matter with `--verbose` or `--debug` are emitted through `tracing`
//! instead (see [`super::logging`]).

use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Normal mode - standard output
    Normal,
    /// Verbose mode - additional information
    Verbose,
    /// Debug mode - diagnostic output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags; `debug` wins over `verbose`.
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        if debug {
            Verbosity::Debug
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message to stdout.
pub fn info(message: impl Display) {
    println!("{}", message);
}

/// Print an error line to stderr, unprefixed.
pub fn error(message: impl Display) {
    eprintln!("{}", message);
}

/// Print a warning to stderr.
pub fn warn(message: impl Display) {
    eprintln!("warning: {}", message);
}

/// Style a URL for stderr.
pub fn hyperlink(link: &str) -> String {
    link.if_supports_color(Stream::Stderr, |l| l.underline())
        .to_string()
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}
