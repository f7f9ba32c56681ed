//! ui::logging
//!
//! Diagnostic logging setup.
//!
//! The level comes from the parsed [`RuntimeConfig`]: `--debug` enables
//! `debug`, `--verbose` enables `info`, otherwise only warnings are shown.
//! `RUST_LOG` overrides both.

use tracing_subscriber::EnvFilter;

use super::output::Verbosity;
use crate::core::RuntimeConfig;

/// Filter directive for a verbosity level.
pub fn level_for(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "info",
        Verbosity::Debug => "debug",
    }
}

/// Install the stderr subscriber.
///
/// Only the first call in a process takes effect.
pub fn init(runtime: &RuntimeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(runtime.verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
