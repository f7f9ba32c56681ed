//! core::errors
//!
//! Structured error values shared by the engine, the question traversal and
//! the command handlers.
//!
//! # Design
//!
//! Every failure that reaches the user is an [`FxError`]. Input problems are
//! created as values ([`FxError::missing_required_input`],
//! [`FxError::input_validation`]) and returned through `Result`. Anything
//! else a handler returns is normalized once, at the top of the engine, by
//! [`assemble_error`].
//!
//! # Display
//!
//! An error renders as `<source>.<name>: <message>`, which is exactly the
//! line the engine prints on failure.

use thiserror::Error;

/// Source tag for errors raised by the CLI itself.
pub const CLI_SOURCE: &str = "TeamsfxCLI";

/// Where users report unexpected failures.
pub const ISSUE_LINK: &str = "https://github.com/OfficeDev/TeamsFx/issues/new";

/// Category of an [`FxError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The user supplied bad or missing input.
    User,
    /// Something unexpected failed inside the tool.
    System,
    /// The user backed out of a prompt.
    UserCancel,
}

/// A structured error carried through `Result` values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{origin}.{name}: {message}")]
pub struct FxError {
    kind: ErrorKind,
    origin: String,
    name: String,
    message: String,
    help_link: Option<String>,
    issue_link: Option<String>,
}

impl FxError {
    /// Create a user error.
    pub fn user(
        origin: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: ErrorKind::User,
            origin: origin.into(),
            name: name.into(),
            message: message.into(),
            help_link: None,
            issue_link: None,
        }
    }

    /// Create a system error.
    pub fn system(
        origin: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: ErrorKind::System,
            origin: origin.into(),
            name: name.into(),
            message: message.into(),
            help_link: None,
            issue_link: None,
        }
    }

    /// A required option or argument has no value after parsing and defaulting.
    pub fn missing_required_input(display_name: &str) -> Self {
        Self::user(
            CLI_SOURCE,
            "MissingRequiredInputError",
            format!("The following required input is missing: {}", display_name),
        )
    }

    /// A supplied value was rejected.
    pub fn input_validation(display_name: &str, reason: &str) -> Self {
        Self::user(
            CLI_SOURCE,
            "InputValidationError",
            format!("Input '{}' is invalid: {}", display_name, reason),
        )
    }

    /// The user canceled an interaction.
    pub fn user_cancel() -> Self {
        Self {
            kind: ErrorKind::UserCancel,
            origin: CLI_SOURCE.to_string(),
            name: "UserCancelError".to_string(),
            message: "User canceled.".to_string(),
            help_link: None,
            issue_link: None,
        }
    }

    /// The host cannot perform the requested interaction.
    pub fn not_supported(what: &str) -> Self {
        Self::system(
            CLI_SOURCE,
            "NotSupportedError",
            format!("'{}' is not supported by this host", what),
        )
    }

    /// Attach a help link.
    pub fn with_help_link(mut self, link: impl Into<String>) -> Self {
        self.help_link = Some(link.into());
        self
    }

    /// Attach an issue link.
    pub fn with_issue_link(mut self, link: impl Into<String>) -> Self {
        self.issue_link = Some(link.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The component that raised the error.
    pub fn source_name(&self) -> &str {
        &self.origin
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn help_link(&self) -> Option<&str> {
        self.help_link.as_deref()
    }

    pub fn issue_link(&self) -> Option<&str> {
        self.issue_link.as_deref()
    }

    /// Whether this error represents a user cancellation.
    pub fn is_user_cancel(&self) -> bool {
        self.kind == ErrorKind::UserCancel
    }
}

/// Normalize any handler error into an [`FxError`].
///
/// An `FxError` anywhere in the chain is returned as-is. Everything else
/// becomes a system `UnhandledError` that points at the issue tracker.
pub fn assemble_error(error: anyhow::Error) -> FxError {
    if let Some(fx) = error.chain().find_map(|e| e.downcast_ref::<FxError>()) {
        return fx.clone();
    }
    FxError::system(CLI_SOURCE, "UnhandledError", format!("{:#}", error)).with_issue_link(ISSUE_LINK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context as _;

    #[test]
    fn display_is_source_name_message() {
        let err = FxError::missing_required_input("--name");
        assert_eq!(
            err.to_string(),
            "TeamsfxCLI.MissingRequiredInputError: The following required input is missing: --name"
        );
    }

    #[test]
    fn cancel_is_detected() {
        assert!(FxError::user_cancel().is_user_cancel());
        assert!(!FxError::not_supported("selectFiles").is_user_cancel());
    }

    #[test]
    fn assemble_keeps_structured_errors() {
        let original = FxError::input_validation("<option>", "bad").with_help_link("https://aka.ms/x");
        let wrapped = anyhow::Error::new(original.clone()).context("while running handler");
        assert_eq!(assemble_error(wrapped), original);
    }

    #[test]
    fn assemble_wraps_foreign_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let res: Result<(), std::io::Error> = Err(io);
        let err = res.context("writing project").unwrap_err();

        let fx = assemble_error(err);
        assert_eq!(fx.kind(), ErrorKind::System);
        assert_eq!(fx.name(), "UnhandledError");
        assert!(fx.message().contains("writing project"));
        assert!(fx.message().contains("disk on fire"));
        assert_eq!(fx.issue_link(), Some(ISSUE_LINK));
    }
}
