//! core::option
//!
//! Declarations of command options and positional arguments.
//!
//! # Design
//!
//! A [`CommandOption`] is declared once, when the command tree is built,
//! and never changes afterwards. Values supplied on the command line live in
//! the per-invocation [`crate::core::CliContext`], keyed by option name, so
//! the same tree can be resolved any number of times without cloning.
//!
//! Positional arguments use the same type; they are matched to argv tokens
//! by declaration order.
//!
//! # Example
//!
//! ```
//! use teamsfx::core::{CommandOption, OptionKind};
//!
//! let env = CommandOption::string("env")
//!     .describe("Target environment")
//!     .required()
//!     .default_value("dev");
//!
//! assert_eq!(env.kind, OptionKind::String);
//! assert!(env.required);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value type accepted by an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionKind {
    String,
    Boolean,
    SingleSelect,
    MultiSelect,
    Array,
}

impl OptionKind {
    /// Whether the option collects several values.
    pub fn is_list(self) -> bool {
        matches!(self, OptionKind::MultiSelect | OptionKind::Array)
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OptionKind::String => "string",
            OptionKind::Boolean => "boolean",
            OptionKind::SingleSelect => "singleSelect",
            OptionKind::MultiSelect => "multiSelect",
            OptionKind::Array => "array",
        };
        f.write_str(s)
    }
}

/// A parsed or default option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Text(String),
    List(Vec<String>),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// View the value as a list; a single text value is a one-item list.
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            OptionValue::Bool(_) => Vec::new(),
            OptionValue::Text(s) => vec![s.as_str()],
            OptionValue::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Text(s) => f.write_str(s),
            OptionValue::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(items: Vec<String>) -> Self {
        OptionValue::List(items)
    }
}

/// Declaration of a flag or positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOption {
    pub name: String,
    pub short_name: Option<String>,
    pub description: String,
    pub kind: OptionKind,
    pub default: Option<OptionValue>,
    pub required: bool,
    pub choices: Option<Vec<String>>,
    /// Hidden options are accepted but left out of help output.
    pub hidden: bool,
}

/// Positional arguments share the option declaration shape.
pub type CommandArgument = CommandOption;

impl CommandOption {
    pub fn new(name: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            name: name.into(),
            short_name: None,
            description: String::new(),
            kind,
            default: None,
            required: false,
            choices: None,
            hidden: false,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::String)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Boolean)
    }

    pub fn array(name: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Array)
    }

    /// A single-select option constrained to `choices`.
    pub fn single_select<I, S>(name: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, OptionKind::SingleSelect).choices(choices)
    }

    /// A multi-select option constrained to `choices`.
    pub fn multi_select<I, S>(name: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, OptionKind::MultiSelect).choices(choices)
    }

    pub fn short(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<OptionValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Whether `token` (with dashes already stripped) names this option.
    pub fn matches(&self, token: &str) -> bool {
        self.name == token || self.short_name.as_deref() == Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let opt = CommandOption::single_select("option", ["telemetry", "interactive"])
            .short("o")
            .describe("Settings key")
            .required();

        assert_eq!(opt.kind, OptionKind::SingleSelect);
        assert_eq!(opt.short_name.as_deref(), Some("o"));
        assert_eq!(
            opt.choices,
            Some(vec!["telemetry".to_string(), "interactive".to_string()])
        );
        assert!(opt.required);
        assert!(opt.default.is_none());
    }

    #[test]
    fn matches_name_or_short_name() {
        let opt = CommandOption::boolean("help").short("h");
        assert!(opt.matches("help"));
        assert!(opt.matches("h"));
        assert!(!opt.matches("hel"));
    }

    #[test]
    fn value_views() {
        let list = OptionValue::List(vec!["a".into(), "b".into()]);
        assert_eq!(list.as_list(), vec!["a", "b"]);
        assert_eq!(list.to_string(), "a,b");
        assert_eq!(OptionValue::from("x").as_list(), vec!["x"]);
        assert_eq!(OptionValue::from(true).as_bool(), Some(true));
        assert_eq!(OptionValue::from(true).as_str(), None);
    }

    #[test]
    fn value_serializes_untagged() {
        let json = serde_json::to_string(&OptionValue::List(vec!["a".into()])).unwrap();
        assert_eq!(json, r#"["a"]"#);
        let json = serde_json::to_string(&OptionValue::Bool(false)).unwrap();
        assert_eq!(json, "false");
    }
}
