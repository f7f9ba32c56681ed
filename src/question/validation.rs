//! question::validation
//!
//! Rules applied to text answers, both typed at a prompt and supplied on the
//! command line.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Constraints on a text answer.
///
/// A failed rule produces a human-readable reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StringValidation {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Regular expression the whole answer must match.
    pub pattern: Option<String>,
    /// Closed set of accepted answers.
    pub one_of: Option<Vec<String>>,
}

impl StringValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.one_of = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Check `input`, returning the reason it was rejected.
    pub fn validate(&self, input: &str) -> Result<(), String> {
        let len = input.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(format!("must be at least {} characters", min));
            }
        }
        if let Some(max) = self.max_length {
            if len > max {
                return Err(format!("must be at most {} characters", max));
            }
        }
        if let Some(pattern) = &self.pattern {
            let re = Regex::new(&format!("^(?:{})$", pattern))
                .map_err(|e| format!("invalid pattern '{}': {}", pattern, e))?;
            if !re.is_match(input) {
                return Err(format!("must match the pattern {}", pattern));
            }
        }
        if let Some(values) = &self.one_of {
            if !values.iter().any(|v| v == input) {
                return Err(format!("must be one of: {}", values.join(", ")));
            }
        }
        Ok(())
    }
}
