//! question::answers
//!
//! The answer bag filled in by traversal.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::OptionValue;

/// One collected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    List(Vec<String>),
}

impl Answer {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Answer::Text(s) => Some(s),
            Answer::List(_) => None,
        }
    }

    /// View as a list; a text answer is a one-item list.
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            Answer::Text(s) => vec![s.as_str()],
            Answer::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Answer::Text(s.to_string())
    }
}

impl From<String> for Answer {
    fn from(s: String) -> Self {
        Answer::Text(s)
    }
}

impl From<Vec<String>> for Answer {
    fn from(items: Vec<String>) -> Self {
        Answer::List(items)
    }
}

impl From<&OptionValue> for Answer {
    fn from(value: &OptionValue) -> Self {
        match value {
            OptionValue::Bool(b) => Answer::Text(b.to_string()),
            OptionValue::Text(s) => Answer::Text(s.clone()),
            OptionValue::List(items) => Answer::List(items.clone()),
        }
    }
}

/// Answers keyed by question name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(BTreeMap<String, Answer>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed answers from parsed command-line values.
    pub fn from_options<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a OptionValue)>,
    {
        let mut answers = Self::new();
        answers.merge_options(values);
        answers
    }

    /// Add parsed command-line values, keeping answers already present.
    pub fn merge_options<'a, I>(&mut self, values: I)
    where
        I: IntoIterator<Item = (&'a String, &'a OptionValue)>,
    {
        for (name, value) in values {
            self.0.entry(name.clone()).or_insert_with(|| value.into());
        }
    }

    pub fn get(&self, name: &str) -> Option<&Answer> {
        self.0.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Answer::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, answer: impl Into<Answer>) {
        self.0.insert(name.into(), answer.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Answer)> {
        self.0.iter()
    }
}
