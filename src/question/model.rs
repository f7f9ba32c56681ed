//! question::model
//!
//! Questions and the tree that orders them.
//!
//! # Design
//!
//! A [`QuestionNode`] wraps an optional [`Question`] (a node without one is a
//! *group*) plus an optional [`Condition`]. A condition is evaluated against
//! the parent's answer, or against a named earlier answer when the node has a
//! condition target. When it fails, the node and its whole subtree are
//! skipped.
//!
//! # Example
//!
//! ```
//! use teamsfx::question::{Condition, OptionItem, Question, QuestionNode};
//!
//! let mut root = QuestionNode::new(Question::single_select(
//!     "capability",
//!     "Select a capability",
//!     vec![OptionItem::new("tab", "Tab"), OptionItem::new("bot", "Bot")],
//! ));
//! root.add_child(
//!     QuestionNode::new(Question::text("bot-name", "Bot name"))
//!         .with_condition(Condition::Equals("bot".into())),
//! );
//!
//! assert_eq!(root.flatten().len(), 2);
//! ```

use serde::{Deserialize, Serialize};

use super::answers::Answer;
use super::validation::StringValidation;
use crate::core::{CommandOption, OptionValue};

/// A selectable choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub id: String,
    pub label: String,
    /// Name accepted on the command line, when different from `id`.
    pub cli_name: Option<String>,
    pub detail: Option<String>,
}

impl OptionItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            cli_name: None,
            detail: None,
        }
    }

    pub fn cli_name(mut self, name: impl Into<String>) -> Self {
        self.cli_name = Some(name.into());
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Name shown and accepted on the command line.
    pub fn cli_id(&self) -> &str {
        self.cli_name.as_deref().unwrap_or(&self.id)
    }

    /// Whether `token` selects this item (by id or CLI name).
    pub fn matches(&self, token: &str) -> bool {
        self.id == token || self.cli_name.as_deref() == Some(token)
    }
}

impl From<&str> for OptionItem {
    fn from(id: &str) -> Self {
        OptionItem::new(id, id)
    }
}

/// Type-specific part of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    SingleSelect {
        options: Vec<OptionItem>,
        /// Resolve without prompting when there is exactly one option.
        skip_single_option: bool,
    },
    MultiSelect {
        options: Vec<OptionItem>,
        skip_single_option: bool,
    },
    Text {
        validation: Option<StringValidation>,
    },
    Password {
        validation: Option<StringValidation>,
    },
    Folder,
    File,
    Files,
}

/// A typed prompt descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Key of the answer in the answer bag.
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub default: Option<Answer>,
    pub kind: QuestionKind,
}

impl Question {
    fn with_kind(name: impl Into<String>, title: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            description: None,
            default: None,
            kind,
        }
    }

    pub fn single_select(
        name: impl Into<String>,
        title: impl Into<String>,
        options: Vec<OptionItem>,
    ) -> Self {
        Self::with_kind(
            name,
            title,
            QuestionKind::SingleSelect {
                options,
                skip_single_option: false,
            },
        )
    }

    pub fn multi_select(
        name: impl Into<String>,
        title: impl Into<String>,
        options: Vec<OptionItem>,
    ) -> Self {
        Self::with_kind(
            name,
            title,
            QuestionKind::MultiSelect {
                options,
                skip_single_option: false,
            },
        )
    }

    pub fn text(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self::with_kind(name, title, QuestionKind::Text { validation: None })
    }

    pub fn password(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self::with_kind(name, title, QuestionKind::Password { validation: None })
    }

    pub fn folder(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self::with_kind(name, title, QuestionKind::Folder)
    }

    pub fn file(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self::with_kind(name, title, QuestionKind::File)
    }

    pub fn files(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self::with_kind(name, title, QuestionKind::Files)
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_answer(mut self, answer: impl Into<Answer>) -> Self {
        self.default = Some(answer.into());
        self
    }

    /// Enable auto-selection for select questions; no-op otherwise.
    pub fn skip_single_option(mut self) -> Self {
        match &mut self.kind {
            QuestionKind::SingleSelect {
                skip_single_option, ..
            }
            | QuestionKind::MultiSelect {
                skip_single_option, ..
            } => *skip_single_option = true,
            _ => {}
        }
        self
    }

    /// Attach validation to text and password questions; no-op otherwise.
    pub fn validation(mut self, rule: StringValidation) -> Self {
        match &mut self.kind {
            QuestionKind::Text { validation } | QuestionKind::Password { validation } => {
                *validation = Some(rule)
            }
            _ => {}
        }
        self
    }

    /// Options of a select question.
    pub fn options(&self) -> Option<&[OptionItem]> {
        match &self.kind {
            QuestionKind::SingleSelect { options, .. } | QuestionKind::MultiSelect { options, .. } => {
                Some(options)
            }
            _ => None,
        }
    }

    /// Derive the command-line option that pre-answers this question.
    pub fn to_option(&self) -> CommandOption {
        let choices = || {
            self.options()
                .unwrap_or_default()
                .iter()
                .map(|o| o.cli_id().to_string())
                .collect::<Vec<_>>()
        };
        let option = match &self.kind {
            QuestionKind::SingleSelect { .. } => {
                CommandOption::single_select(self.name.clone(), choices())
            }
            QuestionKind::MultiSelect { .. } => {
                CommandOption::multi_select(self.name.clone(), choices())
            }
            QuestionKind::Files => CommandOption::array(self.name.clone()),
            _ => CommandOption::string(self.name.clone()),
        };
        let option = option.describe(self.description.clone().unwrap_or_else(|| self.title.clone()));
        match &self.default {
            Some(Answer::Text(s)) => option.default_value(OptionValue::Text(self.cli_value(s))),
            Some(Answer::List(items)) => option.default_value(OptionValue::List(
                items.iter().map(|s| self.cli_value(s)).collect(),
            )),
            None => option,
        }
    }

    /// Command-line spelling of an answer value: the CLI name of the matching
    /// option for selects, the value itself otherwise.
    fn cli_value(&self, value: &str) -> String {
        self.options()
            .and_then(|options| options.iter().find(|o| o.matches(value)))
            .map_or(value, OptionItem::cli_id)
            .to_string()
    }
}

/// Predicate deciding whether a node is visited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    /// The answer is exactly this value.
    Equals(String),
    /// The answer is a list with at least this many items.
    MinItems(usize),
    /// The answer contains this value.
    Contains(String),
    /// The answer contains at least one of these values.
    ContainsAny(Vec<String>),
}

impl Condition {
    /// Evaluate against an answer; a missing answer never satisfies.
    pub fn evaluate(&self, answer: Option<&Answer>) -> bool {
        let Some(answer) = answer else {
            return false;
        };
        match self {
            Condition::Equals(expected) => answer.as_str() == Some(expected.as_str()),
            Condition::MinItems(n) => matches!(answer, Answer::List(items) if items.len() >= *n),
            Condition::Contains(v) => answer.as_list().contains(&v.as_str()),
            Condition::ContainsAny(vs) => {
                let items = answer.as_list();
                vs.iter().any(|v| items.contains(&v.as_str()))
            }
        }
    }
}

/// A node in the question tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionNode {
    pub question: Option<Question>,
    pub condition: Option<Condition>,
    /// Evaluate the condition against this answer instead of the parent's.
    pub condition_target: Option<String>,
    pub children: Vec<QuestionNode>,
}

impl QuestionNode {
    pub fn new(question: Question) -> Self {
        Self {
            question: Some(question),
            condition: None,
            condition_target: None,
            children: Vec::new(),
        }
    }

    /// A node that asks nothing and only groups children.
    pub fn group() -> Self {
        Self {
            question: None,
            condition: None,
            condition_target: None,
            children: Vec::new(),
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Condition evaluated against the answer named `target`.
    pub fn with_condition_on(mut self, target: impl Into<String>, condition: Condition) -> Self {
        self.condition_target = Some(target.into());
        self.condition = Some(condition);
        self
    }

    pub fn add_child(&mut self, child: QuestionNode) -> &mut Self {
        self.children.push(child);
        self
    }

    /// Builder form of [`QuestionNode::add_child`].
    pub fn child(mut self, child: QuestionNode) -> Self {
        self.children.push(child);
        self
    }

    /// Every question in the tree, pre-order, ignoring conditions.
    pub fn flatten(&self) -> Vec<&Question> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Some(q) = &node.question {
                out.push(q);
            }
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Command-line options for every question in the tree, first name wins.
    pub fn to_options(&self) -> Vec<CommandOption> {
        let mut options: Vec<CommandOption> = Vec::new();
        for question in self.flatten() {
            if !options.iter().any(|o| o.name == question.name) {
                options.push(question.to_option());
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptionKind;

    fn tree() -> QuestionNode {
        QuestionNode::new(Question::single_select(
            "a",
            "A",
            vec!["a-1".into(), "a-2".into()],
        ))
        .child(
            QuestionNode::new(Question::text("b", "B"))
                .with_condition(Condition::Equals("a-1".into()))
                .child(QuestionNode::new(Question::folder("c", "C"))),
        )
        .child(QuestionNode::group().child(QuestionNode::new(Question::files("d", "D"))))
    }

    #[test]
    fn flatten_is_preorder() {
        let root = tree();
        let names: Vec<&str> = root.flatten().iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn options_derive_from_questions() {
        let options = tree().to_options();
        assert_eq!(options[0].kind, OptionKind::SingleSelect);
        assert_eq!(
            options[0].choices,
            Some(vec!["a-1".to_string(), "a-2".to_string()])
        );
        assert_eq!(options[1].kind, OptionKind::String);
        assert_eq!(options[3].kind, OptionKind::Array);
        assert_eq!(options[1].description, "B");
    }

    #[test]
    fn cli_name_is_used_for_choices() {
        let q = Question::single_select(
            "lang",
            "Language",
            vec![OptionItem::new("js", "JavaScript").cli_name("javascript")],
        );
        assert_eq!(q.to_option().choices, Some(vec!["javascript".to_string()]));
    }

    #[test]
    fn default_uses_cli_name() {
        let q = Question::multi_select(
            "lang",
            "Language",
            vec![
                OptionItem::new("js", "JavaScript").cli_name("javascript"),
                OptionItem::new("ts", "TypeScript"),
            ],
        )
        .default_answer(vec!["js".to_string(), "ts".to_string()]);
        assert_eq!(
            q.to_option().default,
            Some(OptionValue::List(vec!["javascript".into(), "ts".into()]))
        );
    }

    #[test]
    fn conditions() {
        let list = Answer::List(vec!["http".into(), "timer".into()]);
        let text = Answer::from("bot");

        assert!(Condition::Equals("bot".into()).evaluate(Some(&text)));
        assert!(!Condition::Equals("tab".into()).evaluate(Some(&text)));
        assert!(!Condition::Equals("bot".into()).evaluate(None));
        assert!(Condition::MinItems(2).evaluate(Some(&list)));
        assert!(!Condition::MinItems(3).evaluate(Some(&list)));
        assert!(!Condition::MinItems(1).evaluate(Some(&text)));
        assert!(Condition::Contains("timer".into()).evaluate(Some(&list)));
        assert!(Condition::ContainsAny(vec!["queue".into(), "http".into()]).evaluate(Some(&list)));
        assert!(!Condition::ContainsAny(vec!["queue".into()]).evaluate(Some(&list)));
    }

    #[test]
    fn builders_ignore_mismatched_kinds() {
        let q = Question::folder("f", "F")
            .skip_single_option()
            .validation(StringValidation::new().min_length(1));
        assert_eq!(q.kind, QuestionKind::Folder);
    }
}
