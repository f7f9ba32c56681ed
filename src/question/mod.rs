//! question
//!
//! Interactive input collection.
//!
//! # Modules
//!
//! - [`model`] - Questions, conditions and the question tree
//! - [`answers`] - The answer bag filled in during traversal
//! - [`validation`] - Rules for text answers
//! - [`traverse`] - The depth-first walk that prompts for missing answers
//!
//! # Flow
//!
//! A command handler seeds an [`Answers`] bag from its parsed options, then
//! calls [`traverse`] with its question tree and a
//! [`crate::ui::UserInteraction`]. Questions already answered on the command
//! line are not asked again.

pub mod answers;
pub mod model;
pub mod traverse;
pub mod validation;

pub use answers::{Answer, Answers};
pub use model::{Condition, OptionItem, Question, QuestionKind, QuestionNode};
pub use traverse::traverse;
pub use validation::StringValidation;
