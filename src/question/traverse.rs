//! question::traverse
//!
//! Depth-first walk of a question tree.
//!
//! # Algorithm
//!
//! Nodes are visited pre-order, children in declaration order. For each node:
//!
//! 1. If it has a condition that does not hold, the node and its subtree are
//!    skipped without prompting.
//! 2. Group nodes ask nothing and hand their parent's answer to their
//!    children.
//! 3. An answer already in the bag (pre-supplied on the command line) is
//!    checked and normalized instead of prompting.
//! 4. A select question with `skip_single_option` and exactly one option is
//!    answered automatically.
//! 5. Otherwise the matching [`UserInteraction`] method is called.
//!
//! The first interaction error ends the walk and is returned unchanged.

use super::answers::{Answer, Answers};
use super::model::{OptionItem, Question, QuestionKind, QuestionNode};
use crate::core::FxError;
use crate::ui::interaction::{
    InputTextConfig, MultiSelectConfig, SelectPathConfig, SingleSelectConfig, UserInteraction,
};

/// Walk `root`, recording every answer into `answers`.
pub async fn traverse(
    root: &QuestionNode,
    answers: &mut Answers,
    ui: &dyn UserInteraction,
) -> Result<(), FxError> {
    let mut stack: Vec<(&QuestionNode, Option<Answer>)> = vec![(root, None)];

    while let Some((node, parent_answer)) = stack.pop() {
        if let Some(condition) = &node.condition {
            let subject = match &node.condition_target {
                Some(target) => answers.get(target).cloned(),
                None => parent_answer.clone(),
            };
            if !condition.evaluate(subject.as_ref()) {
                if let Some(q) = &node.question {
                    tracing::debug!(question = %q.name, ?condition, "condition not met, skipping");
                }
                continue;
            }
        }

        let answer = match &node.question {
            Some(question) => {
                let answer = resolve(question, answers, ui).await?;
                answers.insert(question.name.clone(), answer.clone());
                Some(answer)
            }
            None => parent_answer,
        };

        for child in node.children.iter().rev() {
            stack.push((child, answer.clone()));
        }
    }

    Ok(())
}

async fn resolve(
    question: &Question,
    answers: &Answers,
    ui: &dyn UserInteraction,
) -> Result<Answer, FxError> {
    if let Some(existing) = answers.get(&question.name) {
        tracing::debug!(question = %question.name, "using supplied answer");
        return normalize(question, existing);
    }

    let default_text = question
        .default
        .as_ref()
        .and_then(Answer::as_str)
        .map(str::to_string);

    match &question.kind {
        QuestionKind::SingleSelect {
            options,
            skip_single_option,
        } => {
            if *skip_single_option && options.len() == 1 {
                return Ok(Answer::Text(options[0].id.clone()));
            }
            let id = ui
                .select_option(SingleSelectConfig {
                    name: question.name.clone(),
                    title: question.title.clone(),
                    options: options.clone(),
                    default: default_text,
                })
                .await?;
            Ok(Answer::Text(id))
        }
        QuestionKind::MultiSelect {
            options,
            skip_single_option,
        } => {
            if *skip_single_option && options.len() == 1 {
                return Ok(Answer::List(vec![options[0].id.clone()]));
            }
            let default = question
                .default
                .as_ref()
                .map(|d| d.as_list().into_iter().map(str::to_string).collect())
                .unwrap_or_default();
            let ids = ui
                .select_options(MultiSelectConfig {
                    name: question.name.clone(),
                    title: question.title.clone(),
                    options: options.clone(),
                    default,
                })
                .await?;
            Ok(Answer::List(ids))
        }
        QuestionKind::Text { validation } | QuestionKind::Password { validation } => {
            let text = ui
                .input_text(InputTextConfig {
                    name: question.name.clone(),
                    title: question.title.clone(),
                    default: default_text,
                    password: matches!(question.kind, QuestionKind::Password { .. }),
                    validation: validation.clone(),
                })
                .await?;
            if let Some(rule) = validation {
                rule.validate(&text)
                    .map_err(|reason| FxError::input_validation(&question.name, &reason))?;
            }
            Ok(Answer::Text(text))
        }
        QuestionKind::Folder => {
            let path = ui.select_folder(path_config(question, default_text)).await?;
            Ok(Answer::Text(path.to_string_lossy().into_owned()))
        }
        QuestionKind::File => {
            let path = ui.select_file(path_config(question, default_text)).await?;
            Ok(Answer::Text(path.to_string_lossy().into_owned()))
        }
        QuestionKind::Files => {
            let paths = ui.select_files(path_config(question, default_text)).await?;
            Ok(Answer::List(
                paths
                    .iter()
                    .map(|p| p.to_string_lossy().into_owned())
                    .collect(),
            ))
        }
    }
}

fn path_config(question: &Question, default: Option<String>) -> SelectPathConfig {
    SelectPathConfig {
        name: question.name.clone(),
        title: question.title.clone(),
        default,
    }
}

/// Check a pre-supplied answer and map CLI option names to option ids.
///
/// Select answers must use the names the derived command-line option
/// accepts, so a value passes here exactly when it passes option validation.
fn normalize(question: &Question, existing: &Answer) -> Result<Answer, FxError> {
    let flag = format!("--{}", question.name);
    match &question.kind {
        QuestionKind::SingleSelect { options, .. } => {
            let items = existing.as_list();
            let [token] = items.as_slice() else {
                return Err(FxError::input_validation(&flag, "expected a single value"));
            };
            find_option(options, token, &flag).map(|o| Answer::Text(o.id.clone()))
        }
        QuestionKind::MultiSelect { options, .. } => existing
            .as_list()
            .into_iter()
            .map(|token| find_option(options, token, &flag).map(|o| o.id.clone()))
            .collect::<Result<Vec<_>, _>>()
            .map(Answer::List),
        QuestionKind::Text { validation } | QuestionKind::Password { validation } => {
            let text = existing
                .as_str()
                .ok_or_else(|| FxError::input_validation(&flag, "expected a single value"))?;
            if let Some(rule) = validation {
                rule.validate(text)
                    .map_err(|reason| FxError::input_validation(&flag, &reason))?;
            }
            Ok(existing.clone())
        }
        QuestionKind::Folder | QuestionKind::File => existing
            .as_str()
            .map(|_| existing.clone())
            .ok_or_else(|| FxError::input_validation(&flag, "expected a single path")),
        QuestionKind::Files => Ok(Answer::List(
            existing.as_list().into_iter().map(str::to_string).collect(),
        )),
    }
}

fn find_option<'a>(
    options: &'a [OptionItem],
    token: &str,
    flag: &str,
) -> Result<&'a OptionItem, FxError> {
    options.iter().find(|o| o.cli_id() == token).ok_or_else(|| {
        let valid = options
            .iter()
            .map(|o| format!("\"{}\"", o.cli_id()))
            .collect::<Vec<_>>()
            .join(", ");
        FxError::input_validation(
            flag,
            &format!("'{}' is not a valid option, valid options: {}", token, valid),
        )
    })
}
