//! engine::parse
//!
//! Turning the remaining argv into option and argument values.
//!
//! # Rules
//!
//! - A token starting with `-` names an option; leading dashes are stripped
//!   and `--name=value` is accepted. Root (global) options are looked up
//!   first, then the command's own.
//! - A boolean option takes a following `true`/`false` token if present,
//!   otherwise it is `true`.
//! - Any other option takes the next token. List options split it on `,`
//!   and accumulate across repeated flags.
//! - Unknown options are ignored.
//! - Remaining tokens fill the positional arguments in order; extras are
//!   ignored.
//! - Required options and arguments that have a default but no value get
//!   the default.
//!
//! Parsing never fails and has no side effects; problems are reported by
//! [`super::validate`].

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::global;
use super::resolve::Resolved;
use crate::core::{CliCommand, CliContext, CommandOption, OptionKind, OptionValue, RuntimeConfig};
use crate::ui::output::Verbosity;

/// Parse with `--interactive` defaulting to `true`.
pub fn parse_args<'a>(resolved: &Resolved<'a>, root: &CliCommand) -> CliContext<'a> {
    parse_args_with(resolved, root, true)
}

/// Parse, using `interactive_default` when `--interactive` is not given.
pub fn parse_args_with<'a>(
    resolved: &Resolved<'a>,
    root: &CliCommand,
    interactive_default: bool,
) -> CliContext<'a> {
    let command = resolved.command;
    let args = &resolved.remaining;
    let mut ctx = CliContext::new(command, resolved.full_name.clone());

    let mut positional = 0;
    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if arg.len() > 1 && arg.starts_with('-') {
            let stripped = arg.trim_start_matches('-');
            let (name, inline) = match stripped.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (stripped, None),
            };

            let lookup = root
                .options
                .iter()
                .find(|o| o.matches(name))
                .map(|o| (o, true))
                .or_else(|| command.options.iter().find(|o| o.matches(name)).map(|o| (o, false)));

            let Some((option, is_global)) = lookup else {
                tracing::debug!(option = %arg, command = %ctx.full_name, "ignoring unknown option");
                i += 1;
                continue;
            };

            let value = if option.kind == OptionKind::Boolean {
                match inline {
                    Some(v) => Some(OptionValue::Bool(v != "false")),
                    None => match args.get(i + 1).map(String::as_str) {
                        Some("true") => {
                            i += 1;
                            Some(OptionValue::Bool(true))
                        }
                        Some("false") => {
                            i += 1;
                            Some(OptionValue::Bool(false))
                        }
                        _ => Some(OptionValue::Bool(true)),
                    },
                }
            } else {
                let raw = match inline {
                    Some(v) => Some(v.to_string()),
                    None => {
                        i += 1;
                        args.get(i).cloned()
                    }
                };
                raw.filter(|v| !v.is_empty())
                    .map(|v| typed_value(option, v))
            };

            if let Some(value) = value {
                let target = if is_global {
                    &mut ctx.global_option_values
                } else {
                    &mut ctx.option_values
                };
                store(target, option, value);
            }
        } else if let Some(argument) = command.arguments.get(positional) {
            ctx.argument_values
                .insert(argument.name.clone(), typed_value(argument, arg.clone()));
            positional += 1;
        }
        i += 1;
    }

    backfill_defaults(&command.options, &mut ctx.option_values);
    backfill_defaults(&command.arguments, &mut ctx.argument_values);

    let interactive = ctx
        .global_option(global::INTERACTIVE)
        .and_then(OptionValue::as_bool)
        .unwrap_or(interactive_default);
    ctx.global_option_values
        .insert(global::INTERACTIVE.to_string(), OptionValue::Bool(interactive));

    let project_folder = ctx
        .global_option(global::FOLDER)
        .or_else(|| ctx.option(global::FOLDER))
        .and_then(OptionValue::as_str)
        .map(PathBuf::from);

    ctx.runtime = RuntimeConfig {
        verbosity: Verbosity::from_flags(ctx.global_flag(global::VERBOSE), ctx.global_flag(global::DEBUG)),
        interactive,
        project_folder,
    };

    ctx
}

fn typed_value(option: &CommandOption, raw: String) -> OptionValue {
    if option.kind.is_list() {
        OptionValue::List(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    } else {
        OptionValue::Text(raw)
    }
}

fn store(target: &mut BTreeMap<String, OptionValue>, option: &CommandOption, value: OptionValue) {
    match (target.get_mut(&option.name), value) {
        (Some(OptionValue::List(existing)), OptionValue::List(more)) => existing.extend(more),
        (_, value) => {
            target.insert(option.name.clone(), value);
        }
    }
}

fn backfill_defaults(declared: &[CommandOption], values: &mut BTreeMap<String, OptionValue>) {
    for option in declared {
        if !option.required || values.contains_key(&option.name) {
            continue;
        }
        if let Some(default) = &option.default {
            values.insert(option.name.clone(), default.clone());
        }
    }
}
