//! engine::help
//!
//! Help text and option display names.

use std::fmt::Write as _;

use crate::core::{CliCommand, CommandOption, OptionKind};

/// Display name of an option in messages: `<name>` for positional
/// arguments, `--name` otherwise.
pub fn format_option_name(option: &CommandOption, positional: bool) -> String {
    if positional {
        format!("<{}>", option.name)
    } else {
        format!("--{}", option.name)
    }
}

/// Render the help page for `command`.
///
/// Global options are listed when `root` is given and differs from
/// `command`. Hidden options are never listed.
pub fn format_help(command: &CliCommand, full_name: &str, root: Option<&CliCommand>) -> String {
    let mut out = String::new();

    let mut usage = full_name.to_string();
    if !command.commands.is_empty() {
        usage.push_str(" <command>");
    }
    for argument in &command.arguments {
        if argument.required {
            let _ = write!(usage, " <{}>", argument.name);
        } else {
            let _ = write!(usage, " [{}]", argument.name);
        }
    }
    if command.options.iter().any(|o| !o.hidden) {
        usage.push_str(" [options]");
    }
    let _ = writeln!(out, "Usage: {}", usage);

    if !command.description.is_empty() {
        let _ = writeln!(out, "\n{}", command.description);
    }

    if !command.commands.is_empty() {
        let rows: Vec<(String, String)> = command
            .commands
            .iter()
            .map(|c| (c.name.clone(), c.description.clone()))
            .collect();
        section(&mut out, "Commands", &rows);
    }

    let arguments: Vec<(String, String)> = command
        .arguments
        .iter()
        .filter(|a| !a.hidden)
        .map(|a| (format_option_name(a, true), describe(a)))
        .collect();
    section(&mut out, "Arguments", &arguments);

    section(&mut out, "Options", &option_rows(&command.options));

    if let Some(root) = root {
        if !std::ptr::eq(root, command) {
            section(&mut out, "Global Options", &option_rows(&root.options));
        }
    }

    if !command.examples.is_empty() {
        let _ = writeln!(out, "\nExamples:");
        for (example, explanation) in &command.examples {
            let _ = writeln!(out, "  {}", explanation);
            let _ = writeln!(out, "    {}", example);
        }
    }

    out
}

fn option_rows(options: &[CommandOption]) -> Vec<(String, String)> {
    options
        .iter()
        .filter(|o| !o.hidden)
        .map(|o| {
            let mut label = format_option_name(o, false);
            if let Some(short) = &o.short_name {
                let _ = write!(label, ", -{}", short);
            }
            (label, describe(o))
        })
        .collect()
}

fn describe(option: &CommandOption) -> String {
    let mut text = option.description.clone();
    let mut notes = Vec::new();
    if option.kind != OptionKind::String {
        notes.push(format!("[{}]", option.kind));
    }
    if option.required {
        notes.push("[required]".to_string());
    }
    if let Some(choices) = &option.choices {
        let quoted: Vec<String> = choices.iter().map(|c| format!("\"{}\"", c)).collect();
        notes.push(format!("[choices: {}]", quoted.join(", ")));
    }
    if let Some(default) = &option.default {
        notes.push(format!("[default: {}]", default));
    }
    for note in notes {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&note);
    }
    text
}

fn section(out: &mut String, title: &str, rows: &[(String, String)]) {
    if rows.is_empty() {
        return;
    }
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let _ = writeln!(out, "\n{}:", title);
    for (label, text) in rows {
        let line = format!("  {:<width$}  {}", label, text, width = width);
        let _ = writeln!(out, "{}", line.trim_end());
    }
}
