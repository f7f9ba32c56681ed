//! engine::resolve
//!
//! Locating the command named by argv.

use crate::core::CliCommand;

/// A command located in the tree, plus the argv it did not consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub command: &'a CliCommand,
    /// Root name followed by every matched token, space-joined.
    pub full_name: String,
    pub remaining: Vec<String>,
}

/// Walk `args` left to right, descending by exact subcommand name.
///
/// Stops at the first token that names no child. Always succeeds: with no
/// match the root itself is returned. The tree is only read.
pub fn find_command<'a>(root: &'a CliCommand, args: &[String]) -> Resolved<'a> {
    let mut command = root;
    let mut matched = 0;
    for arg in args {
        match command.child(arg) {
            Some(child) => {
                command = child;
                matched += 1;
            }
            None => break,
        }
    }

    let full_name = std::iter::once(root.name.as_str())
        .chain(args[..matched].iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");

    tracing::debug!(command = %full_name, "resolved command");

    Resolved {
        command,
        full_name,
        remaining: args[matched..].to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CommandId;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn tree() -> CliCommand {
        CliCommand::new("teamsfx", "").subcommand(
            CliCommand::new("config", "")
                .subcommand(CliCommand::new("get", "").handler(CommandId::ConfigGet))
                .subcommand(CliCommand::new("set", "").handler(CommandId::ConfigSet)),
        )
    }

    #[test]
    fn descends_to_deepest_match() {
        let root = tree();
        let r = find_command(&root, &args(&["config", "get", "telemetry"]));
        assert_eq!(r.command.name, "get");
        assert_eq!(r.full_name, "teamsfx config get");
        assert_eq!(r.remaining, args(&["telemetry"]));
    }

    #[test]
    fn stops_at_first_unknown_token() {
        let root = tree();
        let r = find_command(&root, &args(&["config", "--help", "get"]));
        assert_eq!(r.command.name, "config");
        assert_eq!(r.remaining, args(&["--help", "get"]));
    }

    #[test]
    fn falls_back_to_root() {
        let root = tree();
        let r = find_command(&root, &args(&["deploy"]));
        assert!(std::ptr::eq(r.command, &root));
        assert_eq!(r.full_name, "teamsfx");

        let r = find_command(&root, &[]);
        assert_eq!(r.full_name, "teamsfx");
        assert!(r.remaining.is_empty());
    }
}
