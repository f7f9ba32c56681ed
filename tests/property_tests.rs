//! Property-based tests for the command engine.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated command lines.

use proptest::prelude::*;

use teamsfx::core::{CommandOption, OptionValue};
use teamsfx::cli::commands::root_command;
use teamsfx::engine::{find_command, format_option_name, parse_args, validate_option};

/// Tokens drawn from real command names plus noise.
fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("config".to_string()),
        Just("get".to_string()),
        Just("set".to_string()),
        Just("new".to_string()),
        "[a-z]{1,8}",
        "--[a-z]{1,8}",
    ]
}

fn args() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(token(), 0..6)
}

proptest! {
    #[test]
    fn full_name_is_matched_prefix(args in args()) {
        let root = root_command();
        let before = root.clone();
        let resolved = find_command(&root, &args);

        let matched = args.len() - resolved.remaining.len();
        let mut expected = vec!["teamsfx".to_string()];
        expected.extend(args[..matched].iter().cloned());

        prop_assert_eq!(&resolved.full_name, &expected.join(" "));
        prop_assert_eq!(&args[matched..], resolved.remaining.as_slice());
        prop_assert_eq!(root, before);
    }

    #[test]
    fn parsing_is_idempotent(args in args()) {
        let root = root_command();
        let resolved = find_command(&root, &args);
        let first = parse_args(&resolved, &root);
        let second = parse_args(&resolved, &root);

        prop_assert_eq!(first.option_values, second.option_values);
        prop_assert_eq!(first.argument_values, second.argument_values);
    }

    #[test]
    fn missing_required_names_option(name in "[a-z][a-z-]{0,12}", positional in any::<bool>()) {
        let option = CommandOption::string(name.clone()).required();
        let err = validate_option(&option, None, positional).unwrap_err();

        prop_assert_eq!(err.name(), "MissingRequiredInputError");
        prop_assert!(err.message().contains(&format_option_name(&option, positional)));
    }

    #[test]
    fn single_select_accepts_exactly_choices(
        choices in prop::collection::btree_set("[a-z]{1,6}", 1..5),
        value in "[a-z]{1,6}",
    ) {
        let choices: Vec<String> = choices.into_iter().collect();
        let option = CommandOption::single_select("pick", choices.clone());
        let result = validate_option(&option, Some(&OptionValue::from(value.clone())), false);

        if choices.contains(&value) {
            prop_assert!(result.is_ok());
        } else {
            let err = result.unwrap_err();
            prop_assert_eq!(err.name(), "InputValidationError");
        }
    }

    #[test]
    fn boolean_flag_values(
        next in prop_oneof![Just(None), Just(Some("true")), Just(Some("false")), Just(Some("web"))],
    ) {
        let root = root_command();
        let mut args = vec!["config".to_string(), "get".to_string(), "--debug".to_string()];
        if let Some(next) = next {
            args.push(next.to_string());
        }
        let ctx = parse_args(&find_command(&root, &args), &root);

        let expected = next != Some("false");
        prop_assert_eq!(ctx.global_option("debug"), Some(&OptionValue::Bool(expected)));
        match next {
            Some("true") | Some("false") => {
                prop_assert!(ctx.argument_values.is_empty());
                prop_assert_eq!(ctx.argument("option"), None);
            }
            Some("web") => {
                prop_assert_eq!(ctx.argument("option"), Some("web"));
            }
            _ => {}
        }
    }
}
