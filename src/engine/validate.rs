//! engine::validate
//!
//! Checking parsed values against their declarations.
//!
//! Options are checked before arguments, in declaration order, and the first
//! failure is returned.

use super::help::format_option_name;
use crate::core::{CliContext, CommandOption, FxError, OptionKind, OptionValue};

/// Validate every option and argument of the resolved command.
pub fn validate_options_and_arguments(ctx: &CliContext<'_>) -> Result<(), FxError> {
    for option in &ctx.command.options {
        validate_option(option, ctx.option_values.get(&option.name), false)?;
    }
    for argument in &ctx.command.arguments {
        validate_option(argument, ctx.argument_values.get(&argument.name), true)?;
    }
    Ok(())
}

/// Validate one value.
///
/// # Errors
///
/// - `MissingRequiredInputError` if the option is required and has neither a
///   value nor a default
/// - `InputValidationError` if a select option's value is outside `choices`
pub fn validate_option(
    option: &CommandOption,
    value: Option<&OptionValue>,
    positional: bool,
) -> Result<(), FxError> {
    let display = format_option_name(option, positional);

    let Some(value) = value else {
        if option.required && option.default.is_none() {
            return Err(FxError::missing_required_input(&display));
        }
        return Ok(());
    };

    let Some(choices) = &option.choices else {
        return Ok(());
    };
    let allowed = || {
        choices
            .iter()
            .map(|c| format!("\"{}\"", c))
            .collect::<Vec<_>>()
            .join(", ")
    };

    match option.kind {
        OptionKind::SingleSelect => {
            let ok = value.as_str().is_some_and(|v| choices.iter().any(|c| c == v));
            if !ok {
                return Err(FxError::input_validation(
                    &display,
                    &format!("'{}' is not a valid value, valid values are: {}", value, allowed()),
                ));
            }
        }
        OptionKind::MultiSelect => {
            if let Some(bad) = value.as_list().into_iter().find(|v| !choices.iter().any(|c| c == v)) {
                return Err(FxError::input_validation(
                    &display,
                    &format!("'{}' is not a valid value, valid values are: {}", bad, allowed()),
                ));
            }
        }
        _ => {}
    }
    Ok(())
}
