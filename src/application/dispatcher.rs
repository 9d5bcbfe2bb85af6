//! Option validation and handler dispatch for a resolved subcommand

use tracing::{debug, instrument, trace};

use crate::application::reporter::Reporter;
use crate::domain::{
    parse_type, ArgumentType, OptionSpec, ParseError, ParseResult, ParsedArgs, SubCommandSpec,
    SKIP_PLACEHOLDER,
};

/// Validate `parsed` against `subcommand` and run its handlers.
///
/// Steps:
/// 1. required options must have at least one alias present (first miss stops the check)
/// 2. every key must belong to an option (first unknown key stops resolution)
/// 3. positional values are checked against each option's declared arguments
/// 4. options run in ascending priority, ties in input order
/// 5. the subcommand handler runs last, exactly once
///
/// A subcommand that never declared options skips steps 1-4: supplied keys
/// are ignored and only its handler runs.
///
/// Under [`ErrorPolicy::Collect`](crate::application::ErrorPolicy) failures are
/// recorded and the remaining steps still run.
#[instrument(level = "debug", skip_all, fields(subcommand = subcommand.name()))]
pub fn run_subcommand(
    subcommand: &SubCommandSpec,
    parsed: &ParsedArgs,
    reporter: &mut Reporter<'_>,
) -> ParseResult<()> {
    if !subcommand.declares_options() {
        debug!("no options declared, ignoring {} key(s)", parsed.len());
        subcommand.invoke();
        return Ok(());
    }

    check_required(subcommand, parsed, reporter)?;

    let mut pending: Vec<(&OptionSpec, Vec<String>)> = Vec::with_capacity(parsed.len());
    for (key, values) in parsed.iter() {
        let Some(option) = subcommand.find_option(key) else {
            reporter.report(ParseError::OptionNotFound {
                key: key.to_string(),
                subcommand: subcommand.name().to_string(),
            })?;
            break;
        };
        let resolved = resolve_arguments(subcommand, option, key, values, reporter)?;
        pending.push((option, resolved));
    }

    // stable: equal priorities keep input order
    pending.sort_by_key(|(option, _)| option.get_priority());

    for (option, args) in &pending {
        debug!("run option {} {:?}", option.name(), args);
        option.invoke(args);
    }
    debug!("run subcommand {}", subcommand.name());
    subcommand.invoke();
    Ok(())
}

fn check_required(
    subcommand: &SubCommandSpec,
    parsed: &ParsedArgs,
    reporter: &mut Reporter<'_>,
) -> ParseResult<()> {
    let missing = subcommand
        .options()
        .iter()
        .filter(|o| o.is_required())
        // an option without aliases is never present
        .find(|o| o.all_aliases().all(|alias| !parsed.contains_key(alias)));

    if let Some(option) = missing {
        reporter.report(ParseError::RequiredOptionMissing {
            option: option.display_aliases(),
            subcommand: subcommand.name().to_string(),
        })?;
    }
    Ok(())
}

/// Resolve the positional values supplied for `key` against `option`'s arguments.
///
/// Skipped (`-`) and absent optional arguments contribute no value, so the
/// result can be shorter than the declared arity.
fn resolve_arguments(
    subcommand: &SubCommandSpec,
    option: &OptionSpec,
    key: &str,
    values: &[String],
    reporter: &mut Reporter<'_>,
) -> ParseResult<Vec<String>> {
    let mut resolved = Vec::with_capacity(option.arguments().len());

    if option.arguments().is_empty() {
        if !values.is_empty() {
            reporter.report(ParseError::InvalidArgumentsLength {
                key: key.to_string(),
                count: values.len(),
                subcommand: subcommand.name().to_string(),
            })?;
        }
        return Ok(resolved);
    }

    for (i, argument) in option.arguments().iter().enumerate() {
        let value = values.get(i).map(String::as_str);
        let found = value.map(parse_type);
        trace!("{}[{}] {} = {:?} ({:?})", key, i, argument.name(), value, found);

        if value == Some(SKIP_PLACEHOLDER) && !argument.is_required() {
            continue;
        }

        if found.is_none() && argument.is_required() {
            reporter.report(ParseError::MissingOptionArgument {
                argument: argument.name().to_string(),
                subcommand: subcommand.name().to_string(),
            })?;
            continue;
        }

        let expected = argument.argument_type();
        if expected != ArgumentType::Any && found != Some(expected) {
            reporter.report(ParseError::InvalidOptionArgumentType {
                argument: argument.name().to_string(),
                found: found.map_or("none", |t| t.as_str()).to_string(),
                expected,
                subcommand: subcommand.name().to_string(),
            })?;
            continue;
        }

        if let Some(value) = value {
            resolved.push(value.to_string());
        }
    }

    Ok(resolved)
}
