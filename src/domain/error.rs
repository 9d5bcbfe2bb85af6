//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::ArgumentType;

/// Parse and validation failures.
/// Every variant names the offending token or option and the scope it was found in.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Failed parsing arguments, missing key for given option: {value}")]
    MissingKeyForValue { value: String },

    #[error("Option missing: Option {option} is required in {subcommand} subcommand")]
    RequiredOptionMissing { option: String, subcommand: String },

    #[error("Option not found: Option {key} has not been found in {subcommand} subcommand")]
    OptionNotFound { key: String, subcommand: String },

    #[error(
        "Invalid arguments length: Option {key} doesn't take any arguments (got {count}) in {subcommand} subcommand"
    )]
    InvalidArgumentsLength {
        key: String,
        count: usize,
        subcommand: String,
    },

    #[error("Missing option argument: {argument} is missing in {subcommand}")]
    MissingOptionArgument {
        argument: String,
        subcommand: String,
    },

    #[error(
        "Invalid option arguments: {argument} got {found}, expected {expected} in {subcommand}"
    )]
    InvalidOptionArgumentType {
        argument: String,
        /// Inferred type of the supplied value, `none` when absent
        found: String,
        expected: ArgumentType,
        subcommand: String,
    },

    #[error("Subcommand missing: Subcommand {name} has not been found in {cli} CLI.")]
    SubCommandMissing { name: String, cli: String },

    #[error("This command doesn't accept subcommands (got {name}) in {cli} CLI")]
    SubCommandsNotAccepted { name: String, cli: String },
}

/// Result type for parsing and dispatch.
pub type ParseResult<T> = Result<T, ParseError>;
