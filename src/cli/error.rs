//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::ParseError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("{0}")]
    Usage(String),
}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self {
        CliError::Application(e.into())
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::Parse(_) | ApplicationError::NonUnicodeArgument { .. } => {
                    crate::exitcode::USAGE
                }
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exitcode;

    #[test]
    fn given_each_error_layer_when_mapping_then_uses_sysexits_codes() {
        let parse = CliError::from(ParseError::MissingKeyForValue { value: "x".into() });
        let config = CliError::from(ApplicationError::Config {
            message: "bad".into(),
        });
        let usage = CliError::Usage("2 errors".into());
        let encoding = CliError::from(ApplicationError::NonUnicodeArgument {
            argument: "fo\u{FFFD}".into(),
        });

        assert_eq!(parse.exit_code(), exitcode::USAGE);
        assert_eq!(config.exit_code(), exitcode::CONFIG);
        assert_eq!(usage.exit_code(), exitcode::USAGE);
        assert_eq!(encoding.exit_code(), exitcode::USAGE);
    }
}
