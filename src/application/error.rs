//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::ParseError;

/// Application errors wrap parse errors and add configuration concerns.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("argument is not valid UTF-8: {argument}")]
    NonUnicodeArgument { argument: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
