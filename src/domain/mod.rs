//! Domain layer: specs, parsed arguments and the error taxonomy
//!
//! This layer is independent of external concerns (no I/O, no terminal, no config loading).

pub mod entities;
pub mod error;
pub mod parsed;

pub use entities::*;
pub use error::{ParseError, ParseResult};
pub use parsed::{ParsedArgs, HELP_KEYS};
