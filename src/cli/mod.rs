//! CLI layer: terminal output and exit-code mapping for binaries

pub mod error;
pub mod output;

pub use error::{CliError, CliResult};
