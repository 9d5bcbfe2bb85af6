//! Application layer: tokenizing, dispatch and the CLI registry
//!
//! This layer orchestrates domain specs and owns the error-reporting strategy.

pub mod dispatcher;
pub mod error;
pub mod help;
pub mod registry;
pub mod reporter;
pub mod tokenizer;

pub use dispatcher::run_subcommand;
pub use error::{ApplicationError, ApplicationResult};
pub use help::{render_help, HelpHeader};
pub use registry::{Cli, CliBuilder, Outcome, Report};
pub use reporter::{ErrorPolicy, ErrorSink, Reporter};
pub use tokenizer::Tokenizer;
