//! colepio: subcommand-aware argument parsing and dispatch
//!
//! Arguments are tokenized into a subcommand and option keys, validated
//! against declared option specs and dispatched to handlers in priority order.
//!
//! ```ignore
//! use colepio::{ArgumentSpec, Cli, OptionSpec, SubCommandSpec};
//!
//! let cli = Cli::builder(
//!     "greet",
//!     SubCommandSpec::new("main").option(
//!         OptionSpec::new("name")
//!             .alias("name")
//!             .short_alias("n")
//!             .argument(ArgumentSpec::new("who").required(true))
//!             .handler(|args| println!("hello {}", args[0])),
//!     ),
//! )
//! .build();
//! cli.run(&["--name", "world"])?;
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use application::{
    run_subcommand, Cli, CliBuilder, ErrorPolicy, ErrorSink, Outcome, Report, Reporter, Tokenizer,
};
pub use domain::{
    parse_type, ArgumentSpec, ArgumentType, OptionSpec, ParseError, ParseResult, ParsedArgs,
    SubCommandSpec,
};
