//! CLI registry: subcommand resolution, help short-circuit and dispatch

use std::ffi::OsString;
use std::fmt;

use tracing::{debug, info, instrument};

use crate::application::dispatcher::run_subcommand;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::help::{render_help, HelpHeader};
use crate::application::reporter::{ErrorPolicy, ErrorSink, Reporter};
use crate::application::tokenizer::Tokenizer;
use crate::config::Settings;
use crate::domain::{ParseError, ParseResult, ParsedArgs, SubCommandSpec};

/// Errors collected during one run under [`ErrorPolicy::Collect`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Subcommand that was dispatched, if any
    pub subcommand: Option<String>,
    pub errors: Vec<ParseError>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Result of a run that did not abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Handlers ran.
    Dispatched(Report),
    /// Subcommand resolution failed; nothing ran.
    NotDispatched(Report),
    /// A help key was present; carries the rendered help text.
    Help(String),
}

impl Outcome {
    pub fn errors(&self) -> &[ParseError] {
        match self {
            Outcome::Dispatched(report) | Outcome::NotDispatched(report) => &report.errors,
            Outcome::Help(_) => &[],
        }
    }
}

/// A command-line interface: a main subcommand plus named subcommands.
pub struct Cli {
    name: String,
    version: Option<String>,
    description: Option<String>,
    main: SubCommandSpec,
    subcommands: Vec<SubCommandSpec>,
    generate_help: bool,
    display_help_types: bool,
    policy: ErrorPolicy,
    sink: Option<Box<dyn ErrorSink>>,
    tokenizer: Tokenizer,
}

impl Cli {
    pub fn builder(name: impl Into<String>, main: SubCommandSpec) -> CliBuilder {
        CliBuilder::new(name, main)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn main_subcommand(&self) -> &SubCommandSpec {
        &self.main
    }

    pub fn subcommands(&self) -> &[SubCommandSpec] {
        &self.subcommands
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Run with the process arguments, program name excluded.
    ///
    /// An argument that is not valid UTF-8 fails with
    /// [`ApplicationError::NonUnicodeArgument`] before anything is tokenized.
    pub fn run_env(&self) -> ApplicationResult<Outcome> {
        let args = unicode_args(std::env::args_os().skip(1))?;
        Ok(self.run(args.as_slice())?)
    }

    /// Tokenize `args`, resolve the subcommand and dispatch.
    ///
    /// With [`ErrorPolicy::FailFast`] the first error is returned as `Err`;
    /// with [`ErrorPolicy::Collect`] errors are returned in the [`Report`].
    #[instrument(level = "debug", skip_all, fields(cli = %self.name))]
    pub fn run<S: AsRef<str>>(&self, args: &[S]) -> ParseResult<Outcome> {
        let mut reporter = Reporter::new(self.policy, self.sink.as_deref());
        let parsed = self.tokenizer.parse(args, &mut reporter)?;

        let Some(subcommand) = self.resolve(&parsed, &mut reporter)? else {
            return Ok(Outcome::NotDispatched(Report {
                subcommand: None,
                errors: reporter.into_errors(),
            }));
        };

        if self.generate_help && parsed.wants_help() {
            info!("help requested for {}", subcommand.name());
            return Ok(Outcome::Help(self.help(subcommand)));
        }

        if let Some(name) = named_subcommand(&parsed) {
            if self.subcommands.is_empty() {
                reporter.report(ParseError::SubCommandsNotAccepted {
                    name: name.to_string(),
                    cli: self.name.clone(),
                })?;
                return Ok(Outcome::NotDispatched(Report {
                    subcommand: None,
                    errors: reporter.into_errors(),
                }));
            }
        }

        run_subcommand(subcommand, &parsed, &mut reporter)?;
        Ok(Outcome::Dispatched(Report {
            subcommand: Some(subcommand.name().to_string()),
            errors: reporter.into_errors(),
        }))
    }

    /// Render help for `subcommand`; subcommands are listed only for the main one.
    pub fn help(&self, subcommand: &SubCommandSpec) -> String {
        let header = HelpHeader {
            name: &self.name,
            version: self.version.as_deref(),
            description: self.description.as_deref(),
        };
        let siblings: &[SubCommandSpec] = if std::ptr::eq(subcommand, &self.main) {
            &self.subcommands
        } else {
            &[]
        };
        render_help(header, subcommand, siblings, self.display_help_types)
    }

    fn resolve(
        &self,
        parsed: &ParsedArgs,
        reporter: &mut Reporter<'_>,
    ) -> ParseResult<Option<&SubCommandSpec>> {
        let Some(name) = named_subcommand(parsed) else {
            debug!("no subcommand given, using {}", self.main.name());
            return Ok(Some(&self.main));
        };

        match self.subcommands.iter().find(|s| s.name() == name) {
            Some(subcommand) => {
                debug!("resolved subcommand {}", name);
                Ok(Some(subcommand))
            }
            None => {
                reporter.report(ParseError::SubCommandMissing {
                    name: name.to_string(),
                    cli: self.name.clone(),
                })?;
                Ok(None)
            }
        }
    }
}

fn unicode_args<I>(args: I) -> ApplicationResult<Vec<String>>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|raw| ApplicationError::NonUnicodeArgument {
                    argument: raw.to_string_lossy().into_owned(),
                })
        })
        .collect()
}

/// Detected subcommand name; an empty first token counts as none.
fn named_subcommand(parsed: &ParsedArgs) -> Option<&str> {
    parsed.subcommand().filter(|name| !name.is_empty())
}

impl fmt::Debug for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cli")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("main", &self.main)
            .field("subcommands", &self.subcommands)
            .field("generate_help", &self.generate_help)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Cli`].
pub struct CliBuilder {
    cli: Cli,
}

impl CliBuilder {
    pub fn new(name: impl Into<String>, main: SubCommandSpec) -> Self {
        Self {
            cli: Cli {
                name: name.into(),
                version: None,
                description: None,
                main,
                subcommands: Vec::new(),
                generate_help: false,
                display_help_types: false,
                policy: ErrorPolicy::default(),
                sink: None,
                tokenizer: Tokenizer::new(),
            },
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.cli.version = Some(version.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.cli.description = Some(description.into());
        self
    }

    pub fn subcommand(mut self, subcommand: SubCommandSpec) -> Self {
        self.cli.subcommands.push(subcommand);
        self
    }

    pub fn generate_help(mut self, enabled: bool) -> Self {
        self.cli.generate_help = enabled;
        self
    }

    pub fn display_help_types(mut self, enabled: bool) -> Self {
        self.cli.display_help_types = enabled;
        self
    }

    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.cli.policy = policy;
        self
    }

    /// Sink notified of every error, under either policy.
    pub fn error_sink(mut self, sink: impl ErrorSink + 'static) -> Self {
        self.cli.sink = Some(Box::new(sink));
        self
    }

    /// Apply help and error-policy settings.
    pub fn settings(self, settings: &Settings) -> Self {
        self.generate_help(settings.generate_help)
            .display_help_types(settings.display_help_types)
            .error_policy(settings.error_policy)
    }

    pub fn build(self) -> Cli {
        self.cli
    }
}
