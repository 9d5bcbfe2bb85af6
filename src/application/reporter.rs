//! Error reporting strategy for a single run
//!
//! Replaces a process-wide error callback: the policy and an optional sink are
//! handed to the CLI at construction, and every run gets a fresh [`Reporter`].

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{ParseError, ParseResult};

/// What happens after an error has been reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// The first error aborts the run.
    #[default]
    FailFast,
    /// Errors are recorded and validation carries on where it can.
    Collect,
}

/// Receives every reported error, regardless of policy.
pub trait ErrorSink {
    fn report(&self, error: &ParseError);
}

impl<F> ErrorSink for F
where
    F: Fn(&ParseError),
{
    fn report(&self, error: &ParseError) {
        self(error)
    }
}

/// Per-run error collector.
pub struct Reporter<'a> {
    policy: ErrorPolicy,
    sink: Option<&'a dyn ErrorSink>,
    errors: Vec<ParseError>,
}

impl<'a> Reporter<'a> {
    pub fn new(policy: ErrorPolicy, sink: Option<&'a dyn ErrorSink>) -> Self {
        Self {
            policy,
            sink,
            errors: Vec::new(),
        }
    }

    pub fn fail_fast() -> Self {
        Self::new(ErrorPolicy::FailFast, None)
    }

    pub fn collecting() -> Self {
        Self::new(ErrorPolicy::Collect, None)
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Notify the sink, then either abort (`Err`) or record the error.
    pub fn report(&mut self, error: ParseError) -> ParseResult<()> {
        warn!("{}", error);
        if let Some(sink) = self.sink {
            sink.report(&error);
        }
        match self.policy {
            ErrorPolicy::FailFast => Err(error),
            ErrorPolicy::Collect => {
                self.errors.push(error);
                Ok(())
            }
        }
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }
}
