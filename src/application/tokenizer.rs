//! Raw argument tokenizer
//!
//! Splits an argument vector into an optional leading subcommand and option
//! keys with their positional values.

use regex::Regex;
use tracing::{debug, instrument, trace};

use crate::application::reporter::Reporter;
use crate::domain::{ParseError, ParseResult, ParsedArgs};

/// One or two dashes followed by a non-empty key.
const KEY_PATTERN: &str = r"^--?(.+)$";

pub struct Tokenizer {
    key_regex: Regex,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            key_regex: Regex::new(KEY_PATTERN).expect("key pattern is valid"),
        }
    }

    /// Key named by `token`, if it is key-shaped.
    pub fn key<'t>(&self, token: &'t str) -> Option<&'t str> {
        self.key_regex
            .captures(token)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// Tokenize `tokens`.
    ///
    /// The first token is taken as the subcommand unless it is key-shaped.
    /// A value with no open key is reported as [`ParseError::MissingKeyForValue`]
    /// and ends tokenization; under a collecting policy the partial result is returned.
    #[instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
    pub fn parse<S: AsRef<str>>(
        &self,
        tokens: &[S],
        reporter: &mut Reporter<'_>,
    ) -> ParseResult<ParsedArgs> {
        let mut parsed = ParsedArgs::new();
        let mut rest = tokens.iter().map(|t| t.as_ref()).peekable();

        if let Some(&first) = rest.peek() {
            if self.key(first).is_none() {
                debug!("subcommand token: {:?}", first);
                parsed.set_subcommand(first.to_string());
                rest.next();
            }
        }

        let mut current: Option<&str> = None;
        for token in rest {
            if let Some(key) = self.key(token) {
                trace!("open key: {}", key);
                parsed.open(key);
                current = Some(key);
                continue;
            }

            let Some(key) = current else {
                reporter.report(ParseError::MissingKeyForValue {
                    value: token.to_string(),
                })?;
                break;
            };
            trace!("value {:?} -> {}", token, key);
            parsed.append(key, token.to_string());
        }

        debug!(
            "parsed {} key(s), subcommand={:?}",
            parsed.len(),
            parsed.subcommand()
        );
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("-t", Some("t"))]
    #[case("--test", Some("test"))]
    #[case("---x", Some("-x"))]
    #[case("--", Some("-"))]
    #[case("-", None)]
    #[case("value", None)]
    #[case("", None)]
    fn given_token_when_matching_key_shape_then_extracts_key(
        #[case] token: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(Tokenizer::new().key(token), expected);
    }

    #[test]
    fn given_empty_input_when_parsing_then_no_subcommand_and_no_keys() {
        let parsed = Tokenizer::new()
            .parse::<&str>(&[], &mut Reporter::fail_fast())
            .unwrap();

        assert_eq!(parsed, ParsedArgs::new());
    }
}
