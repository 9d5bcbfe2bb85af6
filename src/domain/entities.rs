//! Domain entities: argument, option and subcommand definitions

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Placeholder value that skips an optional positional argument.
pub const SKIP_PLACEHOLDER: &str = "-";

/// Decimal literal with optional sign/fraction/exponent, or an unsigned radix integer.
const NUMBER_PATTERN: &str =
    r"^(?:[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?|0[xX][0-9a-fA-F]+|0[oO][0-7]+|0[bB][01]+)$";

/// Declared type of a positional option argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ArgumentType {
    String,
    Number,
    Boolean,
    #[default]
    Any,
}

impl ArgumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgumentType::String => "string",
            ArgumentType::Number => "number",
            ArgumentType::Boolean => "boolean",
            ArgumentType::Any => "any",
        }
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NUMBER_PATTERN).expect("number pattern is valid"))
}

/// Infer the type of a raw argument value.
///
/// Never returns [`ArgumentType::Any`]. Surrounding whitespace is ignored for
/// the numeric check, so an empty or blank value counts as a number.
pub fn parse_type(value: &str) -> ArgumentType {
    let trimmed = value.trim();
    if trimmed.is_empty() || number_regex().is_match(trimmed) {
        ArgumentType::Number
    } else if value == "true" || value == "false" {
        ArgumentType::Boolean
    } else {
        ArgumentType::String
    }
}

/// Positional argument declared by an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    name: String,
    kind: ArgumentType,
    required: bool,
}

impl ArgumentSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ArgumentType::Any,
            required: false,
        }
    }

    pub fn kind(mut self, kind: ArgumentType) -> Self {
        self.kind = kind;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn argument_type(&self) -> ArgumentType {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// Callback receiving an option's resolved argument values.
pub type OptionHandler = Box<dyn Fn(&[String])>;

/// Callback run after all option handlers of a subcommand.
pub type SubCommandHandler = Box<dyn Fn()>;

/// Option accepted by a subcommand.
pub struct OptionSpec {
    name: String,
    description: Option<String>,
    aliases: Vec<String>,
    short_aliases: Vec<String>,
    required: bool,
    arguments: Vec<ArgumentSpec>,
    priority: i32,
    handler: Option<OptionHandler>,
}

impl OptionSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            aliases: Vec::new(),
            short_aliases: Vec::new(),
            required: false,
            arguments: Vec::new(),
            priority: 0,
            handler: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a long alias, matched from `--alias`.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Add a short alias, matched from `-a`.
    pub fn short_alias(mut self, alias: impl Into<String>) -> Self {
        self.short_aliases.push(alias.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn argument(mut self, argument: ArgumentSpec) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Lower priorities run first; equal priorities keep input order.
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn handler(mut self, handler: impl Fn(&[String]) + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn long_aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn short_aliases(&self) -> &[String] {
        &self.short_aliases
    }

    /// Long aliases followed by short aliases.
    pub fn all_aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases
            .iter()
            .chain(self.short_aliases.iter())
            .map(String::as_str)
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn arguments(&self) -> &[ArgumentSpec] {
        &self.arguments
    }

    pub fn get_priority(&self) -> i32 {
        self.priority
    }

    /// Human-readable label: first short and first long alias, e.g. `-t, --test`.
    ///
    /// Falls back to the option name when no aliases are declared.
    pub fn display_aliases(&self) -> String {
        let parts: Vec<String> = self
            .short_aliases
            .first()
            .map(|a| format!("-{}", a))
            .into_iter()
            .chain(self.aliases.first().map(|a| format!("--{}", a)))
            .collect();
        if parts.is_empty() {
            self.name.clone()
        } else {
            parts.join(", ")
        }
    }

    pub(crate) fn invoke(&self, args: &[String]) {
        if let Some(handler) = &self.handler {
            handler(args);
        }
    }
}

impl fmt::Debug for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionSpec")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("short_aliases", &self.short_aliases)
            .field("required", &self.required)
            .field("arguments", &self.arguments)
            .field("priority", &self.priority)
            .field("handler", &self.handler.is_some())
            .finish_non_exhaustive()
    }
}

/// A subcommand with its options.
///
/// Keeps an alias → option index that is filled as options are added.
/// When two options share an alias, the one added first wins.
///
/// The option list stays undeclared until the first [`option`](Self::option)
/// call; an undeclared list disables option validation for the subcommand.
pub struct SubCommandSpec {
    name: String,
    description: Option<String>,
    options: Option<Vec<OptionSpec>>,
    alias_index: HashMap<String, usize>,
    handler: Option<SubCommandHandler>,
}

impl SubCommandSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            options: None,
            alias_index: HashMap::new(),
            handler: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn option(mut self, option: OptionSpec) -> Self {
        let options = self.options.get_or_insert_with(Vec::new);
        let position = options.len();
        for alias in option.all_aliases() {
            self.alias_index
                .entry(alias.to_string())
                .or_insert(position);
        }
        options.push(option);
        self
    }

    pub fn handler(mut self, handler: impl Fn() + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn options(&self) -> &[OptionSpec] {
        self.options.as_deref().unwrap_or_default()
    }

    /// Whether any option was ever added.
    pub fn declares_options(&self) -> bool {
        self.options.is_some()
    }

    /// Find the option owning `alias` (long or short).
    pub fn find_option(&self, alias: &str) -> Option<&OptionSpec> {
        let &position = self.alias_index.get(alias)?;
        self.options().get(position)
    }

    pub(crate) fn invoke(&self) {
        if let Some(handler) = &self.handler {
            handler();
        }
    }
}

impl fmt::Debug for SubCommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubCommandSpec")
            .field("name", &self.name)
            .field("options", &self.options)
            .field("handler", &self.handler.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", ArgumentType::Number)]
    #[case("-3.5", ArgumentType::Number)]
    #[case("1e3", ArgumentType::Number)]
    #[case(".5", ArgumentType::Number)]
    #[case("0x1F", ArgumentType::Number)]
    #[case(" 7 ", ArgumentType::Number)]
    #[case("", ArgumentType::Number)]
    #[case("true", ArgumentType::Boolean)]
    #[case("false", ArgumentType::Boolean)]
    #[case("True", ArgumentType::String)]
    #[case("abc", ArgumentType::String)]
    #[case("Infinity", ArgumentType::String)]
    #[case("NaN", ArgumentType::String)]
    #[case("-", ArgumentType::String)]
    #[case("12abc", ArgumentType::String)]
    fn given_raw_value_when_inferring_type_then_classifies(
        #[case] value: &str,
        #[case] expected: ArgumentType,
    ) {
        assert_eq!(parse_type(value), expected);
    }

    #[test]
    fn given_shared_alias_when_indexing_then_first_option_wins() {
        let sub = SubCommandSpec::new("main")
            .option(OptionSpec::new("first").alias("dup"))
            .option(OptionSpec::new("second").alias("dup").short_alias("s"));

        assert_eq!(sub.find_option("dup").map(OptionSpec::name), Some("first"));
        assert_eq!(sub.find_option("s").map(OptionSpec::name), Some("second"));
        assert!(sub.find_option("missing").is_none());
    }

    #[test]
    fn given_no_option_calls_when_building_then_options_are_undeclared() {
        let bare = SubCommandSpec::new("bare");
        let with_one = SubCommandSpec::new("one").option(OptionSpec::new("x").alias("x"));

        assert!(!bare.declares_options());
        assert!(bare.options().is_empty());
        assert!(with_one.declares_options());
        assert_eq!(with_one.options().len(), 1);
    }

    #[rstest]
    #[case(OptionSpec::new("test").alias("test").short_alias("t"), "-t, --test")]
    #[case(OptionSpec::new("test").alias("test").alias("other"), "--test")]
    #[case(OptionSpec::new("verbose").short_alias("v"), "-v")]
    #[case(OptionSpec::new("bare"), "bare")]
    fn given_aliases_when_displaying_then_uses_first_of_each(
        #[case] option: OptionSpec,
        #[case] expected: &str,
    ) {
        assert_eq!(option.display_aliases(), expected);
    }
}
