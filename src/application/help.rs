//! Help text rendering
//!
//! Colors come from `colored`, which honors NO_COLOR/CLICOLOR and any override
//! set through [`ColorMode`](crate::config::ColorMode).

use std::fmt::Write;

use colored::Colorize;
use itertools::Itertools;

use crate::domain::{ArgumentSpec, OptionSpec, SubCommandSpec};

/// CLI-level information shown at the top of the help text.
#[derive(Debug, Clone, Copy)]
pub struct HelpHeader<'a> {
    pub name: &'a str,
    pub version: Option<&'a str>,
    pub description: Option<&'a str>,
}

/// Render help for `subcommand`.
///
/// `siblings` are listed under "Subcommands" and should only be passed when
/// `subcommand` is the main one.
pub fn render_help(
    header: HelpHeader<'_>,
    subcommand: &SubCommandSpec,
    siblings: &[SubCommandSpec],
    display_types: bool,
) -> String {
    let mut out = String::new();

    let _ = write!(out, "{}", header.name.green());
    match header.version {
        Some(version) => {
            let _ = writeln!(out, " ({})", version.yellow());
        }
        None => out.push('\n'),
    }
    if let Some(description) = header.description {
        let _ = writeln!(out, " » {}", description.cyan());
    }

    if !subcommand.options().is_empty() {
        let _ = writeln!(out, "\n{}", "Options:".magenta());
        for option in subcommand.options() {
            let _ = writeln!(out, "{}", option_line(option, display_types));
        }
    }

    if !siblings.is_empty() {
        let _ = writeln!(out, "\n{}", "Subcommands:".magenta());
        for sibling in siblings {
            match sibling.get_description() {
                Some(description) => {
                    let _ = writeln!(out, " » {} – {}", sibling.name(), description);
                }
                None => {
                    let _ = writeln!(out, " » {}", sibling.name());
                }
            }
        }
    }

    out
}

fn option_line(option: &OptionSpec, display_types: bool) -> String {
    let aliases = option
        .short_aliases()
        .iter()
        .map(|a| format!("-{}", a))
        .chain(option.long_aliases().iter().map(|a| format!("--{}", a)))
        .map(|a| a.green().to_string())
        .join(", ");

    let mut line = format!(" » {}", aliases);
    if let Some(description) = option.get_description() {
        let _ = write!(line, " – {}", description.cyan());
    }
    if !option.arguments().is_empty() {
        let args = option
            .arguments()
            .iter()
            .map(|a| argument_label(a, display_types))
            .join(" ");
        let _ = write!(line, " » {}", args);
    }
    line
}

fn argument_label(argument: &ArgumentSpec, display_types: bool) -> String {
    let mut inner = argument.name().magenta().to_string();
    if display_types {
        let _ = write!(
            inner,
            " {}",
            format!("{{{}}}", argument.argument_type()).green()
        );
    }
    format!("{}{}{}", "[".red(), inner, "]".red())
}
