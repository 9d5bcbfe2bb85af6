//! Tests for help rendering (colors disabled)

use colepio::config::ColorMode;
use colepio::{ArgumentSpec, ArgumentType, Cli, CliBuilder, OptionSpec, Outcome, SubCommandSpec};

fn demo() -> CliBuilder {
    let main = SubCommandSpec::new("main").option(
        OptionSpec::new("test")
            .alias("test")
            .short_alias("t")
            .description("Test option")
            .argument(ArgumentSpec::new("uno")),
    );
    let sub = SubCommandSpec::new("test")
        .description("Test subcommand")
        .option(
            OptionSpec::new("hello")
                .alias("hello")
                .argument(ArgumentSpec::new("uno").required(true))
                .argument(ArgumentSpec::new("tres").kind(ArgumentType::String)),
        );
    Cli::builder("Test", main)
        .description("Hello world")
        .subcommand(sub)
        .subcommand(SubCommandSpec::new("bare"))
        .generate_help(true)
}

fn help_for(cli: &Cli, args: &[&str]) -> String {
    ColorMode::Never.apply();
    match cli.run(args).unwrap() {
        Outcome::Help(text) => text,
        other => panic!("expected help, got {:?}", other),
    }
}

#[test]
fn given_main_help_when_rendering_then_lists_options_and_subcommands() {
    // Arrange
    let cli = demo().version("0.1.0").build();

    // Act
    let text = help_for(&cli, &["--help"]);

    // Assert
    assert_eq!(
        text,
        "Test (0.1.0)\n \
         » Hello world\n\
         \n\
         Options:\n \
         » -t, --test – Test option » [uno]\n\
         \n\
         Subcommands:\n \
         » test – Test subcommand\n \
         » bare\n"
    );
}

#[test]
fn given_subcommand_help_with_types_when_rendering_then_shows_types_and_no_subcommand_list() {
    // Arrange
    let cli = demo().display_help_types(true).build();

    // Act
    let text = help_for(&cli, &["test", "-h"]);

    // Assert
    assert!(text.starts_with("Test\n"));
    assert!(text.contains(" » --hello » [uno {any}] [tres {string}]\n"));
    assert!(!text.contains("Subcommands:"));
}

#[test]
fn given_subcommand_without_options_when_rendering_then_omits_options_section() {
    let cli = demo().build();

    let text = help_for(&cli, &["bare", "--help"]);

    assert!(!text.contains("Options:"));
}
