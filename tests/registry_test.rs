//! Tests for subcommand resolution, help short-circuit and error policies

use std::cell::RefCell;
use std::rc::Rc;

use colepio::config::Settings;
use colepio::util::testing;
use colepio::{
    ArgumentSpec, Cli, CliBuilder, ErrorPolicy, OptionSpec, Outcome, ParseError, SubCommandSpec,
};

type Log = Rc<RefCell<Vec<String>>>;

fn logging_handler(log: &Log, entry: &str) -> impl Fn() + 'static {
    let log = Rc::clone(log);
    let entry = entry.to_string();
    move || log.borrow_mut().push(entry.clone())
}

fn sample_cli(log: &Log) -> CliBuilder {
    let main = SubCommandSpec::new("main")
        .description("Main command")
        .option(
            OptionSpec::new("verbose")
                .alias("verbose")
                .short_alias("v"),
        )
        .handler(logging_handler(log, "main"));
    let build = SubCommandSpec::new("build")
        .description("Build things")
        .option(
            OptionSpec::new("target")
                .alias("target")
                .argument(ArgumentSpec::new("name").required(true)),
        )
        .handler(logging_handler(log, "build"));

    Cli::builder("tool", main).version("1.2.3").subcommand(build)
}

#[test]
fn given_no_subcommand_token_when_running_then_dispatches_main() {
    // Arrange
    testing::init_test_setup();
    let log = Log::default();
    let cli = sample_cli(&log).build();

    // Act
    let outcome = cli.run(&["-v"]).unwrap();

    // Assert
    assert_eq!(*log.borrow(), vec!["main"]);
    match outcome {
        Outcome::Dispatched(report) => {
            assert_eq!(report.subcommand.as_deref(), Some("main"));
            assert!(report.is_clean());
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn given_empty_args_when_running_then_dispatches_main() {
    let log = Log::default();
    let cli = sample_cli(&log).build();

    cli.run::<&str>(&[]).unwrap();

    assert_eq!(*log.borrow(), vec!["main"]);
}

#[test]
fn given_empty_first_token_when_running_then_falls_back_to_main() {
    let log = Log::default();
    let cli = sample_cli(&log).build();

    cli.run(&["", "--verbose"]).unwrap();

    assert_eq!(*log.borrow(), vec!["main"]);
}

#[test]
fn given_named_subcommand_when_running_then_dispatches_it() {
    let log = Log::default();
    let cli = sample_cli(&log).build();

    cli.run(&["build", "--target", "x86"]).unwrap();

    assert_eq!(*log.borrow(), vec!["build"]);
}

#[test]
fn given_unknown_subcommand_when_running_then_reports_subcommand_missing() {
    // Arrange
    let log = Log::default();
    let cli = sample_cli(&log).build();

    // Act
    let result = cli.run(&["deploy"]);

    // Assert
    assert_eq!(
        result,
        Err(ParseError::SubCommandMissing {
            name: "deploy".into(),
            cli: "tool".into(),
        })
    );
    assert!(log.borrow().is_empty());
}

#[test]
fn given_subcommand_for_cli_without_subcommands_when_running_then_reports_subcommand_missing() {
    let cli = Cli::builder("solo", SubCommandSpec::new("main")).build();

    let result = cli.run(&["deploy"]);

    assert_eq!(
        result,
        Err(ParseError::SubCommandMissing {
            name: "deploy".into(),
            cli: "solo".into(),
        })
    );
}

#[test]
fn given_main_without_declared_options_when_running_with_keys_then_dispatches_main() {
    let log = Log::default();
    let main = SubCommandSpec::new("main").handler(logging_handler(&log, "main"));
    let cli = Cli::builder("solo", main).build();

    let outcome = cli.run(&["--anything", "x"]).unwrap();

    assert!(matches!(outcome, Outcome::Dispatched(ref report) if report.is_clean()));
    assert_eq!(*log.borrow(), vec!["main"]);
}

#[test]
fn given_unknown_subcommand_when_collecting_then_not_dispatched_with_report() {
    let log = Log::default();
    let cli = sample_cli(&log).error_policy(ErrorPolicy::Collect).build();

    let outcome = cli.run(&["deploy", "--x"]).unwrap();

    assert!(matches!(outcome, Outcome::NotDispatched(_)));
    assert_eq!(outcome.errors().len(), 1);
    assert!(log.borrow().is_empty());
}

#[test]
fn given_help_flag_with_help_enabled_when_running_then_returns_help_without_dispatch() {
    // Arrange
    let log = Log::default();
    let cli = sample_cli(&log).generate_help(true).build();

    // Act
    let outcome = cli.run(&["build", "-h"]).unwrap();

    // Assert
    assert!(matches!(outcome, Outcome::Help(ref text) if text.contains("--target")));
    assert!(log.borrow().is_empty());
}

#[test]
fn given_help_flag_with_help_disabled_when_running_then_help_is_an_unknown_option() {
    let log = Log::default();
    let cli = sample_cli(&log).build();

    let result = cli.run(&["--help"]);

    assert_eq!(
        result,
        Err(ParseError::OptionNotFound {
            key: "help".into(),
            subcommand: "main".into(),
        })
    );
}

#[test]
fn given_help_flag_for_unknown_subcommand_when_running_then_resolution_error_wins() {
    let log = Log::default();
    let cli = sample_cli(&log).generate_help(true).build();

    let result = cli.run(&["deploy", "--help"]);

    assert!(matches!(result, Err(ParseError::SubCommandMissing { .. })));
}

#[test]
fn given_sink_and_collect_policy_when_running_then_sink_sees_every_error_in_order() {
    // Arrange
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink_seen = Rc::clone(&seen);
    let log = Log::default();
    let cli = sample_cli(&log)
        .error_policy(ErrorPolicy::Collect)
        .error_sink(move |e: &ParseError| sink_seen.borrow_mut().push(e.to_string()))
        .build();

    // Act: missing argument for --target, then an unknown key
    let outcome = cli.run(&["build", "--target", "--bogus"]).unwrap();

    // Assert
    assert_eq!(outcome.errors().len(), 2);
    assert_eq!(
        *seen.borrow(),
        vec![
            "Missing option argument: name is missing in build".to_string(),
            "Option not found: Option bogus has not been found in build subcommand".to_string(),
        ]
    );
    assert_eq!(*log.borrow(), vec!["build"]);
}

#[test]
fn given_sink_and_fail_fast_when_running_then_sink_is_notified_before_unwinding() {
    let seen: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink_seen = Rc::clone(&seen);
    let log = Log::default();
    let cli = sample_cli(&log)
        .error_sink(move |e: &ParseError| sink_seen.borrow_mut().push(e.to_string()))
        .build();

    let result = cli.run(&["--nope"]);

    assert!(result.is_err());
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn given_settings_when_building_then_applies_help_and_policy() {
    // Arrange
    let settings = Settings {
        generate_help: true,
        error_policy: ErrorPolicy::Collect,
        ..Settings::default()
    };
    let log = Log::default();

    // Act
    let cli = sample_cli(&log).settings(&settings).build();

    // Assert
    assert_eq!(cli.policy(), ErrorPolicy::Collect);
    assert!(matches!(cli.run(&["--help"]).unwrap(), Outcome::Help(_)));
}
