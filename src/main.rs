use std::env;
use std::process;

use colepio::cli::{output, CliError, CliResult};
use colepio::config::Settings;
use colepio::{exitcode, ArgumentSpec, ArgumentType, Cli, OptionSpec, Outcome, SubCommandSpec};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let cwd = env::current_dir().ok();
    let settings = match Settings::load(cwd.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            output::error(&e);
            process::exit(exitcode::CONFIG);
        }
    };

    setup_logging(settings.verbosity);
    settings.color.apply();

    let cli = demo_cli(&settings);
    match execute(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            output::error(&e);
            process::exit(e.exit_code());
        }
    }
}

fn execute(cli: &Cli) -> CliResult<i32> {
    match cli.run_env()? {
        Outcome::Help(text) => {
            output::info(&text);
            Ok(exitcode::OK)
        }
        outcome => {
            let errors = outcome.errors();
            for e in errors {
                output::warning(e);
            }
            if errors.is_empty() {
                Ok(exitcode::OK)
            } else {
                Err(CliError::Usage(format!("{} error(s) reported", errors.len())))
            }
        }
    }
}

fn demo_cli(settings: &Settings) -> Cli {
    let main = SubCommandSpec::new("main")
        .description("Main command")
        .option(
            OptionSpec::new("test")
                .alias("test")
                .short_alias("t")
                .description("Test option")
                .required(true)
                .argument(ArgumentSpec::new("uno"))
                .handler(|args| output::info(&format!("hi {}", args.join(" ")))),
        );

    let test = SubCommandSpec::new("test")
        .description("Test subcommand")
        .option(
            OptionSpec::new("hello")
                .alias("hello")
                .description("Hello option")
                .argument(ArgumentSpec::new("uno").required(true))
                .argument(ArgumentSpec::new("dos"))
                .argument(
                    ArgumentSpec::new("tres")
                        .required(true)
                        .kind(ArgumentType::String),
                )
                .handler(|args| output::info(&args.join(" "))),
        )
        .handler(|| output::info("HI!"));

    Cli::builder("Test", main)
        .version(env!("CARGO_PKG_VERSION"))
        .description("Hello world")
        .subcommand(test)
        .settings(settings)
        .build()
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
