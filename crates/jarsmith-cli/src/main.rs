//! Jarsmith CLI - Command-line utility for compiling Java sources and
//! packaging jars.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

fn init_tracing(verbose: u8, quiet: bool) {
    let log_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let formatter = output::create_formatter(cli.json, cli.verbose > 0, cli.quiet);
    let show_progress = !cli.quiet && !cli.json;

    let result = match &cli.command {
        cli::Commands::Pack(args) => commands::pack::execute(args, &*formatter, show_progress),
        cli::Commands::Compile(args) => {
            commands::compile::execute(args, &*formatter, show_progress)
        }
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(ExitCode::SUCCESS)
        }
    };

    result.unwrap_or_else(|e| {
        formatter.format_error(&e);
        ExitCode::FAILURE
    })
}
