//! wavchain CLI - apply a chain of audio transforms to mono WAV files
//!
//! This binary reads a configuration file of converter commands, runs them
//! over the first input file and writes the result as a new WAV file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind as ClapErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wavchain_audio::TransformRegistry;
use wavchain_cli::{help, ErrorKind, Pipeline, ProcessorError};

/// Crate filters raised by `--verbose`.
const VERBOSE_FILTER: &str = "wavchain=debug,wavchain_cli=debug,wavchain_audio=debug,wavchain_spec=debug";

/// wavchain - Mono WAV transform chains
#[derive(Parser)]
#[command(name = "wavchain")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "wavchain -c <CONFIG> <OUTPUT> <INPUT>...")]
struct Cli {
    /// Configuration file with one converter command per line
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Input WAV files; the first is processed, `$n` in the config refers to the n-th
    #[arg(value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,

    /// Log pipeline stages to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let registry = TransformRegistry::builtin();
    let mut command = Cli::command().after_help(help::render_transforms(&registry));

    let matches = match command.try_get_matches_from_mut(std::env::args_os()) {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(ErrorKind::Argument.exit_code()),
            };
        }
    };
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(ErrorKind::Argument.exit_code());
        }
    };

    init_tracing(cli.verbose);

    let Some(config) = cli.config.clone() else {
        eprintln!("{}", command.render_help());
        return ExitCode::from(ErrorKind::Argument.exit_code());
    };

    match run(config, cli, registry) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { VERBOSE_FILTER } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Configures and runs the pipeline, then prints the report.
fn run(config: PathBuf, cli: Cli, registry: TransformRegistry) -> Result<ExitCode> {
    let Some(output) = cli.output else {
        return Err(ProcessorError::argument(
            "expected: -c <config.txt> <output.wav> <input1.wav> [input2.wav ...]",
        )
        .into());
    };
    if cli.inputs.is_empty() {
        return Err(ProcessorError::argument("at least one input WAV file is required").into());
    }

    let pipeline = Pipeline::with_registry(registry, &config, &output, &cli.inputs)?;
    let report = pipeline.process()?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        report.print_human();
    }
    Ok(ExitCode::SUCCESS)
}

/// Exit code of the first `ProcessorError` in the chain, 1 otherwise.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ProcessorError>())
        .map(ProcessorError::exit_code)
        .unwrap_or_else(|| ErrorKind::Other.exit_code())
}
