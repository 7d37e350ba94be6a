// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stdout/print_stderr: CLI tools are expected to print to stdout/stderr for user output.
// - exit: Calling `std::process::exit()` is standard for CLI apps to signal failure to the shell.
#![allow(clippy::print_stdout, clippy::print_stderr, clippy::exit)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use pxu::Severity;
use pxu_validator::{ManifestSourceConfig, ValidationConfig, output, validate_manifests};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Validate provider file units
#[derive(Parser, Debug)]
#[command(name = "pxu-validator")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); `RUST_LOG` wins when set
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the file units listed in JSON or YAML manifests
    Check {
        /// Manifest files to validate
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,

        /// Leave out issues below this severity (error, warning, advice)
        #[arg(long, default_value_t = Severity::Advice)]
        min_severity: Severity,

        /// Fail when an issue at or above this severity is found
        #[arg(long, default_value_t = Severity::Error)]
        fail_on: Severity,

        /// Maximum manifest size in bytes
        #[arg(long)]
        max_file_size: Option<u64>,
    },

    /// List the file role vocabulary, sorted
    Roles,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> Result<bool> {
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Check {
            paths,
            format,
            min_severity,
            fail_on,
            max_file_size,
        } => {
            let mut source = ManifestSourceConfig::default();
            source.paths = paths;
            if let Some(max_file_size) = max_file_size {
                source.max_file_size = max_file_size;
            }

            let mut config = ValidationConfig::default();
            config.min_severity = min_severity;
            config.fail_on = fail_on;

            let report = validate_manifests(&source, &config)?;
            match format {
                OutputFormat::Human => output::write_human(&report, &mut stdout)?,
                OutputFormat::Json => output::write_json(&report, &mut stdout)?,
            }
            stdout.flush()?;
            Ok(report.ok)
        }
        Commands::Roles => {
            output::write_roles(&mut stdout)?;
            stdout.flush()?;
            Ok(true)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}
