//! CLI command handlers
//!
//! Running without a subcommand generates a number (or runs the benchmark);
//! the subcommands manage configuration and inspect bit sources.

pub mod config;
pub mod generate;
pub mod status;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::ffi::OsString;
use tracing_subscriber::EnvFilter;

/// Quantum random integer generator
#[derive(Parser, Debug)]
#[command(name = "qrange")]
#[command(version, about, long_about = None)]
#[command(after_help = "Example: qrange --min 1 --max 10 --image")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub generate: generate::GenerateArgs,

    /// Log sampler and backend activity to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Parse `args`, rejecting generation flags next to a subcommand
    ///
    /// `--verbose` is global and may appear on either side of the subcommand.
    pub fn try_parse_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Self::try_parse_from(args)?;

        if let Some(command) = &cli.command {
            if cli.generate != generate::GenerateArgs::default() {
                return Err(Self::command().error(
                    ErrorKind::ArgumentConflict,
                    format!(
                        "generation flags cannot be used with the '{}' subcommand",
                        command.name()
                    ),
                ));
            }
        }

        Ok(cli)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show bit source and entropy status
    Status(status::StatusArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Config(_) => "config",
            Commands::Status(_) => "status",
        }
    }
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins unless `--verbose` was given.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("qrange=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI
pub fn run() -> crate::error::Result<()> {
    let cli = Cli::try_parse_args(std::env::args_os()).unwrap_or_else(|e| e.exit());
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Config(args)) => config::run(args),
        Some(Commands::Status(args)) => status::run(args),
        None => generate::run(cli.generate),
    }
}
