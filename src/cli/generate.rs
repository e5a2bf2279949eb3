//! Generate command handler
//!
//! The default command: validate the range, optionally draw the circuit, then
//! either generate one number or run the benchmark.

use crate::benchmark::{self, plot, BenchmarkReport};
use crate::circuit::svg;
use crate::config::Config;
use crate::entropy::stats::PASS_THRESHOLD;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::generation::Generation;
use crate::qrng::{available_backends, get_backend};
use crate::sampler::{RangeSpec, Sampler};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

/// Generate command arguments
#[derive(Args, Debug, Default, PartialEq)]
pub struct GenerateArgs {
    /// Minimum value of the range (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<i64>,

    /// Maximum value of the range (inclusive)
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<i64>,

    /// Save the quantum circuit diagram
    #[arg(short = 'i', long)]
    pub image: bool,

    /// Number of qubits in the saved circuit diagram
    #[arg(short = 'q', long)]
    pub qubits: Option<usize>,

    /// Run a benchmark and save a histogram instead of generating one number
    #[arg(short = 'b', long)]
    pub benchmark: bool,

    /// Number of benchmark samples
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,

    /// Bit source backend
    #[arg(long)]
    pub backend: Option<String>,

    /// Seed for the simulator and pseudo backends
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(short = 'f', long)]
    pub format: Option<String>,

    /// Directory for circuit diagrams and histograms
    #[arg(long)]
    pub image_dir: Option<PathBuf>,

    /// Give up after this many draws per number (0 = never)
    #[arg(long)]
    pub max_attempts: Option<u64>,

    /// List available backends
    #[arg(short = 'B', long = "list-backends")]
    pub list_backends: bool,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Arguments merged with config defaults
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub min: i64,
    pub max: i64,
    pub image: bool,
    pub qubits: usize,
    pub benchmark: bool,
    pub iterations: usize,
    pub backend: String,
    pub api_key: Option<String>,
    pub seed: Option<u64>,
    pub format: String,
    pub image_dir: PathBuf,
    pub max_attempts: u64,
}

impl GenerateOptions {
    /// Fill every unset argument from `config`
    pub fn resolve(args: GenerateArgs, config: &Config) -> Self {
        Self {
            min: args.min.unwrap_or(config.defaults.min),
            max: args.max.unwrap_or(config.defaults.max),
            image: args.image,
            qubits: args.qubits.unwrap_or(config.defaults.qubits),
            benchmark: args.benchmark,
            iterations: args.iterations.unwrap_or(config.defaults.iterations),
            backend: args.backend.unwrap_or_else(|| config.defaults.backend.clone()),
            api_key: config.anu_api_key().map(str::to_string),
            seed: args.seed,
            format: args.format.unwrap_or_else(|| config.defaults.format.clone()),
            image_dir: args
                .image_dir
                .unwrap_or_else(|| config.output.image_dir.clone()),
            max_attempts: args.max_attempts.unwrap_or(config.sampler.max_attempts),
        }
    }
}

/// Run the generate command
pub fn run(args: GenerateArgs) -> Result<()> {
    if args.list_backends {
        list_backends();
        return Ok(());
    }

    if args.list_formats {
        list_formats();
        return Ok(());
    }

    run_with(args, Config::load)
}

/// Run with the config supplied by `load`
///
/// A range given entirely on the command line is checked before `load`
/// runs, so an invalid range never touches the config file.
fn run_with(args: GenerateArgs, load: impl FnOnce() -> Result<Config>) -> Result<()> {
    if let (Some(min), Some(max)) = (args.min, args.max) {
        RangeSpec::new(min, max)?;
    }

    let config = load()?;
    let options = GenerateOptions::resolve(args, &config);

    let stdout = std::io::stdout();
    execute(&options, &mut stdout.lock())
}

/// Carry out a resolved generate request, writing results to `out`
///
/// Progress notes go to stderr so `out` stays machine-readable.
pub fn execute(options: &GenerateOptions, out: &mut impl Write) -> Result<()> {
    eprintln!("Starting quantum random number generation...");

    // Nothing is drawn or rendered for an invalid range
    let range = RangeSpec::new(options.min, options.max)?;

    let formatter = get_formatter(&options.format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", options.format)))?;

    let backend = get_backend(
        &options.backend,
        options.api_key.as_deref(),
        options.seed,
    )?;
    let sampler = Sampler::new(backend.as_ref()).with_max_attempts(options.max_attempts);

    if options.image {
        eprintln!(
            "Loading quantum circuit image for {} qubits...",
            options.qubits
        );
        let path = svg::draw_and_save(options.qubits, &options.image_dir)?;
        eprintln!("Quantum circuit image saved as {}.", path.display());
    }

    if options.benchmark {
        eprintln!(
            "Benchmarking quantum random number generator for {} iterations between {} and {}...",
            options.iterations, options.min, options.max
        );
        let report = benchmark::run(&range, options.iterations, &sampler)?;
        let path = plot::save_histogram(&report, &options.image_dir)?;
        eprintln!("Benchmark histogram saved as {}.", path.display());

        let summary = match formatter.name() {
            "json" => serde_json::to_string_pretty(&report)?,
            _ => benchmark_summary(&report),
        };
        writeln!(out, "{}", summary)?;
    } else {
        eprintln!(
            "Generating a random number between {} and {}...",
            options.min, options.max
        );
        let sample = sampler.sample(&range)?;
        let generation = Generation::new(range, sample, backend.name());
        writeln!(out, "{}", formatter.format(&generation)?)?;
    }

    Ok(())
}

/// Plain-text benchmark summary
fn benchmark_summary(report: &BenchmarkReport) -> String {
    let verdict = if report.uniformity >= PASS_THRESHOLD {
        "PASS"
    } else {
        "FAIL"
    };

    let mut output = format!(
        "Samples: {} in {} ({} bits per draw, backend: {})\n",
        report.iterations, report.range, report.bit_width, report.backend
    );
    output.push_str(&format!(
        "Draws: {} ({:.3} per sample, {:.1}% accepted)\n",
        report.total_draws,
        report.mean_draws(),
        report.acceptance_rate() * 100.0
    ));
    output.push_str(&format!(
        "Uniformity (chi-square): {:.4} [{}]",
        report.uniformity, verdict
    ));
    output
}

/// Print available backends
fn list_backends() {
    println!("Available backends:");
    for backend in available_backends() {
        println!("  {:10} - {}", backend.name, backend.description);
    }
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
