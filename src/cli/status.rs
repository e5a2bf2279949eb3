//! Status command handler
//!
//! Shows the selected bit source and the quality of its output.

use crate::config::Config;
use crate::entropy::{run_all_tests, EntropyTestResults};
use crate::error::Result;
use crate::qrng::get_backend;
use clap::Args;

/// Status command arguments
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Check a specific backend
    #[arg(long, short = 'b')]
    pub backend: Option<String>,

    /// Run entropy tests with N bytes
    #[arg(long, default_value = "10000")]
    pub entropy_bytes: usize,
}

/// Run the status command
pub fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load()?;

    let backend_name = args.backend.unwrap_or(config.defaults.backend.clone());
    let backend = get_backend(&backend_name, config.anu_api_key(), None)?;

    println!("qrange v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Backend: {} ({})", backend.name(), backend.description());
    println!();

    println!("Entropy Quality Test ({} bytes):", args.entropy_bytes);
    match backend.bytes(args.entropy_bytes) {
        Ok(bytes) => print!("{}", render_results(&run_all_tests(&bytes))),
        Err(e) => println!("  Error: Failed to generate random bytes: {}", e),
    }

    Ok(())
}

fn verdict(score: f64) -> &'static str {
    if score >= 0.1 {
        "PASS"
    } else if score >= 0.01 {
        "MARGINAL"
    } else {
        "FAIL"
    }
}

fn render_results(results: &EntropyTestResults) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  Balanced (monobit):   {:.4} [{}]\n",
        results.balanced,
        verdict(results.balanced)
    ));
    out.push_str(&format!(
        "  Uniform (chi-square): {:.4} [{}]\n",
        results.uniform,
        verdict(results.uniform)
    ));
    out.push_str(&format!(
        "  Scattered (runs):     {:.4} [{}]\n",
        results.scattered,
        verdict(results.scattered)
    ));
    out.push('\n');
    out.push_str(&format!(
        "  Overall: {:.4} [{}]\n",
        results.overall,
        if results.all_passed() { "PASS" } else { "FAIL" }
    ));
    out
}
