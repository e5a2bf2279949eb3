//! qrange CLI entry point
//!
//! Quantum random integer generator

use qrange::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
