//! Randomness quality checks
//!
//! Statistical tests over raw bytes from a bit source, and a goodness-of-fit
//! score for sampled histograms.

pub mod stats;

pub use stats::{chi_square_uniformity, run_all_tests, EntropyTestResults};
