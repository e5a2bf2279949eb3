//! qrange: Quantum Random Integer Generator
//!
//! A library and CLI tool for drawing integers uniformly from an inclusive
//! range by measuring qubits in uniform superposition.
//!
//! ## Features
//!
//! - Rejection sampling from fixed-width bit strings onto any range
//! - Multiple bit sources (circuit simulator, pseudo, ANU QRNG)
//! - SVG circuit diagrams
//! - Benchmarks with plotly histograms and a chi-square uniformity score
//!
//! ## Quick Start
//!
//! ```rust
//! use qrange::qrng::simulator::SimulatorBackend;
//! use qrange::sampler::{generate, RangeSpec, Sampler};
//!
//! let backend = SimulatorBackend::new();
//!
//! // One number in [1, 10]
//! let n = generate(1, 10, &backend).unwrap();
//! assert!((1..=10).contains(&n));
//!
//! // Many numbers, with rejection statistics
//! let range = RangeSpec::new(1, 10).unwrap();
//! let samples = Sampler::new(&backend).sample_many(&range, 100).unwrap();
//! let draws: u64 = samples.iter().map(|s| s.attempts).sum();
//! println!("{} draws for {} numbers", draws, samples.len());
//! ```

pub mod benchmark;
pub mod circuit;
pub mod cli;
pub mod config;
pub mod constants;
pub mod entropy;
pub mod error;
pub mod format;
pub mod generation;
pub mod qrng;
pub mod sampler;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use qrng::BitSource;
pub use sampler::{generate, RangeSpec, Sample, Sampler};
