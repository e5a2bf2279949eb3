//! Bit sources for the range sampler
//!
//! This module defines the `BitSource` trait and implementations for various
//! random sources. Each backend is a single file implementing the trait.
//!
//! ## Flex Point
//! Adding a new backend requires:
//! 1. Create `src/qrng/{backend_name}.rs` implementing `BitSource`
//! 2. Add `pub mod {backend_name};` below
//! 3. Register it in `get_backend` and `available_backends`

pub mod anu;
pub mod pseudo;
pub mod simulator;

use crate::constants::limits::MAX_BITS_PER_DRAW;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Trait for random bit sources
///
/// Implementations must be thread-safe (Send + Sync) so independent samplers
/// can share a backend across threads.
pub trait BitSource: Send + Sync {
    /// Returns the backend name (e.g., "simulator", "pseudo", "anu")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of this backend
    fn description(&self) -> &'static str;

    /// Generate n random bytes
    ///
    /// Must return exactly `n` bytes or an error.
    fn bytes(&self, n: usize) -> Result<Vec<u8>>;

    /// Draw a `k`-bit value uniformly distributed in `[0, 2^k - 1]`
    ///
    /// Default implementation reads `ceil(k / 8)` bytes as a big-endian
    /// integer and keeps the top `k` bits.
    fn draw_bits(&self, k: u32) -> Result<u64> {
        check_width(k)?;
        if k == 0 {
            return Ok(0);
        }

        let n = k.div_ceil(8) as usize;
        let bytes = self.bytes(n)?;
        if bytes.len() != n {
            return Err(Error::EntropySource(format!(
                "{} returned {} bytes, expected {}",
                self.name(),
                bytes.len(),
                n
            )));
        }

        let value = bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64);
        Ok(value >> (n as u32 * 8 - k))
    }
}

/// Reject draw widths no backend can satisfy
pub(crate) fn check_width(k: u32) -> Result<()> {
    if k > MAX_BITS_PER_DRAW {
        return Err(Error::EntropySource(format!(
            "cannot draw {} bits at once (maximum is {})",
            k, MAX_BITS_PER_DRAW
        )));
    }
    Ok(())
}

/// Information about a backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendInfo {
    /// Backend name (used in config/CLI)
    pub name: String,
    /// Human-readable description
    pub description: String,
}

/// Get a backend by name
///
/// `api_key` is only used by the ANU backend, `seed` only by the simulator
/// and pseudo backends.
pub fn get_backend(
    name: &str,
    api_key: Option<&str>,
    seed: Option<u64>,
) -> Result<Box<dyn BitSource>> {
    match name {
        "simulator" => Ok(match seed {
            Some(seed) => Box::new(simulator::SimulatorBackend::with_seed(seed)),
            None => Box::new(simulator::SimulatorBackend::new()),
        }),
        "pseudo" => Ok(match seed {
            Some(seed) => Box::new(pseudo::SeededPseudoBackend::new(seed)),
            None => Box::new(pseudo::PseudoBackend::new()),
        }),
        "anu" => Ok(match api_key {
            Some(key) => Box::new(anu::AnuBackend::with_api_key(key)),
            None => Box::new(anu::AnuBackend::new()),
        }),
        other => Err(Error::Config(format!("Unknown backend: {}", other))),
    }
}

/// List all available backends with their info
pub fn available_backends() -> Vec<BackendInfo> {
    vec![
        BackendInfo {
            name: "simulator".to_string(),
            description: "Simulated Hadamard-and-measure quantum circuit".to_string(),
        },
        BackendInfo {
            name: "pseudo".to_string(),
            description: "Pseudo-random number generator (for testing)".to_string(),
        },
        BackendInfo {
            name: "anu".to_string(),
            description: "Australian National University Quantum Random Number Generator"
                .to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out a fixed byte pattern
    struct FixedBytes(Vec<u8>);

    impl BitSource for FixedBytes {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn description(&self) -> &'static str {
            "fixed bytes"
        }

        fn bytes(&self, n: usize) -> Result<Vec<u8>> {
            Ok(self.0.iter().copied().take(n).collect())
        }
    }

    #[test]
    fn test_draw_bits_keeps_top_bits() {
        let source = FixedBytes(vec![0b1011_0000, 0xFF]);
        assert_eq!(source.draw_bits(4).unwrap(), 0b1011);
        assert_eq!(source.draw_bits(1).unwrap(), 1);
        assert_eq!(source.draw_bits(8).unwrap(), 0b1011_0000);
        assert_eq!(source.draw_bits(12).unwrap(), 0b1011_0000_1111);
    }

    #[test]
    fn test_draw_bits_zero_width() {
        let source = FixedBytes(vec![]);
        assert_eq!(source.draw_bits(0).unwrap(), 0);
    }

    #[test]
    fn test_draw_bits_full_width() {
        let source = FixedBytes(vec![0xFF; 8]);
        assert_eq!(source.draw_bits(64).unwrap(), u64::MAX);
    }

    #[test]
    fn test_draw_bits_too_wide() {
        let source = FixedBytes(vec![0xFF; 9]);
        assert!(matches!(source.draw_bits(65), Err(Error::EntropySource(_))));
    }

    #[test]
    fn test_draw_bits_short_read_fails() {
        let source = FixedBytes(vec![0xFF]);
        assert!(matches!(source.draw_bits(16), Err(Error::EntropySource(_))));
    }

    #[test]
    fn test_get_backend() {
        assert_eq!(get_backend("simulator", None, None).unwrap().name(), "simulator");
        assert_eq!(get_backend("pseudo", None, None).unwrap().name(), "pseudo");
        assert_eq!(
            get_backend("pseudo", None, Some(7)).unwrap().name(),
            "pseudo-seeded"
        );
        assert_eq!(get_backend("anu", Some("key"), None).unwrap().name(), "anu");
        assert!(matches!(
            get_backend("nope", None, None),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_available_backends() {
        let backends = available_backends();
        assert_eq!(backends.len(), 3);
        for name in ["simulator", "pseudo", "anu"] {
            assert!(backends.iter().any(|b| b.name == name));
            assert!(get_backend(name, None, None).is_ok());
        }
    }
}
