//! Pseudo-random backend for testing
//!
//! Uses the `rand` crate's thread-local RNG. This is NOT quantum random,
//! but provides a fast backend for development and a seedable one for
//! reproducible tests.

use crate::error::{Error, Result};
use crate::qrng::{check_width, BitSource};
use rand::{Rng, RngCore, SeedableRng};
use std::sync::Mutex;

/// Pseudo-random number generator backend backed by `thread_rng`
#[derive(Debug, Default)]
pub struct PseudoBackend;

impl PseudoBackend {
    /// Create a new pseudo-random backend
    pub fn new() -> Self {
        Self
    }
}

impl BitSource for PseudoBackend {
    fn name(&self) -> &'static str {
        "pseudo"
    }

    fn description(&self) -> &'static str {
        "Pseudo-random number generator (for testing)"
    }

    fn bytes(&self, n: usize) -> Result<Vec<u8>> {
        let mut bytes = vec![0u8; n];
        rand::thread_rng().fill_bytes(&mut bytes);
        Ok(bytes)
    }

    // Skip the byte round trip
    fn draw_bits(&self, k: u32) -> Result<u64> {
        check_width(k)?;
        Ok(mask(rand::thread_rng().gen::<u64>(), k))
    }
}

/// Seeded pseudo-random backend for deterministic testing
pub struct SeededPseudoBackend {
    rng: Mutex<rand::rngs::StdRng>,
}

impl SeededPseudoBackend {
    /// Create a new seeded pseudo-random backend
    ///
    /// Using the same seed will produce the same sequence of random values.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(rand::rngs::StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut rand::rngs::StdRng) -> T) -> Result<T> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| Error::EntropySource("seeded RNG lock poisoned".to_string()))?;
        Ok(f(&mut rng))
    }
}

impl BitSource for SeededPseudoBackend {
    fn name(&self) -> &'static str {
        "pseudo-seeded"
    }

    fn description(&self) -> &'static str {
        "Seeded pseudo-random number generator (for reproducible testing)"
    }

    fn bytes(&self, n: usize) -> Result<Vec<u8>> {
        self.with_rng(|rng| {
            let mut bytes = vec![0u8; n];
            rng.fill_bytes(&mut bytes);
            bytes
        })
    }

    fn draw_bits(&self, k: u32) -> Result<u64> {
        check_width(k)?;
        self.with_rng(|rng| mask(rng.gen::<u64>(), k))
    }
}

/// Keep the low `k` bits of `value`
fn mask(value: u64, k: u32) -> u64 {
    match k {
        0 => 0,
        64 => value,
        k => value & ((1u64 << k) - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pseudo_backend_bytes() {
        let backend = PseudoBackend::new();
        let bytes = backend.bytes(100).unwrap();
        assert_eq!(bytes.len(), 100);
    }

    #[test]
    fn test_pseudo_backend_bits_in_range() {
        let backend = PseudoBackend::new();
        for k in 0..=12 {
            for _ in 0..100 {
                assert!(backend.draw_bits(k).unwrap() < (1u64 << k));
            }
        }
    }

    #[test]
    fn test_seeded_backend_reproducible() {
        let backend1 = SeededPseudoBackend::new(42);
        let backend2 = SeededPseudoBackend::new(42);

        assert_eq!(backend1.bytes(100).unwrap(), backend2.bytes(100).unwrap());

        let bits1: Vec<u64> = (0..50).map(|_| backend1.draw_bits(10).unwrap()).collect();
        let bits2: Vec<u64> = (0..50).map(|_| backend2.draw_bits(10).unwrap()).collect();
        assert_eq!(bits1, bits2);
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask(u64::MAX, 0), 0);
        assert_eq!(mask(u64::MAX, 3), 0b111);
        assert_eq!(mask(u64::MAX, 64), u64::MAX);
    }

    #[test]
    fn test_too_wide_draw_fails() {
        assert!(SeededPseudoBackend::new(1).draw_bits(65).is_err());
        assert!(PseudoBackend::new().draw_bits(65).is_err());
    }
}
