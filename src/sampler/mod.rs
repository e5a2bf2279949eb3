//! Uniform range sampling
//!
//! Maps fixed-width random bit strings onto an arbitrary inclusive integer
//! range without bias.
//!
//! ## Algorithm
//! For a range of `size = max - min + 1` values, draw `k` bits where `k` is
//! the smallest width with `2^k >= size`. A draw `v` in `[0, size)` is
//! accepted and mapped to `min + v`. Any draw `v >= size` is thrown away and
//! a fresh `k`-bit value is requested; rejected values are never shifted,
//! folded or reused, since that would favour the low end of the range.
//!
//! Because `2^(k-1) < size <= 2^k`, each draw is accepted with probability
//! above one half, so fewer than two draws are needed on average. The retry
//! loop has no cap unless one is set with [`Sampler::with_max_attempts`].

mod range;

pub use range::{bit_width, RangeSpec};

use crate::error::{Error, Result};
use crate::qrng::BitSource;
use serde::Serialize;
use tracing::debug;

/// An accepted draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sample {
    /// The sampled value, within the requested range
    pub value: i64,
    /// Number of draws taken, including the accepted one
    pub attempts: u64,
    /// The accepted raw `k`-bit value (`value - min`)
    pub raw: u64,
}

/// Rejection sampler over a borrowed bit source
pub struct Sampler<'a> {
    source: &'a dyn BitSource,
    max_attempts: Option<u64>,
}

impl<'a> Sampler<'a> {
    /// Create a sampler that retries until a draw is accepted
    pub fn new(source: &'a dyn BitSource) -> Self {
        Self {
            source,
            max_attempts: None,
        }
    }

    /// Give up with `Error::RetryLimitExceeded` after `max_attempts` draws
    ///
    /// `0` keeps the retry loop unbounded.
    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = (max_attempts > 0).then_some(max_attempts);
        self
    }

    /// The bit source draws come from
    pub fn source(&self) -> &dyn BitSource {
        self.source
    }

    /// Draw one value uniformly from `range`
    ///
    /// Bit source failures are returned as-is and never retried.
    pub fn sample(&self, range: &RangeSpec) -> Result<Sample> {
        let size = range.size();
        let k = range.bit_width();
        let mut attempts = 0u64;

        loop {
            if let Some(max) = self.max_attempts {
                if attempts >= max {
                    return Err(Error::RetryLimitExceeded { attempts });
                }
            }
            attempts += 1;

            let raw = self.source.draw_bits(k)?;
            if u128::from(raw) < size {
                return Ok(Sample {
                    value: range.offset(raw),
                    attempts,
                    raw,
                });
            }

            debug!(attempt = attempts, raw, %size, "rejected out-of-range draw");
        }
    }

    /// Draw `count` independent values from `range`
    pub fn sample_many(&self, range: &RangeSpec, count: usize) -> Result<Vec<Sample>> {
        (0..count).map(|_| self.sample(range)).collect()
    }
}

/// Validate `[min, max]` and draw one value from it
///
/// An invalid range is rejected before the bit source is touched.
pub fn generate(min: i64, max: i64, source: &dyn BitSource) -> Result<i64> {
    let range = RangeSpec::new(min, max)?;
    Ok(Sampler::new(source).sample(&range)?.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::chi_square_uniformity;
    use crate::qrng::pseudo::SeededPseudoBackend;
    use crate::qrng::simulator::SimulatorBackend;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Bit source that replays a fixed list of values
    struct ScriptedSource {
        values: Mutex<VecDeque<u64>>,
        widths: Mutex<Vec<u32>>,
    }

    impl ScriptedSource {
        fn new(values: &[u64]) -> Self {
            Self {
                values: Mutex::new(values.iter().copied().collect()),
                widths: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.widths.lock().unwrap().len()
        }

        fn widths(&self) -> Vec<u32> {
            self.widths.lock().unwrap().clone()
        }
    }

    impl BitSource for ScriptedSource {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn description(&self) -> &'static str {
            "replays scripted draws"
        }

        fn bytes(&self, _n: usize) -> Result<Vec<u8>> {
            Err(Error::EntropySource("scripted source has no bytes".to_string()))
        }

        fn draw_bits(&self, k: u32) -> Result<u64> {
            self.widths.lock().unwrap().push(k);
            self.values
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| Error::EntropySource("script exhausted".to_string()))
        }
    }

    /// Bit source that always fails
    struct BrokenSource;

    impl BitSource for BrokenSource {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn description(&self) -> &'static str {
            "always fails"
        }

        fn bytes(&self, _n: usize) -> Result<Vec<u8>> {
            Err(Error::EntropySource("device unplugged".to_string()))
        }
    }

    #[test]
    fn test_rejected_draw_is_discarded() {
        // 11 = 0b1011 is outside [0, 10), 3 = 0b0011 is accepted
        let source = ScriptedSource::new(&[11, 3]);
        let range = RangeSpec::new(1, 10).unwrap();

        let sample = Sampler::new(&source).sample(&range).unwrap();

        assert_eq!(sample.value, 4);
        assert_eq!(sample.raw, 3);
        assert_eq!(sample.attempts, 2);
        assert_eq!(source.widths(), vec![4, 4]);
    }

    #[test]
    fn test_first_draw_accepted() {
        let source = ScriptedSource::new(&[9, 0]);
        assert_eq!(generate(1, 10, &source).unwrap(), 10);
        assert_eq!(source.calls(), 1);
    }

    #[test]
    fn test_range_size_boundary_is_rejected() {
        // 5 == range size and must not map to 15
        let source = ScriptedSource::new(&[5, 7, 4]);
        let range = RangeSpec::new(10, 14).unwrap();
        let sample = Sampler::new(&source).sample(&range).unwrap();
        assert_eq!(sample.value, 14);
        assert_eq!(sample.attempts, 3);
    }

    #[test]
    fn test_invalid_range_makes_no_draws() {
        let source = ScriptedSource::new(&[0, 1, 2]);

        assert!(matches!(
            generate(0, 0, &source),
            Err(Error::InvalidRange { min: 0, max: 0 })
        ));
        assert!(matches!(
            generate(5, -5, &source),
            Err(Error::InvalidRange { .. })
        ));
        assert_eq!(source.calls(), 0);
    }

    #[test]
    fn test_source_failure_propagates() {
        let err = generate(0, 100, &BrokenSource).unwrap_err();
        match err {
            Error::EntropySource(msg) => assert_eq!(msg, "device unplugged"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_source_failure_after_rejection() {
        let source = ScriptedSource::new(&[15]);
        let range = RangeSpec::new(1, 10).unwrap();
        assert!(matches!(
            Sampler::new(&source).sample(&range),
            Err(Error::EntropySource(_))
        ));
        assert_eq!(source.calls(), 2);
    }

    #[test]
    fn test_retry_cap() {
        let source = ScriptedSource::new(&[15; 10]);
        let range = RangeSpec::new(1, 10).unwrap();

        let result = Sampler::new(&source).with_max_attempts(5).sample(&range);

        assert!(matches!(
            result,
            Err(Error::RetryLimitExceeded { attempts: 5 })
        ));
        assert_eq!(source.calls(), 5);
    }

    #[test]
    fn test_zero_cap_is_unbounded() {
        let mut script = vec![15; 50];
        script.push(0);
        let source = ScriptedSource::new(&script);
        let range = RangeSpec::new(1, 10).unwrap();

        let sample = Sampler::new(&source)
            .with_max_attempts(0)
            .sample(&range)
            .unwrap();
        assert_eq!(sample.value, 1);
        assert_eq!(sample.attempts, 51);
    }

    #[test]
    fn test_values_within_bounds() {
        let backend = SeededPseudoBackend::new(42);
        let sampler = Sampler::new(&backend);

        for (min, max) in [(0, 1), (1, 10), (-5, -1), (-100, 100), (0, 1023), (7, 1025)] {
            let range = RangeSpec::new(min, max).unwrap();
            for sample in sampler.sample_many(&range, 2_000).unwrap() {
                assert!(
                    (min..=max).contains(&sample.value),
                    "{} outside [{}, {}]",
                    sample.value,
                    min,
                    max
                );
                assert!(sample.attempts >= 1);
            }
        }
    }

    #[test]
    fn test_full_i64_range() {
        let backend = SeededPseudoBackend::new(1);
        let range = RangeSpec::new(i64::MIN, i64::MAX).unwrap();
        assert_eq!(range.bit_width(), 64);

        let sampler = Sampler::new(&backend);
        for _ in 0..100 {
            // Every 64-bit draw is accepted
            assert_eq!(sampler.sample(&range).unwrap().attempts, 1);
        }
    }

    #[test]
    fn test_uniformity_small_range() {
        let backend = SimulatorBackend::with_seed(2024);
        let range = RangeSpec::new(0, 3).unwrap();
        let sampler = Sampler::new(&backend);

        let mut counts = [0u64; 4];
        for _ in 0..100_000 {
            counts[sampler.sample(&range).unwrap().value as usize] += 1;
        }

        for &count in &counts {
            assert!((24_000..=26_000).contains(&count), "counts: {:?}", counts);
        }
        let score = chi_square_uniformity(&counts);
        assert!(score > 0.001, "chi-square score {} for {:?}", score, counts);
    }

    #[test]
    fn test_uniformity_with_rejection() {
        let backend = SeededPseudoBackend::new(77);
        let range = RangeSpec::new(1, 10).unwrap();
        let sampler = Sampler::new(&backend);

        let mut counts = [0u64; 10];
        let mut draws = 0u64;
        for _ in 0..100_000 {
            let sample = sampler.sample(&range).unwrap();
            counts[(sample.value - 1) as usize] += 1;
            draws += sample.attempts;
        }

        let score = chi_square_uniformity(&counts);
        assert!(score > 0.001, "chi-square score {} for {:?}", score, counts);

        // Acceptance rate is 10/16, so about 1.6 draws per sample
        let mean = draws as f64 / 100_000.0;
        assert!((1.55..1.65).contains(&mean), "mean draws {}", mean);
    }
}
