//! Statistical tests for randomness quality
//!
//! Byte-level tests, scored in `[0, 1]` with higher meaning "looks random":
//! - Balanced (monobit): proportion of 1 bits is close to one half
//! - Uniform (chi-square): byte values 0-255 appear equally often
//! - Scattered (runs): bit transitions are neither too rare nor too frequent
//!
//! `chi_square_uniformity` applies the same idea to the per-value counts of a
//! benchmark histogram.

use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;

/// Scores at or above this are considered a pass
pub const PASS_THRESHOLD: f64 = 0.01;

/// Results of the byte-level tests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntropyTestResults {
    /// Monobit score
    pub balanced: f64,

    /// Byte chi-square score
    pub uniform: f64,

    /// Runs score
    pub scattered: f64,

    /// Mean of the three scores
    pub overall: f64,

    /// Number of bytes analyzed
    pub bytes_analyzed: usize,
}

impl EntropyTestResults {
    /// Check if all tests pass the threshold
    pub fn all_passed(&self) -> bool {
        self.balanced >= PASS_THRESHOLD
            && self.uniform >= PASS_THRESHOLD
            && self.scattered >= PASS_THRESHOLD
    }
}

/// Run all byte-level tests on `data`
pub fn run_all_tests(data: &[u8]) -> EntropyTestResults {
    let balanced = monobit_test(data);
    let uniform = chi_square_test(data);
    let scattered = runs_test(data);

    EntropyTestResults {
        balanced,
        uniform,
        scattered,
        overall: (balanced + uniform + scattered) / 3.0,
        bytes_analyzed: data.len(),
    }
}

/// Monobit (frequency) test
pub fn monobit_test(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let total_bits = (data.len() * 8) as f64;
    let ones: u64 = data.iter().map(|b| b.count_ones() as u64).sum();

    // Binomial(n, 1/2): mean n/2, std dev sqrt(n)/2
    let z = (ones as f64 - total_bits / 2.0).abs() / (total_bits / 4.0).sqrt();

    two_sided(z)
}

/// Chi-square test over byte values
///
/// Needs at least 256 bytes to say anything.
pub fn chi_square_test(data: &[u8]) -> f64 {
    if data.len() < 256 {
        return 0.0;
    }

    let mut counts = [0u64; 256];
    for &byte in data {
        counts[byte as usize] += 1;
    }

    let chi_sq = chi_square_statistic(&counts);

    // Normal approximation for df = 255
    let z = (chi_sq - 255.0) / (2.0 * 255.0_f64).sqrt();

    two_sided(z)
}

/// Runs test over the bit sequence
pub fn runs_test(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut bits = data
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |j| (byte >> j) & 1));

    let mut prev = match bits.next() {
        Some(bit) => bit,
        None => return 0.0,
    };
    let mut ones = prev as u64;
    let mut runs = 1u64;

    for bit in bits {
        ones += bit as u64;
        if bit != prev {
            runs += 1;
            prev = bit;
        }
    }

    let n = (data.len() * 8) as f64;
    let ones = ones as f64;
    let zeros = n - ones;

    // Too lopsided for the runs statistic to mean anything
    let pi = ones / n;
    if !(0.01..=0.99).contains(&pi) {
        return 0.0;
    }

    let product = 2.0 * ones * zeros;
    let expected_runs = product / n + 1.0;
    let std_runs = ((product * (product - n)) / (n * n * (n - 1.0))).sqrt();

    if std_runs == 0.0 || std_runs.is_nan() {
        return 0.0;
    }

    two_sided((runs as f64 - expected_runs) / std_runs)
}

/// Goodness-of-fit of `counts` against a uniform distribution
///
/// Returns the upper-tail p-value of the chi-square statistic with
/// `counts.len() - 1` degrees of freedom, using the Wilson-Hilferty normal
/// approximation. Near 0 means the counts are implausibly uneven.
pub fn chi_square_uniformity(counts: &[u64]) -> f64 {
    let total: u64 = counts.iter().sum();
    if counts.len() < 2 || total == 0 {
        return 0.0;
    }

    chi_square_p_value(chi_square_statistic(counts), (counts.len() - 1) as f64)
}

/// Upper-tail probability of a chi-square statistic (Wilson-Hilferty)
fn chi_square_p_value(chi_sq: f64, df: f64) -> f64 {
    let spread = 2.0 / (9.0 * df);
    let z = ((chi_sq / df).cbrt() - (1.0 - spread)) / spread.sqrt();

    (0.5 * (1.0 - erf(z / SQRT_2))).clamp(0.0, 1.0)
}

/// Pearson statistic against an even split of the total
fn chi_square_statistic(counts: &[u64]) -> f64 {
    let total: u64 = counts.iter().sum();
    let expected = total as f64 / counts.len() as f64;

    counts
        .iter()
        .map(|&count| {
            let diff = count as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

/// Two-sided normal tail probability for a z-score
fn two_sided(z: f64) -> f64 {
    (1.0 - erf(z.abs() / SQRT_2)).clamp(0.0, 1.0)
}

/// Error function approximation (Abramowitz and Stegun 7.1.26)
fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

    sign * y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qrng::pseudo::SeededPseudoBackend;
    use crate::qrng::simulator::SimulatorBackend;
    use crate::qrng::BitSource;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_erf_known_values() {
        assert_abs_diff_eq!(erf(0.0), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(erf(1.0), 0.842_700_8, epsilon = 1e-6);
        assert_abs_diff_eq!(erf(-1.0), -0.842_700_8, epsilon = 1e-6);
        assert_abs_diff_eq!(erf(3.0), 0.999_977_9, epsilon = 1e-6);
    }

    #[test]
    fn test_monobit_good_data() {
        let data = SeededPseudoBackend::new(42).bytes(10_000).unwrap();
        let score = monobit_test(&data);
        assert!(score > PASS_THRESHOLD, "monobit score {}", score);
    }

    #[test]
    fn test_monobit_bad_data() {
        assert!(monobit_test(&[0u8; 1000]) < PASS_THRESHOLD);
        assert!(monobit_test(&[0xFFu8; 1000]) < PASS_THRESHOLD);
        assert_eq!(monobit_test(&[]), 0.0);
    }

    #[test]
    fn test_chi_square_good_data() {
        let data = SeededPseudoBackend::new(42).bytes(10_000).unwrap();
        let score = chi_square_test(&data);
        assert!(score > PASS_THRESHOLD, "chi-square score {}", score);
    }

    #[test]
    fn test_chi_square_bad_data() {
        let data: Vec<u8> = (0..1000).map(|i| (i % 4) as u8).collect();
        assert!(chi_square_test(&data) < PASS_THRESHOLD);
        assert_eq!(chi_square_test(&[1, 2, 3]), 0.0);
    }

    #[test]
    fn test_runs_good_data() {
        let data = SeededPseudoBackend::new(42).bytes(10_000).unwrap();
        let score = runs_test(&data);
        assert!(score > PASS_THRESHOLD, "runs score {}", score);
    }

    #[test]
    fn test_runs_alternating_bits() {
        // 1010... has the maximum number of runs
        assert!(runs_test(&[0xAA; 1000]) < PASS_THRESHOLD);
    }

    #[test]
    fn test_run_all_tests_on_simulator() {
        let data = SimulatorBackend::with_seed(42).bytes(4_096).unwrap();
        let results = run_all_tests(&data);

        assert_eq!(results.bytes_analyzed, 4_096);
        assert!(results.overall > 0.0 && results.overall <= 1.0);
    }

    #[test]
    fn test_uniformity_perfect_counts() {
        let score = chi_square_uniformity(&[100, 100, 100, 100]);
        assert!(score > 0.99, "score {}", score);
    }

    #[test]
    fn test_uniformity_skewed_counts() {
        assert!(chi_square_uniformity(&[400, 0, 0, 0]) < 0.001);
        assert!(chi_square_uniformity(&[3000, 2000, 2500, 2500]) < 0.001);
    }

    #[test]
    fn test_uniformity_degenerate_input() {
        assert_eq!(chi_square_uniformity(&[]), 0.0);
        assert_eq!(chi_square_uniformity(&[10]), 0.0);
        assert_eq!(chi_square_uniformity(&[0, 0, 0]), 0.0);
    }

    #[test]
    fn test_p_value_matches_table() {
        // 5% critical values of the chi-square distribution
        assert_abs_diff_eq!(chi_square_p_value(16.92, 9.0), 0.05, epsilon = 0.005);
        assert_abs_diff_eq!(chi_square_p_value(7.815, 3.0), 0.05, epsilon = 0.005);
    }
}
