//! Generator benchmark
//!
//! Samples a range many times, bins every result, and scores how close the
//! histogram is to flat.

pub mod plot;

use crate::constants::limits::MAX_HISTOGRAM_BINS;
use crate::entropy::chi_square_uniformity;
use crate::error::{Error, Result};
use crate::sampler::{RangeSpec, Sampler};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

/// Per-value sample counts over a range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Histogram {
    min: i64,
    counts: Vec<u64>,
}

impl Histogram {
    /// Empty histogram with one bin per value of `range`
    pub fn new(range: &RangeSpec) -> Result<Self> {
        let size = range.size();
        if size > MAX_HISTOGRAM_BINS {
            return Err(Error::Plotting(format!(
                "range {} has {} values, histograms support at most {}",
                range, size, MAX_HISTOGRAM_BINS
            )));
        }

        Ok(Self {
            min: range.min(),
            counts: vec![0; size as usize],
        })
    }

    /// Count one value; values outside the range are ignored and return false
    pub fn record(&mut self, value: i64) -> bool {
        let index = i128::from(value) - i128::from(self.min);
        match usize::try_from(index).ok().and_then(|i| self.counts.get_mut(i)) {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Total number of recorded values
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(value, count)` pairs in ascending value order
    pub fn iter(&self) -> impl Iterator<Item = (i64, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(move |(i, &count)| (self.min + i as i64, count))
    }
}

/// Outcome of a benchmark run
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub backend: String,
    pub range: RangeSpec,
    pub bit_width: u32,
    pub iterations: usize,
    pub histogram: Histogram,
    /// Draws requested from the bit source, rejected ones included
    pub total_draws: u64,
    /// Chi-square goodness-of-fit score against a flat histogram
    pub uniformity: f64,
}

impl BenchmarkReport {
    /// Average draws per accepted sample
    pub fn mean_draws(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.total_draws as f64 / self.iterations as f64
    }

    /// Fraction of draws that were accepted
    pub fn acceptance_rate(&self) -> f64 {
        if self.total_draws == 0 {
            return 0.0;
        }
        self.iterations as f64 / self.total_draws as f64
    }
}

/// Draw `iterations` samples from `range` and summarize them
pub fn run(range: &RangeSpec, iterations: usize, sampler: &Sampler) -> Result<BenchmarkReport> {
    if iterations == 0 {
        return Err(Error::Config(
            "benchmark needs at least one iteration".to_string(),
        ));
    }

    let mut histogram = Histogram::new(range)?;
    let mut total_draws = 0u64;

    for i in 0..iterations {
        let sample = sampler.sample(range)?;
        histogram.record(sample.value);
        total_draws += sample.attempts;

        if (i + 1) % 1000 == 0 {
            debug!(done = i + 1, iterations, "benchmark progress");
        }
    }

    let uniformity = chi_square_uniformity(histogram.counts());

    Ok(BenchmarkReport {
        id: Uuid::new_v4(),
        timestamp: Utc::now(),
        backend: sampler.source().name().to_string(),
        range: *range,
        bit_width: range.bit_width(),
        iterations,
        histogram,
        total_draws,
        uniformity,
    })
}
