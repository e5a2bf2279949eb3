//! Generation records
//!
//! A single CLI generation with enough metadata to be reported as JSON.

use crate::sampler::{RangeSpec, Sample};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One generated number and how it was produced
#[derive(Debug, Clone, Serialize)]
pub struct Generation {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub backend: String,
    pub range: RangeSpec,
    pub bit_width: u32,
    pub value: i64,
    /// Draws taken, rejected ones included
    pub attempts: u64,
}

impl Generation {
    pub fn new(range: RangeSpec, sample: Sample, backend: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            backend: backend.to_string(),
            range,
            bit_width: range.bit_width(),
            value: sample.value,
            attempts: sample.attempts,
        }
    }
}
