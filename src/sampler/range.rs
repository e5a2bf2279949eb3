//! Validated inclusive integer ranges

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Smallest `k` such that `2^k >= range_size`
///
/// `range_size` of 0 or 1 needs no bits.
pub fn bit_width(range_size: u128) -> u32 {
    if range_size <= 1 {
        0
    } else {
        u128::BITS - (range_size - 1).leading_zeros()
    }
}

/// An inclusive range `[min, max]` with `min < max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeSpec {
    min: i64,
    max: i64,
}

impl RangeSpec {
    /// Validate and build a range
    pub fn new(min: i64, max: i64) -> Result<Self> {
        if min >= max {
            return Err(Error::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Number of integers in the range (at most 2^64)
    pub fn size(&self) -> u128 {
        (i128::from(self.max) - i128::from(self.min) + 1) as u128
    }

    /// Bits needed per draw
    pub fn bit_width(&self) -> u32 {
        bit_width(self.size())
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Map an accepted offset back into the range
    ///
    /// Callers guarantee `offset < size()`, so the sum stays within `i64`.
    pub(crate) fn offset(&self, offset: u64) -> i64 {
        (i128::from(self.min) + i128::from(offset)) as i64
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
