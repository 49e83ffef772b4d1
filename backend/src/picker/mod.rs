//! Unbiased integer-range sampling
//!
//! [`RangePicker`] owns a generator, its evolving state and a refillable
//! byte buffer. Samples are 31-bit values read from consecutive 4-byte
//! windows; values in the biased tail are rejected before reduction.

mod config;
mod range_picker;

pub use config::{PickerConfig, DEFAULT_BUFFER_SIZE, SAMPLE_WIDTH};
pub use range_picker::RangePicker;

use crate::rng::RngResult;

/// Anything that can pick a uniform integer from a range
pub trait Picker: Send + Sync {
    /// Pick a value in `[min_inclusive, min_inclusive + range_size)`
    fn pick(&self, min_inclusive: i32, range_size: i32) -> RngResult<i32>;
}
