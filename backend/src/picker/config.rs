//! Picker configuration

use serde::{Deserialize, Serialize};

use crate::rng::{RngError, RngResult};

/// Buffer size used when no config is given
pub const DEFAULT_BUFFER_SIZE: usize = 16384;

/// Bytes consumed per sample
pub const SAMPLE_WIDTH: usize = 4;

/// Configuration for a [`RangePicker`](super::RangePicker)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Desired buffer size in bytes, rounded up to a whole number of chunks
    pub target_buffer_size: usize,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            target_buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl PickerConfig {
    pub fn validate(&self) -> RngResult<()> {
        if self.target_buffer_size == 0 {
            return Err(RngError::InvalidConfig(
                "target_buffer_size must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Effective buffer length for a generator with the given chunk size
    ///
    /// Rounded up to a multiple of both `chunk_size` and [`SAMPLE_WIDTH`], so
    /// every 4-byte window lies fully inside the buffer.
    pub fn buffer_len(&self, chunk_size: usize) -> RngResult<usize> {
        self.validate()?;
        if chunk_size == 0 {
            return Err(RngError::InvalidConfig(
                "generator chunk size must be positive".to_string(),
            ));
        }

        let unit = lcm(chunk_size, SAMPLE_WIDTH);
        let extra = self.target_buffer_size % unit;
        let padding = if extra == 0 { 0 } else { unit - extra };
        self.target_buffer_size
            .checked_add(padding)
            .ok_or_else(|| RngError::InvalidConfig("target_buffer_size too large".to_string()))
    }
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm(a: usize, b: usize) -> usize {
    a / gcd(a, b) * b
}
