//! Deterministic random number generation
//!
//! A generator is a stateless function object that turns a state value into
//! bytes: `fill(state, buffer, offset, count) -> new_state`. The state is
//! passed by value and the evolved state is returned, so the same seed always
//! reproduces the same byte stream.
//!
//! Two bit-exact algorithms are provided:
//! - [`Twister64Generator`]: the 64-bit Mersenne Twister (MT19937-64)
//! - [`Xoroshiro128PlusGenerator`]: xoroshiro128+ (2016 constants 55/14/36)
//!
//! All output words are written little-endian.

mod error;
mod twister64;
mod xoroshiro128;

use std::fmt::Debug;
use std::hash::Hash;

pub use error::{ErrorKind, RngError, RngResult};
pub use twister64::{Twister64Generator, Twister64State, TWISTER64_WORDS};
pub use xoroshiro128::{Xoroshiro128PlusGenerator, Xoroshiro128State};

/// Per-algorithm state that a generator consumes and evolves
pub trait GeneratorState: Clone + Eq + Hash + Debug + Send {
    /// Whether the state can be fed to its generator
    fn is_valid(&self) -> bool;
}

/// An algorithm that fills byte buffers from a [`GeneratorState`]
///
/// Implementations must be pure: the returned state is the only effect
/// besides the bytes written into `buffer[offset..offset + count]`.
pub trait RandomGenerator: Send + Sync {
    type State: GeneratorState;

    /// Number of bytes produced per generator step
    const CHUNK_SIZE: usize;

    /// Fill `count` bytes of `buffer` starting at `offset`
    ///
    /// # Errors
    /// - [`RngError::OffsetOutOfRange`] / [`RngError::InsufficientRoom`] if the
    ///   window does not fit in `buffer`
    /// - [`RngError::Misaligned`] if `offset` or `count` is not a multiple of
    ///   [`Self::CHUNK_SIZE`]
    /// - [`RngError::InvalidState`] if `state` fails its validity predicate
    fn fill(
        &self,
        state: Self::State,
        buffer: &mut [u8],
        offset: usize,
        count: usize,
    ) -> RngResult<Self::State>;

    /// Fill the whole buffer
    fn fill_all(&self, state: Self::State, buffer: &mut [u8]) -> RngResult<Self::State> {
        let len = buffer.len();
        self.fill(state, buffer, 0, len)
    }
}

/// Check the buffer window shared by every generator's `fill`
///
/// Checks run in a fixed order so that every algorithm reports the same
/// error for the same bad arguments.
pub fn validate_fill_args(
    buffer_len: usize,
    offset: usize,
    count: usize,
    chunk_size: usize,
) -> RngResult<()> {
    if offset > buffer_len {
        return Err(RngError::OffsetOutOfRange { offset, buffer_len });
    }

    if buffer_len - offset < count {
        return Err(RngError::InsufficientRoom {
            offset,
            count,
            buffer_len,
        });
    }

    if offset % chunk_size != 0 {
        return Err(RngError::Misaligned {
            parameter: "offset",
            value: offset,
            chunk_size,
        });
    }

    if count % chunk_size != 0 {
        return Err(RngError::Misaligned {
            parameter: "count",
            value: count,
            chunk_size,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_past_end_rejected() {
        let err = validate_fill_args(16, 24, 0, 8).unwrap_err();
        assert_eq!(
            err,
            RngError::OffsetOutOfRange {
                offset: 24,
                buffer_len: 16
            }
        );
    }

    #[test]
    fn test_offset_at_end_with_zero_count_allowed() {
        assert!(validate_fill_args(16, 16, 0, 8).is_ok());
    }

    #[test]
    fn test_room_checked_before_alignment() {
        // Both too long and misaligned: room wins
        let err = validate_fill_args(16, 8, 13, 8).unwrap_err();
        assert!(matches!(err, RngError::InsufficientRoom { .. }));
    }

    #[test]
    fn test_offset_checked_before_count() {
        let err = validate_fill_args(32, 4, 4, 8).unwrap_err();
        assert!(matches!(
            err,
            RngError::Misaligned {
                parameter: "offset",
                ..
            }
        ));
    }

    #[test]
    fn test_count_alignment() {
        let err = validate_fill_args(32, 8, 12, 8).unwrap_err();
        assert!(matches!(
            err,
            RngError::Misaligned {
                parameter: "count",
                value: 12,
                ..
            }
        ));
    }
}
