//! Buffered, thread-safe range picker

use log::{debug, trace};
use serde::Serialize;
use std::sync::Mutex;

use super::config::{PickerConfig, SAMPLE_WIDTH};
use super::Picker;
use crate::checkpoint::StateCheckpoint;
use crate::rng::{GeneratorState, RandomGenerator, RngError, RngResult};

/// Uniform integer sampler over a [`RandomGenerator`]
///
/// The buffer, the generator state and the read cursor live behind one
/// mutex, held for the whole of a `pick` call. A single-threaded caller
/// therefore sees exactly the generator's byte stream, four bytes per
/// sample, regardless of buffer size.
///
/// # Example
/// ```
/// use prng_core_rs::{RangePicker, Twister64Generator, Twister64State};
///
/// let picker = RangePicker::new(Twister64Generator, Twister64State::new(19650218)).unwrap();
/// let die = picker.pick(1, 6).unwrap();
/// assert!((1..=6).contains(&die));
/// ```
pub struct RangePicker<G: RandomGenerator> {
    generator: G,
    inner: Mutex<PickerBuffer<G::State>>,
}

struct PickerBuffer<S> {
    state: S,
    buffer: Box<[u8]>,
    /// Next unread window; 0 means the buffer is spent
    next_offset: usize,
}

impl<G: RandomGenerator> RangePicker<G> {
    /// Create a picker with the default 16 KiB buffer
    ///
    /// # Errors
    /// [`RngError::InvalidState`] if `initial_state` is not valid
    pub fn new(generator: G, initial_state: G::State) -> RngResult<Self> {
        Self::with_config(generator, initial_state, &PickerConfig::default())
    }

    pub fn with_config(
        generator: G,
        initial_state: G::State,
        config: &PickerConfig,
    ) -> RngResult<Self> {
        if !initial_state.is_valid() {
            return Err(RngError::InvalidState);
        }

        let buffer_len = config.buffer_len(G::CHUNK_SIZE)?;
        debug!(
            "Created range picker over {} with {} byte buffer",
            std::any::type_name::<G>(),
            buffer_len
        );

        Ok(Self {
            generator,
            inner: Mutex::new(PickerBuffer {
                state: initial_state,
                buffer: vec![0u8; buffer_len].into_boxed_slice(),
                next_offset: 0,
            }),
        })
    }

    /// Pick a uniform value in `[min_inclusive, min_inclusive + range_size)`
    ///
    /// Samples are the low 31 bits of each little-endian 4-byte window.
    /// The top `(2^31) mod range_size` values are rerolled so that the final
    /// `% range_size` is exact.
    ///
    /// # Errors
    /// - [`RngError::InvalidRangeSize`] if `range_size < 1`
    /// - [`RngError::RangeOverflow`] if the range runs past `i32::MAX`
    pub fn pick(&self, min_inclusive: i32, range_size: i32) -> RngResult<i32> {
        if range_size < 1 {
            return Err(RngError::InvalidRangeSize(range_size));
        }

        if i64::from(min_inclusive) + i64::from(range_size) > i64::from(i32::MAX) + 1 {
            return Err(RngError::RangeOverflow {
                min_inclusive,
                range_size,
            });
        }

        // (i32::MAX + 1) % range_size, computed without overflowing
        let reroll_threshold = ((i32::MAX % range_size) + 1) % range_size;

        let sample = {
            let mut guard = self.inner.lock()?;
            let inner = &mut *guard;
            loop {
                if inner.next_offset == 0 {
                    let state = inner.state.clone();
                    inner.state = self.generator.fill_all(state, &mut inner.buffer)?;
                    trace!("Refilled {} byte picker buffer", inner.buffer.len());
                }

                let offset = inner.next_offset;
                let mut window = [0u8; SAMPLE_WIDTH];
                window.copy_from_slice(&inner.buffer[offset..offset + SAMPLE_WIDTH]);
                inner.next_offset = (offset + SAMPLE_WIDTH) % inner.buffer.len();

                let sample = i32::from_le_bytes(window) & 0x7FFF_FFFF;
                if sample <= i32::MAX - reroll_threshold {
                    break sample;
                }
            }
        };

        Ok(min_inclusive + sample % range_size)
    }

    /// Length of the internal buffer in bytes
    pub fn buffer_len(&self) -> RngResult<usize> {
        Ok(self.inner.lock()?.buffer.len())
    }

    /// Copy of the current generator state
    ///
    /// This is the state the next refill will start from, not the state that
    /// produced the bytes currently buffered.
    pub fn state(&self) -> RngResult<G::State> {
        Ok(self.inner.lock()?.state.clone())
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}

impl<G> RangePicker<G>
where
    G: RandomGenerator,
    G::State: Serialize,
{
    /// Snapshot the generator state
    ///
    /// Unread buffered bytes are not captured; a picker restored from the
    /// checkpoint resumes at the next refill boundary.
    pub fn checkpoint(&self) -> RngResult<StateCheckpoint> {
        StateCheckpoint::capture(&self.state()?)
    }
}

impl<G: RandomGenerator> Picker for RangePicker<G> {
    fn pick(&self, min_inclusive: i32, range_size: i32) -> RngResult<i32> {
        RangePicker::pick(self, min_inclusive, range_size)
    }
}
