//! xoroshiro128+ generator
//!
//! Port of Blackman and Vigna's 2016 `xoroshiro128plus.c` (rotation
//! constants 55, 14, 36). Each step emits `s0 + s1` from the pre-update
//! state and then advances.

use serde::{Deserialize, Serialize};

use super::{validate_fill_args, GeneratorState, RandomGenerator, RngError, RngResult};

/// Two-word state of a [`Xoroshiro128PlusGenerator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Xoroshiro128State {
    pub s0: u64,
    pub s1: u64,
}

impl Xoroshiro128State {
    pub fn new(s0: u64, s1: u64) -> Self {
        Self { s0, s1 }
    }

    /// Expand one 64-bit seed through SplitMix64
    ///
    /// SplitMix64 never yields two consecutive zeros, so the result is
    /// always valid, including for seed 0.
    ///
    /// # Example
    /// ```
    /// use prng_core_rs::{GeneratorState, Xoroshiro128State};
    ///
    /// let state = Xoroshiro128State::from_seed(0);
    /// assert!(state.is_valid());
    /// assert_eq!(state.s0, 0xE220_A839_7B1D_CDAF);
    /// ```
    pub fn from_seed(seed: u64) -> Self {
        let mut x = seed;
        let s0 = splitmix64(&mut x);
        let s1 = splitmix64(&mut x);
        Self { s0, s1 }
    }
}

impl GeneratorState for Xoroshiro128State {
    fn is_valid(&self) -> bool {
        (self.s0 | self.s1) != 0
    }
}

fn splitmix64(x: &mut u64) -> u64 {
    *x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// xoroshiro128+ generator
#[derive(Debug, Clone, Copy, Default)]
pub struct Xoroshiro128PlusGenerator;

impl RandomGenerator for Xoroshiro128PlusGenerator {
    type State = Xoroshiro128State;

    const CHUNK_SIZE: usize = 8;

    fn fill(
        &self,
        mut state: Xoroshiro128State,
        buffer: &mut [u8],
        offset: usize,
        count: usize,
    ) -> RngResult<Xoroshiro128State> {
        validate_fill_args(buffer.len(), offset, count, Self::CHUNK_SIZE)?;
        if !state.is_valid() {
            return Err(RngError::InvalidState);
        }

        for chunk in buffer[offset..offset + count].chunks_exact_mut(Self::CHUNK_SIZE) {
            chunk.copy_from_slice(&state.s0.wrapping_add(state.s1).to_le_bytes());

            let t = state.s0 ^ state.s1;
            state.s0 = state.s0.rotate_left(55) ^ t ^ (t << 14);
            state.s1 = t.rotate_left(36);
        }

        Ok(state)
    }
}
