//! 64-bit Mersenne Twister (MT19937-64)
//!
//! Bit-exact with Matsumoto and Nishimura's `mt19937-64.c` when seeded with
//! `init_genrand64`, and therefore with C++'s `std::mt19937_64`.
//!
//! # Algorithm
//!
//! The state is 312 words plus a cursor. Whenever all 312 words have been
//! consumed the whole array is "twisted" in place, then each word is
//! tempered before it is emitted.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{validate_fill_args, GeneratorState, RandomGenerator, RngError, RngResult};

/// Number of 64-bit words in the state array
pub const TWISTER64_WORDS: usize = 312;

const MID: usize = 156;
const MATRIX_A: u64 = 0xB502_6F5A_A966_19E9;
const UPPER_33: u64 = 0xFFFF_FFFF_8000_0000;
const LOWER_31: u64 = 0x0000_0000_7FFF_FFFF;
const SEED_MULTIPLIER: u64 = 6_364_136_223_846_793_005;

/// State of a [`Twister64Generator`]
///
/// `Default` yields the absent-array state, which is never valid.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Twister64StateRepr", into = "Twister64StateRepr")]
pub struct Twister64State {
    words: Option<Box<[u64; TWISTER64_WORDS]>>,
    cursor: usize,
}

impl Twister64State {
    /// Expand a single 64-bit seed into a full state
    ///
    /// The cursor starts at the end of the array, so the first `fill` twists
    /// before emitting anything.
    ///
    /// # Example
    /// ```
    /// use prng_core_rs::{GeneratorState, Twister64State};
    ///
    /// let state = Twister64State::new(5489);
    /// assert!(state.is_valid());
    /// assert_eq!(state.cursor(), 312);
    /// ```
    pub fn new(seed: u64) -> Self {
        let mut words = Box::new([0u64; TWISTER64_WORDS]);
        words[0] = seed;
        for i in 1..TWISTER64_WORDS {
            let prev = words[i - 1];
            words[i] = SEED_MULTIPLIER
                .wrapping_mul(prev ^ (prev >> 62))
                .wrapping_add(i as u64);
        }

        Self {
            words: Some(words),
            cursor: TWISTER64_WORDS,
        }
    }

    /// Build a state from raw parts without validating it
    pub fn from_words(words: Box<[u64; TWISTER64_WORDS]>, cursor: usize) -> Self {
        Self {
            words: Some(words),
            cursor,
        }
    }

    /// The word array, if present
    pub fn words(&self) -> Option<&[u64; TWISTER64_WORDS]> {
        self.words.as_deref()
    }

    /// How many words of the current array have been consumed
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl GeneratorState for Twister64State {
    fn is_valid(&self) -> bool {
        let Some(words) = self.words.as_deref() else {
            return false;
        };

        if self.cursor > TWISTER64_WORDS {
            return false;
        }

        // All-zero is the forbidden fixed point of the recurrence
        words.iter().fold(0, |acc, w| acc | w) != 0
    }
}

impl fmt::Debug for Twister64State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Twister64State");
        out.field("cursor", &self.cursor);
        match self.words.as_deref() {
            Some(words) => {
                let digest = words.iter().fold(0u64, |acc, w| acc ^ w);
                out.field("words_xor", &format_args!("{:#018x}", digest))
            }
            None => out.field("words", &None::<()>),
        };
        out.finish()
    }
}

/// Serialized form: an empty list stands for the absent array
#[derive(Serialize, Deserialize)]
struct Twister64StateRepr {
    words: Vec<u64>,
    cursor: usize,
}

impl From<Twister64State> for Twister64StateRepr {
    fn from(state: Twister64State) -> Self {
        Self {
            words: state.words.map(|w| w.to_vec()).unwrap_or_default(),
            cursor: state.cursor,
        }
    }
}

impl TryFrom<Twister64StateRepr> for Twister64State {
    type Error = String;

    fn try_from(repr: Twister64StateRepr) -> Result<Self, Self::Error> {
        if repr.words.is_empty() {
            return Ok(Self {
                words: None,
                cursor: repr.cursor,
            });
        }

        let len = repr.words.len();
        let words: Box<[u64; TWISTER64_WORDS]> = repr
            .words
            .into_boxed_slice()
            .try_into()
            .map_err(|_| format!("expected {} words, got {}", TWISTER64_WORDS, len))?;

        Ok(Self {
            words: Some(words),
            cursor: repr.cursor,
        })
    }
}

/// MT19937-64 generator
///
/// # Example
/// ```
/// use prng_core_rs::{RandomGenerator, Twister64Generator, Twister64State};
///
/// let mut buf = [0u8; 16];
/// let state = Twister64Generator
///     .fill_all(Twister64State::new(5489), &mut buf)
///     .unwrap();
/// assert_eq!(state.cursor(), 2);
/// assert_eq!(
///     u64::from_le_bytes(buf[..8].try_into().unwrap()),
///     14514284786278117030
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Twister64Generator;

impl RandomGenerator for Twister64Generator {
    type State = Twister64State;

    const CHUNK_SIZE: usize = 8;

    fn fill(
        &self,
        mut state: Twister64State,
        buffer: &mut [u8],
        offset: usize,
        count: usize,
    ) -> RngResult<Twister64State> {
        validate_fill_args(buffer.len(), offset, count, Self::CHUNK_SIZE)?;
        if !state.is_valid() {
            return Err(RngError::InvalidState);
        }

        let Some(words) = state.words.as_deref_mut() else {
            return Err(RngError::InvalidState);
        };

        for chunk in buffer[offset..offset + count].chunks_exact_mut(Self::CHUNK_SIZE) {
            if state.cursor == TWISTER64_WORDS {
                twist(words);
                state.cursor = 0;
            }

            let x = temper(words[state.cursor]);
            state.cursor += 1;
            chunk.copy_from_slice(&x.to_le_bytes());
        }

        Ok(state)
    }
}

/// Regenerate all words in place
///
/// Entries past the midpoint read words already rewritten earlier in the
/// same pass, as the reference recurrence requires.
fn twist(words: &mut [u64; TWISTER64_WORDS]) {
    for curr in 0..TWISTER64_WORDS {
        let near = (curr + 1) % TWISTER64_WORDS;
        let far = (curr + MID) % TWISTER64_WORDS;

        let x = words[curr] & UPPER_33;
        let y = words[near] & LOWER_31;
        let z = words[far] ^ ((x | y) >> 1);

        words[curr] = z ^ ((y & 1) * MATRIX_A);
    }
}

fn temper(mut x: u64) -> u64 {
    x ^= (x >> 29) & 0x5555_5555_5555_5555;
    x ^= (x << 17) & 0x71D6_7FFF_EDA6_0000;
    x ^= (x << 37) & 0xFFF7_EEE0_0000_0000;
    x ^= x >> 43;
    x
}
