//! PRNG Core - Deterministic Random Number Generation
//!
//! Bit-exact pseudorandom generators and an unbiased, thread-safe integer
//! range sampler built on them.
//!
//! # Architecture
//!
//! - **rng**: Generator state, the generator trait, MT19937-64 and xoroshiro128+
//! - **picker**: Buffered range sampling with rejection of the biased tail
//! - **checkpoint**: Hash-verified persistence of generator state
//!
//! # Critical Invariants
//!
//! 1. Same seed → same byte stream, on every platform (little-endian output)
//! 2. `fill` never mutates caller-visible state; it returns the new state
//! 3. Every value in a picked range is exactly equally likely
//!
//! Not suitable for cryptographic use.

// Module declarations
pub mod checkpoint;
pub mod picker;
pub mod rng;

// Re-exports for convenience
pub use checkpoint::{compute_state_hash, StateCheckpoint};
pub use picker::{Picker, PickerConfig, RangePicker};
pub use rng::{
    validate_fill_args, ErrorKind, GeneratorState, RandomGenerator, RngError, RngResult,
    Twister64Generator, Twister64State, Xoroshiro128PlusGenerator, Xoroshiro128State,
};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn prng_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::picker::PyTwister64Picker>()?;
    m.add_class::<ffi::picker::PyXoroshiro128Picker>()?;
    Ok(())
}
