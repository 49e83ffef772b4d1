//! PyO3 wrappers for range pickers
//!
//! # Example (from Python)
//!
//! ```python
//! from prng_core_rs import Twister64Picker
//!
//! picker = Twister64Picker(19650218)
//! roll = picker.pick(1, 6)
//! saved = picker.checkpoint()  # {"state_json": ..., "state_hash": ...}
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::checkpoint::StateCheckpoint;
use crate::picker::RangePicker;
use crate::rng::{
    ErrorKind, RngError, Twister64Generator, Twister64State, Xoroshiro128PlusGenerator,
    Xoroshiro128State,
};

fn to_py_err(err: RngError) -> PyErr {
    match err.kind() {
        ErrorKind::Internal => PyRuntimeError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

fn checkpoint_to_py<'py>(
    py: Python<'py>,
    checkpoint: StateCheckpoint,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("state_json", checkpoint.state_json)?;
    dict.set_item("state_hash", checkpoint.state_hash)?;
    Ok(dict)
}

/// Range picker over MT19937-64
#[pyclass(name = "Twister64Picker")]
pub struct PyTwister64Picker {
    inner: RangePicker<Twister64Generator>,
}

#[pymethods]
impl PyTwister64Picker {
    #[new]
    fn new(seed: u64) -> PyResult<Self> {
        let inner = RangePicker::new(Twister64Generator, Twister64State::new(seed))
            .map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Pick a value in `[min_inclusive, min_inclusive + range_size)`
    ///
    /// Raises ValueError if the range is empty or overflows a 32-bit int.
    fn pick(&self, min_inclusive: i32, range_size: i32) -> PyResult<i32> {
        self.inner
            .pick(min_inclusive, range_size)
            .map_err(to_py_err)
    }

    fn checkpoint<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let checkpoint = self.inner.checkpoint().map_err(to_py_err)?;
        checkpoint_to_py(py, checkpoint)
    }
}

/// Range picker over xoroshiro128+
#[pyclass(name = "Xoroshiro128Picker")]
pub struct PyXoroshiro128Picker {
    inner: RangePicker<Xoroshiro128PlusGenerator>,
}

#[pymethods]
impl PyXoroshiro128Picker {
    /// Raises ValueError if both words are zero
    #[new]
    fn new(s0: u64, s1: u64) -> PyResult<Self> {
        let inner = RangePicker::new(Xoroshiro128PlusGenerator, Xoroshiro128State::new(s0, s1))
            .map_err(to_py_err)?;
        Ok(Self { inner })
    }

    fn pick(&self, min_inclusive: i32, range_size: i32) -> PyResult<i32> {
        self.inner
            .pick(min_inclusive, range_size)
            .map_err(to_py_err)
    }

    fn checkpoint<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let checkpoint = self.inner.checkpoint().map_err(to_py_err)?;
        checkpoint_to_py(py, checkpoint)
    }
}
