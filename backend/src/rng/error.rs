//! Errors raised by generators, pickers and checkpoints
//!
//! Every failure is a precondition check performed before any state is
//! touched, so an `Err` always means "nothing happened".

use std::sync::PoisonError;
use thiserror::Error;

/// Result alias used throughout the crate
pub type RngResult<T> = Result<T, RngError>;

/// Broad classification of an [`RngError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A caller-supplied argument was out of bounds or misaligned
    InvalidArgument,

    /// A generator state failed its validity predicate
    InvalidState,

    /// Persisted data did not match its recorded hash
    Corrupted,

    /// Another thread panicked while holding a picker's lock
    Internal,
}

/// Errors that can occur while generating or sampling
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RngError {
    #[error("Offset {offset} is outside buffer of length {buffer_len}")]
    OffsetOutOfRange { offset: usize, buffer_len: usize },

    #[error("Not enough room: {count} bytes requested at offset {offset}, buffer length is {buffer_len}")]
    InsufficientRoom {
        offset: usize,
        count: usize,
        buffer_len: usize,
    },

    #[error("{parameter} ({value}) must be a multiple of the chunk size ({chunk_size})")]
    Misaligned {
        parameter: &'static str,
        value: usize,
        chunk_size: usize,
    },

    #[error("Range size must be at least 1, got {0}")]
    InvalidRangeSize(i32),

    #[error("Range starting at {min_inclusive} with size {range_size} exceeds i32::MAX")]
    RangeOverflow { min_inclusive: i32, range_size: i32 },

    #[error("Generator state is not valid; construct it from a seed")]
    InvalidState,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Checkpoint hash mismatch: expected {expected}, computed {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Picker lock poisoned: {0}")]
    LockPoisoned(String),
}

impl RngError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RngError::OffsetOutOfRange { .. }
            | RngError::InsufficientRoom { .. }
            | RngError::Misaligned { .. }
            | RngError::InvalidRangeSize(_)
            | RngError::RangeOverflow { .. }
            | RngError::InvalidConfig(_)
            | RngError::Serialization(_) => ErrorKind::InvalidArgument,
            RngError::InvalidState => ErrorKind::InvalidState,
            RngError::ChecksumMismatch { .. } => ErrorKind::Corrupted,
            RngError::LockPoisoned(_) => ErrorKind::Internal,
        }
    }
}

impl<T> From<PoisonError<T>> for RngError {
    fn from(error: PoisonError<T>) -> Self {
        RngError::LockPoisoned(error.to_string())
    }
}
