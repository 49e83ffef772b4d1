//! Checkpoint - Save/Load Generator State
//!
//! Serializes a generator state to canonical JSON alongside a SHA256 hash,
//! so a caller can persist the evolving state instead of only the seed.
//!
//! # Critical Invariants
//!
//! - **Determinism**: a restored state produces the same bytes as the original
//! - **Integrity**: a checkpoint whose JSON no longer matches its hash is rejected
//! - **Validity**: a restored state must pass its validity predicate

use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use crate::rng::{GeneratorState, RngError, RngResult};

/// Persisted generator state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCheckpoint {
    /// Canonical JSON of the state
    pub state_json: String,

    /// SHA256 of `state_json`, lowercase hex
    pub state_hash: String,
}

impl StateCheckpoint {
    /// Capture a state
    ///
    /// # Example
    /// ```
    /// use prng_core_rs::{StateCheckpoint, Xoroshiro128State};
    ///
    /// let state = Xoroshiro128State::new(1, 2);
    /// let checkpoint = StateCheckpoint::capture(&state).unwrap();
    /// let restored: Xoroshiro128State = checkpoint.restore().unwrap();
    /// assert_eq!(restored, state);
    /// ```
    pub fn capture<S: Serialize>(state: &S) -> RngResult<Self> {
        let state_json = canonical_json(state)?;
        let state_hash = sha256_hex(&state_json);
        debug!("Captured generator state checkpoint {}", state_hash);

        Ok(Self {
            state_json,
            state_hash,
        })
    }

    /// Verify the hash and rebuild the state
    ///
    /// # Errors
    /// - [`RngError::ChecksumMismatch`] if the JSON was altered
    /// - [`RngError::Serialization`] if the JSON is not a state of type `S`
    /// - [`RngError::InvalidState`] if the decoded state is not valid
    pub fn restore<S>(&self) -> RngResult<S>
    where
        S: GeneratorState + DeserializeOwned,
    {
        let actual = sha256_hex(&self.state_json);
        if actual != self.state_hash {
            error!(
                "Checkpoint hash mismatch: expected {}, computed {}",
                self.state_hash, actual
            );
            return Err(RngError::ChecksumMismatch {
                expected: self.state_hash.clone(),
                actual,
            });
        }

        let state: S = serde_json::from_str(&self.state_json)
            .map_err(|e| RngError::Serialization(format!("State deserialization failed: {}", e)))?;

        if !state.is_valid() {
            return Err(RngError::InvalidState);
        }

        debug!("Restored generator state checkpoint {}", self.state_hash);
        Ok(state)
    }
}

/// Compute deterministic SHA256 hash of any serializable value
///
/// Object keys are sorted first, so the hash does not depend on field
/// declaration order.
pub fn compute_state_hash<T: Serialize>(value: &T) -> RngResult<String> {
    Ok(sha256_hex(&canonical_json(value)?))
}

fn canonical_json<T: Serialize>(value: &T) -> RngResult<String> {
    let value = serde_json::to_value(value)
        .map_err(|e| RngError::Serialization(format!("State serialization failed: {}", e)))?;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    serde_json::to_string(&canonicalize(value))
        .map_err(|e| RngError::Serialization(format!("State serialization failed: {}", e)))
}

fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
