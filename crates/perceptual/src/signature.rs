//! MinHash signature type.
//!
//! Signatures of one run all have the same length, so two of them can be
//! compared position by position without any bookkeeping.

use serde::{Deserialize, Serialize};

/// Fixed-length MinHash signature, one value per hash function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    values: Vec<u64>,
}

impl Signature {
    pub fn new(values: Vec<u64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of positions where both signatures hold the same value.
    ///
    /// Only the common prefix is compared; callers are responsible for
    /// checking that lengths match.
    pub fn agreement(&self, other: &Signature) -> usize {
        self.values
            .iter()
            .zip(other.values.iter())
            .filter(|(a, b)| a == b)
            .count()
    }
}

impl AsRef<[u64]> for Signature {
    fn as_ref(&self) -> &[u64] {
        &self.values
    }
}
