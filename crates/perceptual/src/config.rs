//! Configuration and error types for vectorization and MinHash signing.
//!
//! This module is free of I/O and environment-dependent behavior, so the
//! signatures are a pure function of `(corpus tokens, config)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which token list the vocabulary and term vectors are built from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VocabularySource {
    /// Tokens after stop-word removal.
    #[default]
    Filtered,
    /// Every token, stop words included. Documents are still excluded on
    /// their filtered list.
    Unfiltered,
}

/// Configuration for the vectorize-and-sign stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PerceptualConfig {
    /// Configuration schema version.
    ///
    /// Any algorithmic change that can affect signatures must bump this
    /// version, so signatures from different versions are never compared.
    pub version: u32,
    /// Number of independent MinHash functions, i.e. the signature length.
    ///
    /// More functions lower the variance of the distance estimate at a linear
    /// cost in signing time and memory.
    pub num_hashes: usize,
    /// Seed for the hash-function coefficients.
    ///
    /// Two runs with the same seed and the same corpus produce bit-identical
    /// signatures.
    pub seed: u64,
    /// Token list used for the vocabulary.
    pub vocabulary_source: VocabularySource,
    /// Vectorize and sign documents on the rayon pool.
    pub use_parallel: bool,
}

impl PerceptualConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_hashes(mut self, num_hashes: usize) -> Self {
        self.num_hashes = num_hashes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_vocabulary_source(mut self, source: VocabularySource) -> Self {
        self.vocabulary_source = source;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn validate(&self) -> Result<(), PerceptualError> {
        if self.version < 1 {
            return Err(PerceptualError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.num_hashes < 1 {
            return Err(PerceptualError::InvalidConfigNumHashes {
                num_hashes: self.num_hashes,
            });
        }
        Ok(())
    }
}

impl Default for PerceptualConfig {
    fn default() -> Self {
        Self {
            version: 1,
            num_hashes: 64,
            seed: 0xF00D_BAAD_F00D_BAAD,
            vocabulary_source: VocabularySource::Filtered,
            use_parallel: true,
        }
    }
}

/// Errors returned by vectorization and signing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PerceptualError {
    #[error("invalid config: num_hashes must be >= 1 (got {num_hashes})")]
    InvalidConfigNumHashes { num_hashes: usize },

    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    /// The minimum over an empty set is undefined. Upstream exclusion of
    /// empty documents must make this unreachable.
    #[error("cannot sign an empty term vector")]
    EmptySet,

    #[error("term {term:?} is not in the vocabulary")]
    UnknownTerm { term: String },
}
