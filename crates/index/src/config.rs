use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Banding parameters for the LSH stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BandConfig {
    /// Configuration schema version.
    pub version: u32,
    /// Number of bands each signature is cut into. Must divide the signature
    /// length exactly.
    ///
    /// More bands (fewer rows per band) catch more distant pairs at the cost
    /// of more candidates to score.
    pub num_bands: usize,
    /// Group bands on the rayon pool.
    pub use_parallel: bool,
}

impl BandConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_bands(mut self, num_bands: usize) -> Self {
        self.num_bands = num_bands;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Checks that do not depend on the signature length.
    pub fn validate(&self) -> Result<(), IndexError> {
        if self.version < 1 {
            return Err(IndexError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.num_bands < 1 {
            return Err(IndexError::InvalidConfigBands {
                num_bands: self.num_bands,
            });
        }
        Ok(())
    }

    /// Full check against a concrete signature length.
    pub fn validate_for(&self, num_hashes: usize) -> Result<(), IndexError> {
        self.validate()?;
        if num_hashes == 0 || num_hashes % self.num_bands != 0 {
            return Err(IndexError::InvalidBanding {
                num_hashes,
                num_bands: self.num_bands,
            });
        }
        Ok(())
    }

    /// Rows per band for a signature of `num_hashes` values.
    pub fn rows_per_band(&self, num_hashes: usize) -> Result<usize, IndexError> {
        self.validate_for(num_hashes)?;
        Ok(num_hashes / self.num_bands)
    }
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            version: 1,
            num_bands: 32,
            use_parallel: true,
        }
    }
}

/// Errors produced by banding and candidate generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("invalid config: num_bands must be >= 1 (got {num_bands})")]
    InvalidConfigBands { num_bands: usize },

    #[error("num_hashes ({num_hashes}) must be a positive multiple of num_bands ({num_bands})")]
    InvalidBanding { num_hashes: usize, num_bands: usize },

    #[error("signature {position} has length {actual}, expected {expected}")]
    SignatureLength {
        position: usize,
        expected: usize,
        actual: usize,
    },
}
