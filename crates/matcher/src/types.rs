use ingest::Label;
use perceptual::Signature;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for the join and rank stages.
///
/// Cheap to clone and serde-friendly so it can be embedded in the pipeline
/// config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatchConfig {
    /// Configuration schema version.
    pub version: u32,
    /// Largest estimated Jaccard distance a pair may have to be kept.
    /// Inclusive, within `[0.0, 1.0]`.
    pub distance_threshold: f64,
    /// Number of ranked results to return.
    pub top_k: usize,
    /// Score candidates and rank on the rayon pool.
    pub use_parallel: bool,
}

impl MatchConfig {
    pub(crate) const DEFAULT_DISTANCE_THRESHOLD: f64 = 0.8;
    pub(crate) const DEFAULT_TOP_K: usize = 10;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_distance_threshold(mut self, threshold: f64) -> Self {
        self.distance_threshold = threshold;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.version < 1 {
            return Err(MatchError::InvalidConfig(format!(
                "version must be >= 1 (got {})",
                self.version
            )));
        }
        if !(0.0..=1.0).contains(&self.distance_threshold) {
            return Err(MatchError::InvalidConfig(format!(
                "distance_threshold must be within [0.0, 1.0] (got {})",
                self.distance_threshold
            )));
        }
        if self.top_k == 0 {
            return Err(MatchError::InvalidConfig(
                "top_k must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            version: 1,
            distance_threshold: Self::DEFAULT_DISTANCE_THRESHOLD,
            top_k: Self::DEFAULT_TOP_K,
            use_parallel: true,
        }
    }
}

/// One signed document as seen by the joiner.
#[derive(Debug, Clone, Copy)]
pub struct MatchDocument<'a> {
    pub id: &'a str,
    pub label: Label,
    pub signature: &'a Signature,
}

impl<'a> MatchDocument<'a> {
    pub fn new(id: &'a str, label: Label, signature: &'a Signature) -> Self {
        Self {
            id,
            label,
            signature,
        }
    }
}

/// A scored candidate, documents referenced by position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredPair {
    pub doc_a: usize,
    pub doc_b: usize,
    pub distance: f64,
}

/// Final output record: an original, its suspected paraphrase and the
/// estimated Jaccard distance between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub original_id: String,
    pub paraphrase_id: String,
    pub distance: f64,
}

/// Errors produced by the matching layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    /// Invalid configuration.
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    /// Two signatures of one run differ in length.
    #[error("signature length mismatch: {left} vs {right}")]
    SignatureLength { left: usize, right: usize },
    /// A candidate references a document that does not exist.
    #[error("candidate references unknown document at position {position}")]
    UnknownDocument { position: usize },
    /// A distance came out NaN or infinite; the batch is aborted.
    #[error("non-finite distance {distance} between {doc_a:?} and {doc_b:?}")]
    NonFiniteDistance {
        doc_a: String,
        doc_b: String,
        distance: f64,
    },
}
