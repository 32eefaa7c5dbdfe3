//! Configuration types for the canonical text layer.
//!
//! [`CanonicalizeConfig`] controls how raw text becomes the ordered list of
//! filtered terms that downstream stages turn into sets.
//!
//! # Versioning
//!
//! Any change that can alter the produced tokens (even a bug fix) must bump
//! `version`, so signatures from different behaviors are never compared as if
//! they were equal.
//!
//! # Examples
//!
//! ```rust
//! use canonical::{CanonicalizeConfig, StopWordSource};
//!
//! let config = CanonicalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.normalize_unicode);
//! assert_eq!(config.stopwords, StopWordSource::English);
//!
//! let custom = CanonicalizeConfig {
//!     stopwords: StopWordSource::Custom(vec!["the".into(), "a".into()]),
//!     ..Default::default()
//! };
//! assert!(custom.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Where the stop-word set comes from.
///
/// Serialized in snake case, so a YAML file can say `stopwords: english`,
/// `stopwords: none`, or `stopwords: { custom: [the, a] }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StopWordSource {
    /// Built-in English list, see [`ENGLISH_STOP_WORDS`](crate::ENGLISH_STOP_WORDS).
    #[default]
    English,
    /// No stop words; every token is kept.
    None,
    /// Caller-supplied words. Matched case-insensitively.
    Custom(Vec<String>),
    /// Built-in English list plus the given words.
    EnglishPlus(Vec<String>),
}

/// Configuration for tokenization and stop-word filtering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CanonicalizeConfig {
    /// Behavior version. Must be >= 1; version 0 is reserved and rejected.
    pub version: u32,

    /// Apply Unicode NFKC normalization before tokenizing.
    ///
    /// With normalization enabled, `"Caf\u{e9}"` and `"Cafe\u{301}"` produce
    /// the same token.
    pub normalize_unicode: bool,

    /// Stop-word set removed after tokenization.
    pub stopwords: StopWordSource,
}

impl Default for CanonicalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: true,
            stopwords: StopWordSource::English,
        }
    }
}

impl CanonicalizeConfig {
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if let StopWordSource::Custom(words) | StopWordSource::EnglishPlus(words) =
            &self.stopwords
        {
            if words.iter().any(|w| w.trim().is_empty()) {
                return Err(CanonicalError::InvalidConfig(
                    "stop words must not be blank".into(),
                ));
            }
        }
        Ok(())
    }
}
