//! Configuration types for document intake.
//!
//! [`IngestConfig`] decides how files in an input directory are mapped to
//! labeled documents. Labels come from a filename suffix convention: by
//! default `*-original.txt` files are originals and `*-paraphrase.txt` files
//! are paraphrases. Anything else in the directory is ignored.
//!
//! ```rust
//! use ingest::{IngestConfig, Label};
//!
//! let cfg = IngestConfig::default();
//! cfg.validate().expect("defaults are valid");
//! assert_eq!(cfg.label_for_file_name("007-original.txt"), Some(Label::Original));
//! assert_eq!(cfg.label_for_file_name("notes.md"), None);
//! ```
use serde::{Deserialize, Serialize};

use crate::error::IngestError;
use crate::types::Label;

/// Runtime configuration for the directory source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IngestConfig {
    /// Configuration schema version. Must be >= 1.
    pub version: u32,
    /// File name suffix marking an original document.
    pub original_suffix: String,
    /// File name suffix marking a paraphrase document.
    pub paraphrase_suffix: String,
    /// Optional upper bound on a single file's size in bytes.
    pub max_file_bytes: Option<usize>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            version: 1,
            original_suffix: "-original.txt".to_string(),
            paraphrase_suffix: "-paraphrase.txt".to_string(),
            max_file_bytes: None,
        }
    }
}

impl IngestConfig {
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.version == 0 {
            return Err(IngestError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if self.original_suffix.is_empty() || self.paraphrase_suffix.is_empty() {
            return Err(IngestError::InvalidConfig(
                "label suffixes must not be empty".into(),
            ));
        }
        // One suffix ending the other would make labels ambiguous.
        if self.original_suffix.ends_with(&self.paraphrase_suffix)
            || self.paraphrase_suffix.ends_with(&self.original_suffix)
        {
            return Err(IngestError::InvalidConfig(format!(
                "suffixes {:?} and {:?} overlap",
                self.original_suffix, self.paraphrase_suffix
            )));
        }
        if self.max_file_bytes == Some(0) {
            return Err(IngestError::InvalidConfig(
                "max_file_bytes must be > 0 when set".into(),
            ));
        }
        Ok(())
    }

    /// Label implied by a file name, or `None` when it matches neither suffix.
    pub fn label_for_file_name(&self, file_name: &str) -> Option<Label> {
        if file_name.ends_with(&self.original_suffix) {
            Some(Label::Original)
        } else if file_name.ends_with(&self.paraphrase_suffix) {
            Some(Label::Paraphrase)
        } else {
            None
        }
    }
}
