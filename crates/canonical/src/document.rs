//! Output type of the canonical layer.
//!
//! A [`FilteredDocument`] keeps both token lists so the vectorizer can build
//! its vocabulary from either one. Empty-document exclusion is always decided
//! on `filtered_tokens`; a `FilteredDocument` never has an empty filtered list.
//!
//! ```rust
//! use canonical::{Canonicalizer, CanonicalizeConfig, StopWordSource};
//!
//! let cfg = CanonicalizeConfig {
//!     stopwords: StopWordSource::Custom(vec!["the".into(), "on".into()]),
//!     ..Default::default()
//! };
//! let canonicalizer = Canonicalizer::new(&cfg).unwrap();
//! let doc = canonicalizer.canonicalize("doc-001", "The cat sat on the mat").unwrap();
//!
//! assert_eq!(doc.tokens, vec!["the", "cat", "sat", "on", "the", "mat"]);
//! assert_eq!(doc.filtered_tokens, vec!["cat", "sat", "mat"]);
//! ```

use serde::{Deserialize, Serialize};

/// Tokenized, stop-word-filtered view of one input document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilteredDocument {
    /// Document identifier, exactly as given.
    pub doc_id: String,
    /// Every token in input order.
    pub tokens: Vec<String>,
    /// Tokens left after stop-word removal, in input order. Never empty.
    pub filtered_tokens: Vec<String>,
    /// Version of the [`CanonicalizeConfig`](crate::CanonicalizeConfig) used.
    pub canonical_version: u32,
}
