//! Core data model types for the ingest crate.
//!
//! A [`RawDocument`] is the only shape the similarity engine accepts: a stable
//! id, the corpus it was drawn from ([`Label`]) and its raw text. Records are
//! created once at intake and never mutated afterwards.
//!
//! ```text
//! RawDocument
//! ├── id: String      (unique within a run)
//! ├── label: Label    (Original | Paraphrase)
//! └── text: String    (raw, un-normalized)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use ingest::{Label, RawDocument};
//!
//! let doc = RawDocument::new("42-original.txt", Label::Original, "The cat sat on the mat.");
//! assert_eq!(doc.label, Label::Original);
//! assert_eq!(doc.label.to_string(), "original");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Corpus a document belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Document from the source corpus.
    Original,
    /// Document from the corpus suspected of paraphrasing the originals.
    Paraphrase,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Original => "original",
            Label::Paraphrase => "paraphrase",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labeled input record as handed to the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawDocument {
    /// Stable identifier, unique for the duration of a run.
    pub id: String,
    /// Which corpus the document came from.
    pub label: Label,
    /// Raw text content. Not retained past vectorization.
    pub text: String,
}

impl RawDocument {
    pub fn new(id: impl Into<String>, label: Label, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_display_is_lowercase() {
        assert_eq!(Label::Original.to_string(), "original");
        assert_eq!(Label::Paraphrase.to_string(), "paraphrase");
    }

    #[test]
    fn label_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Label::Paraphrase).unwrap();
        assert_eq!(json, "\"paraphrase\"");
        let back: Label = serde_json::from_str("\"original\"").unwrap();
        assert_eq!(back, Label::Original);
    }

    #[test]
    fn raw_document_new_accepts_borrowed_and_owned() {
        let a = RawDocument::new("a", Label::Original, "text");
        let b = RawDocument::new(String::from("a"), Label::Original, String::from("text"));
        assert_eq!(a, b);
    }

    #[test]
    fn originals_sort_before_paraphrases() {
        assert!(Label::Original < Label::Paraphrase);
    }
}
