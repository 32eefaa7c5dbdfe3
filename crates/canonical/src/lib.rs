//! parasim canonical text layer.
//!
//! Turns raw document text into the ordered list of terms that the rest of
//! the pipeline reduces to a set.
//!
//! ## What we do
//!
//! - Unicode normalization (NFKC, configurable)
//! - Tokenization on non-alphanumeric boundaries, lowercased
//! - Stop-word removal against a configurable set (English by default)
//! - Rejection of documents with nothing left after filtering
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Same text and config give the
//! same tokens on any machine.

mod config;
mod document;
mod error;
mod pipeline;
mod stopwords;
mod token;

pub use crate::config::{CanonicalizeConfig, StopWordSource};
pub use crate::document::FilteredDocument;
pub use crate::error::CanonicalError;
pub use crate::pipeline::Canonicalizer;
pub use crate::stopwords::{StopWordFilter, ENGLISH_STOP_WORDS};
pub use crate::token::tokenize;

#[cfg(test)]
mod tests {
    use super::*;

    fn canonicalizer(stopwords: &[&str]) -> Canonicalizer {
        let cfg = CanonicalizeConfig {
            stopwords: StopWordSource::Custom(stopwords.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        };
        Canonicalizer::new(&cfg).expect("valid config")
    }

    #[test]
    fn basic_canonicalize() {
        let c = canonicalizer(&["a", "on", "was"]);
        let doc = c
            .canonicalize("P1", "A cat was sitting on a mat.")
            .expect("canonicalization succeeds");
        assert_eq!(doc.doc_id, "P1");
        assert_eq!(doc.filtered_tokens, vec!["cat", "sitting", "mat"]);
        assert_eq!(doc.tokens.len(), 7);
        assert_eq!(doc.canonical_version, 1);
    }

    #[test]
    fn unicode_equivalence_nfkc() {
        let c = canonicalizer(&[]);
        let a = c.canonicalize("a", "Caf\u{00E9}").unwrap();
        let b = c.canonicalize("b", "Cafe\u{0301}").unwrap();
        assert_eq!(a.filtered_tokens, b.filtered_tokens);
    }

    #[test]
    fn disable_unicode_normalization() {
        let cfg = CanonicalizeConfig {
            normalize_unicode: false,
            stopwords: StopWordSource::None,
            ..Default::default()
        };
        let c = Canonicalizer::new(&cfg).unwrap();
        let a = c.canonicalize("a", "Caf\u{00E9}").unwrap();
        let b = c.canonicalize("b", "Cafe\u{0301}").unwrap();
        assert_ne!(a.filtered_tokens, b.filtered_tokens);
    }

    #[test]
    fn stopword_only_document_is_empty() {
        let c = Canonicalizer::new(&CanonicalizeConfig::default()).unwrap();
        let res = c.canonicalize("empty-doc", "The a, of THE!");
        assert_eq!(
            res,
            Err(CanonicalError::EmptyDocument {
                doc_id: "empty-doc".into()
            })
        );
    }

    #[test]
    fn whitespace_only_document_is_empty() {
        let c = canonicalizer(&[]);
        assert!(matches!(
            c.canonicalize("ws", "   \n\t "),
            Err(CanonicalError::EmptyDocument { .. })
        ));
    }

    #[test]
    fn missing_doc_id_rejected() {
        let c = canonicalizer(&[]);
        assert_eq!(
            c.canonicalize("  ", "content"),
            Err(CanonicalError::MissingDocId)
        );
    }

    #[test]
    fn doc_id_is_kept_verbatim() {
        let c = canonicalizer(&[]);
        let doc = c.canonicalize(" doc-7 ", "content").unwrap();
        assert_eq!(doc.doc_id, " doc-7 ");
    }

    #[test]
    fn empty_document_reports_verbatim_id() {
        let c = canonicalizer(&["the"]);
        assert_eq!(
            c.canonicalize(" o1", "the"),
            Err(CanonicalError::EmptyDocument {
                doc_id: " o1".into()
            })
        );
    }

    #[test]
    fn invalid_config_version_rejected() {
        let cfg = CanonicalizeConfig {
            version: 0,
            ..Default::default()
        };
        assert!(matches!(
            Canonicalizer::new(&cfg),
            Err(CanonicalError::InvalidConfig(_))
        ));
    }
}
