use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

use crate::config::CanonicalizeConfig;
use crate::document::FilteredDocument;
use crate::error::CanonicalError;
use crate::stopwords::StopWordFilter;
use crate::token::tokenize;

/// Tokenizer and stop-word filter bound to one configuration.
///
/// Built once per run; the stop-word set is shared read-only by every call,
/// so a `Canonicalizer` can be used from many threads at once.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    cfg: CanonicalizeConfig,
    stopwords: StopWordFilter,
}

impl Canonicalizer {
    pub fn new(cfg: &CanonicalizeConfig) -> Result<Self, CanonicalError> {
        cfg.validate()?;
        Ok(Self {
            stopwords: StopWordFilter::from_source(&cfg.stopwords),
            cfg: cfg.clone(),
        })
    }

    pub fn config(&self) -> &CanonicalizeConfig {
        &self.cfg
    }

    pub fn stopwords(&self) -> &StopWordFilter {
        &self.stopwords
    }

    /// Normalize, tokenize and filter one document.
    ///
    /// Returns [`CanonicalError::EmptyDocument`] when no token survives the
    /// stop-word filter; callers are expected to drop such documents.
    pub fn canonicalize(
        &self,
        doc_id: impl Into<String>,
        input: &str,
    ) -> Result<FilteredDocument, CanonicalError> {
        // Ids are carried verbatim; only blank ones are refused.
        let doc_id: String = doc_id.into();
        if doc_id.trim().is_empty() {
            return Err(CanonicalError::MissingDocId);
        }

        // NFKC first, it can change character boundaries.
        let normalized: Cow<str> = if self.cfg.normalize_unicode {
            Cow::Owned(input.nfkc().collect::<String>())
        } else {
            Cow::Borrowed(input)
        };

        let tokens = tokenize(normalized.as_ref());
        let filtered_tokens = self.stopwords.filter(&tokens);
        if filtered_tokens.is_empty() {
            return Err(CanonicalError::EmptyDocument { doc_id });
        }

        Ok(FilteredDocument {
            doc_id,
            tokens,
            filtered_tokens,
            canonical_version: self.cfg.version,
        })
    }
}
