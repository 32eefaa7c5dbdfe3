//! Corpus vocabulary and binary term vectors.
//!
//! The vocabulary is the first full-corpus barrier of the pipeline: every
//! document's tokens must be seen before any index is handed out. Indices are
//! assigned in sorted term order, so the mapping does not depend on how the
//! per-document work was scheduled.

use fxhash::{FxHashMap, FxHashSet};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::PerceptualError;

/// Mapping from term to a dense integer index. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    index: FxHashMap<String, u32>,
    terms: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary over every distinct token in `docs`.
    pub fn build<D, S>(docs: &[D], use_parallel: bool) -> Self
    where
        D: AsRef<[S]> + Sync,
        S: AsRef<str> + Sync,
    {
        let distinct: FxHashSet<&str> = if use_parallel {
            docs.par_iter()
                .fold(FxHashSet::default, |mut acc, doc| {
                    acc.extend(doc.as_ref().iter().map(AsRef::as_ref));
                    acc
                })
                .reduce(FxHashSet::default, |mut a, b| {
                    a.extend(b);
                    a
                })
        } else {
            docs.iter()
                .flat_map(|doc| doc.as_ref().iter().map(AsRef::as_ref))
                .collect()
        };

        let mut terms: Vec<String> = distinct.into_iter().map(str::to_owned).collect();
        terms.sort_unstable();
        let index = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as u32))
            .collect();
        Self { index, terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn index_of(&self, term: &str) -> Option<u32> {
        self.index.get(term).copied()
    }

    pub fn term(&self, index: u32) -> Option<&str> {
        self.terms.get(index as usize).map(String::as_str)
    }

    /// Map tokens to their indices, collapsing duplicates.
    ///
    /// Tokens missing from the vocabulary are skipped. For a vocabulary built
    /// from the same token lists this never happens; use
    /// [`vectorize_strict`](Self::vectorize_strict) to turn it into an error.
    pub fn vectorize<S: AsRef<str>>(&self, tokens: &[S]) -> TermVector {
        TermVector::from_indices(
            tokens
                .iter()
                .filter_map(|t| self.index_of(t.as_ref()))
                .collect(),
        )
    }

    /// Lookup-only vectorization: any out-of-vocabulary token is an error.
    pub fn vectorize_strict<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> Result<TermVector, PerceptualError> {
        let mut indices = Vec::with_capacity(tokens.len());
        for token in tokens {
            let token = token.as_ref();
            let idx = self
                .index_of(token)
                .ok_or_else(|| PerceptualError::UnknownTerm {
                    term: token.to_string(),
                })?;
            indices.push(idx);
        }
        Ok(TermVector::from_indices(indices))
    }
}

/// Sparse binary term-presence vector: the sorted, distinct vocabulary
/// indices of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermVector {
    indices: Vec<u32>,
}

impl TermVector {
    pub fn from_indices(mut indices: Vec<u32>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self { indices }
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
