//! # parasim perceptual layer
//!
//! Takes the filtered token lists of a whole corpus and produces one
//! fixed-length MinHash signature per document.
//!
//! ## Contract
//!
//! - Consumes token lists produced by the canonical layer; never tokenizes or
//!   normalizes itself.
//! - Pure function of `(token lists, config)`: no I/O, no clocks, no global
//!   state. Same input and seed, bit-identical signatures.
//!
//! ## Core Pipeline
//!
//! 1.  **Vocabulary**: one pass over the full corpus assigns every distinct
//!     term a dense index. This is a barrier: nothing is hashed before it
//!     completes.
//! 2.  **Vectorize**: each document becomes the sorted set of its term
//!     indices (presence only, frequencies are dropped).
//! 3.  **MinHash**: each set is reduced to `num_hashes` minima under a family
//!     of affine hash functions fixed by the seed.
//!
//! Steps 2 and 3 run per document on the rayon pool when `use_parallel` is set.
//!
//! ## Example Usage
//!
//! ```
//! use perceptual::{sign_corpus, PerceptualConfig};
//!
//! let docs = vec![
//!     vec!["cat", "sat", "mat"],
//!     vec!["cat", "sitting", "mat"],
//! ];
//! let cfg = PerceptualConfig::new().with_num_hashes(32);
//!
//! let corpus = sign_corpus(&docs, &cfg).unwrap();
//!
//! assert_eq!(corpus.vocabulary.len(), 4);
//! assert_eq!(corpus.signatures.len(), 2);
//! assert!(corpus.signatures.iter().all(|s| s.len() == 32));
//! ```
//!
pub mod config;
mod minhash;
mod signature;
mod vocabulary;

use rayon::prelude::*;

pub use crate::config::{PerceptualConfig, PerceptualError, VocabularySource};
pub use crate::minhash::{MinHasher, MERSENNE_PRIME_61};
pub use crate::signature::Signature;
pub use crate::vocabulary::{TermVector, Vocabulary};

/// Current signing algorithm version for this crate.
pub const PERCEPTUAL_VERSION: u16 = 1;

/// Human-readable algorithm identifier.
pub const PERCEPTUAL_ALGORITHM: &str = "affine_minhash_m61_v1";

/// Output of [`sign_corpus`]: the shared vocabulary and one signature per
/// input document, in input order.
#[derive(Debug, Clone)]
pub struct SignedCorpus {
    pub vocabulary: Vocabulary,
    pub signatures: Vec<Signature>,
}

/// Build the vocabulary, vectorize every document and sign it.
///
/// Every document must contribute at least one term; an empty token list
/// fails the whole batch with [`PerceptualError::EmptySet`].
pub fn sign_corpus<D, S>(docs: &[D], cfg: &PerceptualConfig) -> Result<SignedCorpus, PerceptualError>
where
    D: AsRef<[S]> + Sync,
    S: AsRef<str> + Sync,
{
    MinHasher::new(cfg)?.sign_corpus(docs)
}

impl MinHasher {
    /// [`sign_corpus`] with an already drawn hash family.
    pub fn sign_corpus<D, S>(&self, docs: &[D]) -> Result<SignedCorpus, PerceptualError>
    where
        D: AsRef<[S]> + Sync,
        S: AsRef<str> + Sync,
    {
        let use_parallel = self.use_parallel();

        // Barrier: the vocabulary must observe every document.
        let vocabulary = Vocabulary::build(docs, use_parallel);

        let vectors: Vec<TermVector> = if use_parallel {
            docs.par_iter()
                .map(|doc| vocabulary.vectorize(doc.as_ref()))
                .collect()
        } else {
            docs.iter()
                .map(|doc| vocabulary.vectorize(doc.as_ref()))
                .collect()
        };

        let signatures = self.sign_all(&vectors)?;
        Ok(SignedCorpus {
            vocabulary,
            signatures,
        })
    }
}
