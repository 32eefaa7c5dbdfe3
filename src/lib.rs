//! Workspace umbrella crate for parasim.
//!
//! This crate stitches the pipeline layers together so callers can go from a
//! batch of labeled documents to a ranked list of suspected paraphrases with
//! a single API entry point:
//!
//! ```text
//! RawDocument -> canonical (tokens, stop words) -> perceptual (vocabulary,
//! MinHash) -> index (LSH bands, candidates) -> matcher (join, rank)
//! ```
//!
//! ```
//! use parasim::{Label, Pipeline, PipelineConfig, RawDocument};
//!
//! let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
//! let report = pipeline
//!     .run(vec![
//!         RawDocument::new("o1", Label::Original, "the quick brown fox jumps"),
//!         RawDocument::new("p1", Label::Paraphrase, "the quick brown fox leaps"),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(report.results[0].original_id, "o1");
//! ```

pub mod config;
pub mod sink;

pub use canonical::{
    CanonicalError, CanonicalizeConfig, Canonicalizer, FilteredDocument, StopWordSource, tokenize,
};
pub use index::{BandConfig, BandIndex, CandidatePair, IndexError};
pub use ingest::{IngestConfig, IngestError, Label, RawDocument, load_directory};
pub use matcher::{MatchConfig, MatchDocument, MatchError, MatchResult, Matcher};
pub use perceptual::{
    MinHasher, PerceptualConfig, PerceptualError, Signature, SignedCorpus, TermVector, Vocabulary,
    VocabularySource, sign_corpus,
};

pub use crate::config::{ConfigLoadError, ParasimConfig};
pub use crate::sink::{CsvSink, SinkError, render_table};

use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Level, debug, info, warn};

/// Errors that can occur while running a batch through the pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("ingest failure: {0}")]
    Ingest(#[from] IngestError),
    #[error("canonicalization failure: {0}")]
    Canonical(#[from] CanonicalError),
    #[error("signing failure: {0}")]
    Perceptual(#[from] PerceptualError),
    #[error("banding failure: {0}")]
    Index(#[from] IndexError),
    #[error("matching failure: {0}")]
    Match(#[from] MatchError),
}

/// Metrics observer for pipeline stages.
///
/// Installed per [`Pipeline`] with [`Pipeline::with_metrics`]. Every callback
/// gets the stage latency and the number of items the stage produced.
pub trait PipelineMetrics: Send + Sync {
    /// Documents kept after stop-word filtering.
    fn record_canonical(&self, latency: Duration, kept: usize);
    /// Signatures produced.
    fn record_perceptual(&self, latency: Duration, signatures: usize);
    /// Candidate pairs produced by banding.
    fn record_index(&self, latency: Duration, candidates: usize);
    /// Cross-label pairs under the threshold, before truncation.
    fn record_match(&self, latency: Duration, kept: usize);
}

/// Configuration for every engine stage, validated together before a batch
/// starts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub canonical: CanonicalizeConfig,
    pub perceptual: PerceptualConfig,
    pub index: BandConfig,
    pub matcher: MatchConfig,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch every stage between the rayon pool and sequential execution.
    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.perceptual.use_parallel = use_parallel;
        self.index.use_parallel = use_parallel;
        self.matcher.use_parallel = use_parallel;
        self
    }

    pub fn use_parallel(&self) -> bool {
        self.perceptual.use_parallel
    }

    /// Check every stage, including that `num_bands` divides `num_hashes`.
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.canonical.validate()?;
        self.perceptual.validate()?;
        self.index.validate_for(self.perceptual.num_hashes)?;
        self.matcher.validate()?;
        Ok(())
    }
}

/// Outcome of one [`Pipeline::run`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Ranked `(original, paraphrase, distance)` records, at most `top_k`.
    pub results: Vec<MatchResult>,
    /// Documents received.
    pub documents_in: usize,
    /// Ids of documents dropped because nothing survived stop-word removal.
    pub dropped_empty: Vec<String>,
    /// Distinct terms in the vocabulary.
    pub vocabulary_size: usize,
    /// Candidate pairs produced by banding.
    pub candidate_pairs: usize,
    /// Cross-label pairs under the threshold, before truncation.
    pub scored_pairs: usize,
}

/// A configured batch pipeline.
///
/// Construction validates the whole configuration, so a bad threshold or an
/// indivisible banding fails before any document is read.
#[derive(Clone)]
pub struct Pipeline {
    cfg: PipelineConfig,
    canonicalizer: Canonicalizer,
    hasher: MinHasher,
    matcher: Matcher,
    metrics: Option<Arc<dyn PipelineMetrics>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("cfg", &self.cfg)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl Pipeline {
    pub fn new(cfg: PipelineConfig) -> Result<Self, PipelineError> {
        cfg.validate()?;
        Ok(Self {
            canonicalizer: Canonicalizer::new(&cfg.canonical)?,
            hasher: MinHasher::new(&cfg.perceptual)?,
            matcher: Matcher::new(cfg.matcher.clone())?,
            cfg,
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn PipelineMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.cfg
    }

    /// Run one batch end to end.
    ///
    /// Documents whose filtered token list is empty are dropped with a
    /// warning and listed in the report. Any other failure aborts the batch.
    pub fn run(&self, docs: Vec<RawDocument>) -> Result<PipelineReport, PipelineError> {
        let span = tracing::span!(Level::INFO, "pipeline.run", docs = docs.len());
        let _guard = span.enter();
        let started = Instant::now();
        let use_parallel = self.cfg.use_parallel();

        ingest::validate_corpus(&docs)?;
        let documents_in = docs.len();

        // Stage 1: tokenize + filter.
        let stage = Instant::now();
        let (kept, dropped_empty) = self.canonicalize_all(&docs, use_parallel)?;
        self.observe(|m| m.record_canonical(stage.elapsed(), kept.len()));
        info!(
            kept = kept.len(),
            dropped = dropped_empty.len(),
            "canonical_complete"
        );

        // Stage 2: vocabulary barrier, vectorize, sign.
        let stage = Instant::now();
        let token_lists: Vec<&[String]> = kept
            .iter()
            .map(|(_, doc)| match self.cfg.perceptual.vocabulary_source {
                VocabularySource::Filtered => doc.filtered_tokens.as_slice(),
                VocabularySource::Unfiltered => doc.tokens.as_slice(),
            })
            .collect();
        let SignedCorpus {
            vocabulary,
            signatures,
        } = self.hasher.sign_corpus(&token_lists)?;
        self.observe(|m| m.record_perceptual(stage.elapsed(), signatures.len()));
        info!(
            vocabulary_size = vocabulary.len(),
            num_hashes = self.hasher.num_hashes(),
            "signing_complete"
        );

        // Stage 3: band grouping barrier, candidates.
        let stage = Instant::now();
        let band_index = BandIndex::build(&signatures, &self.cfg.index)?;
        let candidates = band_index.candidates(use_parallel);
        self.observe(|m| m.record_index(stage.elapsed(), candidates.len()));
        info!(
            buckets = band_index.num_buckets(),
            candidates = candidates.len(),
            "banding_complete"
        );

        // Stage 4: join + rank.
        let stage = Instant::now();
        let match_docs: Vec<MatchDocument<'_>> = kept
            .iter()
            .zip(signatures.iter())
            .map(|((label, doc), sig)| MatchDocument::new(&doc.doc_id, *label, sig))
            .collect();
        let outcome = self.matcher.match_candidates(&candidates, &match_docs)?;
        self.observe(|m| m.record_match(stage.elapsed(), outcome.kept));

        info!(
            documents_in,
            dropped = dropped_empty.len(),
            results = outcome.results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "pipeline_complete"
        );

        Ok(PipelineReport {
            results: outcome.results,
            documents_in,
            dropped_empty,
            vocabulary_size: vocabulary.len(),
            candidate_pairs: candidates.len(),
            scored_pairs: outcome.kept,
        })
    }

    /// Canonicalize every document, splitting off the empty ones.
    ///
    /// Output keeps input order so positions stay reproducible across runs.
    fn canonicalize_all(
        &self,
        docs: &[RawDocument],
        use_parallel: bool,
    ) -> Result<(Vec<(Label, FilteredDocument)>, Vec<String>), PipelineError> {
        let one = |doc: &RawDocument| {
            (
                doc.label,
                self.canonicalizer.canonicalize(doc.id.as_str(), &doc.text),
            )
        };
        let outcomes: Vec<(Label, Result<FilteredDocument, CanonicalError>)> = if use_parallel {
            docs.par_iter().map(one).collect()
        } else {
            docs.iter().map(one).collect()
        };

        let mut kept = Vec::with_capacity(outcomes.len());
        let mut dropped = Vec::new();
        for (label, outcome) in outcomes {
            match outcome {
                Ok(doc) => kept.push((label, doc)),
                Err(CanonicalError::EmptyDocument { doc_id }) => {
                    warn!(doc_id = %doc_id, label = %label, "document_dropped_empty");
                    dropped.push(doc_id);
                }
                Err(err) => return Err(err.into()),
            }
        }
        debug!(kept = kept.len(), dropped = dropped.len(), "canonicalize_all");
        Ok((kept, dropped))
    }

    fn observe(&self, f: impl FnOnce(&dyn PipelineMetrics)) {
        if let Some(metrics) = self.metrics.as_deref() {
            f(metrics);
        }
    }
}
