use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

use index::CandidatePair;
use ingest::Label;
use perceptual::Signature;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::types::{MatchConfig, MatchDocument, MatchError, MatchResult, ScoredPair};


/// Estimated Jaccard distance: the fraction of hash positions on which the
/// two signatures disagree.
///
/// Symmetric. Two empty signatures give NaN, which [`join`] turns into
/// [`MatchError::NonFiniteDistance`].
pub fn estimate_distance(a: &Signature, b: &Signature) -> Result<f64, MatchError> {
    if a.len() != b.len() {
        return Err(MatchError::SignatureLength {
            left: a.len(),
            right: b.len(),
        });
    }
    let matches = a.agreement(b) as f64;
    Ok(1.0 - matches / a.len() as f64)
}

/// Estimate the distance of every candidate pair.
pub fn score_candidates(
    candidates: &[CandidatePair],
    docs: &[MatchDocument<'_>],
    use_parallel: bool,
) -> Result<Vec<ScoredPair>, MatchError> {
    let score = |pair: &CandidatePair| -> Result<ScoredPair, MatchError> {
        let a = lookup(docs, pair.first())?;
        let b = lookup(docs, pair.second())?;
        Ok(ScoredPair {
            doc_a: pair.first(),
            doc_b: pair.second(),
            distance: estimate_distance(a.signature, b.signature)?,
        })
    };

    if use_parallel {
        candidates.par_iter().map(score).collect()
    } else {
        candidates.iter().map(score).collect()
    }
}

/// Keep the cross-label pairs whose distance is at most `threshold`.
///
/// Each kept pair is oriented so that the original comes first. Same-label
/// pairs are dropped. A NaN or infinite distance fails the whole call.
pub fn select_cross_label(
    scored: &[ScoredPair],
    docs: &[MatchDocument<'_>],
    threshold: f64,
    use_parallel: bool,
) -> Result<Vec<MatchResult>, MatchError> {
    let judge = |pair: &ScoredPair| judge_pair(pair, docs, threshold);

    let judged: Vec<Option<MatchResult>> = if use_parallel {
        scored.par_iter().map(judge).collect::<Result<_, _>>()?
    } else {
        scored.iter().map(judge).collect::<Result<_, _>>()?
    };
    Ok(judged.into_iter().flatten().collect())
}

/// Score candidates and keep the cross-label pairs under the threshold.
pub fn join(
    candidates: &[CandidatePair],
    docs: &[MatchDocument<'_>],
    threshold: f64,
    use_parallel: bool,
) -> Result<Vec<MatchResult>, MatchError> {
    let scored = score_candidates(candidates, docs, use_parallel)?;
    select_cross_label(&scored, docs, threshold, use_parallel)
}

/// Sort by distance ascending, ties broken by `(original_id, paraphrase_id)`,
/// and keep the first `k`.
///
/// With `use_parallel` every rayon partition keeps its own bounded heap of
/// `k` entries and the heaps are merged; the result is identical to the
/// sequential path.
pub fn rank(results: Vec<MatchResult>, k: usize, use_parallel: bool) -> Vec<MatchResult> {
    if k == 0 {
        return Vec::new();
    }

    let heap = if use_parallel {
        results
            .into_par_iter()
            .fold(
                || BinaryHeap::with_capacity(k + 1),
                |heap, r| push_bounded(heap, Ranked(r), k),
            )
            .reduce(BinaryHeap::new, |a, b| merge_bounded(a, b, k))
    } else {
        results
            .into_iter()
            .fold(BinaryHeap::with_capacity(k + 1), |heap, r| {
                push_bounded(heap, Ranked(r), k)
            })
    };

    heap.into_sorted_vec().into_iter().map(|r| r.0).collect()
}

/// Result of [`Matcher::match_candidates`].
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Ranked, truncated output.
    pub results: Vec<MatchResult>,
    /// Cross-label pairs that passed the threshold, before truncation.
    pub kept: usize,
}

/// Join-and-rank stage bound to one validated [`MatchConfig`].
#[derive(Debug, Clone)]
pub struct Matcher {
    cfg: MatchConfig,
}

impl Matcher {
    pub fn new(cfg: MatchConfig) -> Result<Self, MatchError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    pub fn join(
        &self,
        candidates: &[CandidatePair],
        docs: &[MatchDocument<'_>],
    ) -> Result<Vec<MatchResult>, MatchError> {
        join(
            candidates,
            docs,
            self.cfg.distance_threshold,
            self.cfg.use_parallel,
        )
    }

    pub fn rank(&self, results: Vec<MatchResult>) -> Vec<MatchResult> {
        rank(results, self.cfg.top_k, self.cfg.use_parallel)
    }

    /// Join the candidates, then rank what survives.
    pub fn match_candidates(
        &self,
        candidates: &[CandidatePair],
        docs: &[MatchDocument<'_>],
    ) -> Result<MatchOutcome, MatchError> {
        let start = Instant::now();
        let joined = self.join(candidates, docs)?;
        let kept = joined.len();
        debug!(
            candidates = candidates.len(),
            kept,
            threshold = self.cfg.distance_threshold,
            "join_complete"
        );

        let results = self.rank(joined);
        info!(
            kept,
            returned = results.len(),
            top_k = self.cfg.top_k,
            elapsed_us = start.elapsed().as_micros() as u64,
            "match_complete"
        );
        Ok(MatchOutcome { results, kept })
    }
}

fn lookup<'d, 'a>(
    docs: &'d [MatchDocument<'a>],
    position: usize,
) -> Result<&'d MatchDocument<'a>, MatchError> {
    docs.get(position)
        .ok_or(MatchError::UnknownDocument { position })
}

fn judge_pair(
    pair: &ScoredPair,
    docs: &[MatchDocument<'_>],
    threshold: f64,
) -> Result<Option<MatchResult>, MatchError> {
    let a = lookup(docs, pair.doc_a)?;
    let b = lookup(docs, pair.doc_b)?;

    if !pair.distance.is_finite() {
        return Err(MatchError::NonFiniteDistance {
            doc_a: a.id.to_string(),
            doc_b: b.id.to_string(),
            distance: pair.distance,
        });
    }
    if pair.distance > threshold {
        return Ok(None);
    }

    let (original, paraphrase) = match (a.label, b.label) {
        (Label::Original, Label::Paraphrase) => (a, b),
        (Label::Paraphrase, Label::Original) => (b, a),
        _ => return Ok(None),
    };
    Ok(Some(MatchResult {
        original_id: original.id.to_string(),
        paraphrase_id: paraphrase.id.to_string(),
        distance: pair.distance,
    }))
}

/// Total order used for ranking. Distances reaching this point are finite.
#[derive(Debug)]
struct Ranked(MatchResult);

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .distance
            .total_cmp(&other.0.distance)
            .then_with(|| self.0.original_id.cmp(&other.0.original_id))
            .then_with(|| self.0.paraphrase_id.cmp(&other.0.paraphrase_id))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

// Max-heap: the worst kept entry sits on top and is evicted first.
fn push_bounded(mut heap: BinaryHeap<Ranked>, item: Ranked, k: usize) -> BinaryHeap<Ranked> {
    heap.push(item);
    if heap.len() > k {
        heap.pop();
    }
    heap
}

fn merge_bounded(a: BinaryHeap<Ranked>, b: BinaryHeap<Ranked>, k: usize) -> BinaryHeap<Ranked> {
    let (mut big, small) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    for item in small {
        big = push_bounded(big, item, k);
    }
    big
}
