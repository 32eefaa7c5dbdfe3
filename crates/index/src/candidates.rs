//! Band grouping and candidate generation.

use std::time::Instant;

use hashbrown::{HashMap, HashSet};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::band::band_keys;
use crate::config::{BandConfig, IndexError};

/// Unordered pair of document positions, stored with `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidatePair {
    first: usize,
    second: usize,
}

impl CandidatePair {
    /// `None` for a self-pair.
    pub fn new(a: usize, b: usize) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self {
                first: a,
                second: b,
            }),
            std::cmp::Ordering::Greater => Some(Self {
                first: b,
                second: a,
            }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn second(&self) -> usize {
        self.second
    }
}

type Buckets = HashMap<(u32, u64), Vec<usize>>;

/// Mapping `(band index, band key) -> document positions`.
///
/// Built once from the full signature collection, then read-only.
#[derive(Debug, Clone, Default)]
pub struct BandIndex {
    buckets: Buckets,
    num_docs: usize,
    num_bands: usize,
}

impl BandIndex {
    /// Group every signature by every band key.
    ///
    /// Document ids are positions in `signatures`. All signatures must have
    /// the same length and that length must be a multiple of `num_bands`.
    pub fn build<S>(signatures: &[S], cfg: &BandConfig) -> Result<Self, IndexError>
    where
        S: AsRef<[u64]> + Sync,
    {
        cfg.validate()?;
        let Some(first) = signatures.first() else {
            return Ok(Self {
                num_bands: cfg.num_bands,
                ..Self::default()
            });
        };
        let num_hashes = first.as_ref().len();
        let rows = cfg.rows_per_band(num_hashes)?;

        for (position, sig) in signatures.iter().enumerate() {
            let actual = sig.as_ref().len();
            if actual != num_hashes {
                return Err(IndexError::SignatureLength {
                    position,
                    expected: num_hashes,
                    actual,
                });
            }
        }

        let start = Instant::now();
        let insert = |mut acc: Buckets, (pos, sig): (usize, &S)| {
            for (band, key) in band_keys(sig.as_ref(), rows).into_iter().enumerate() {
                acc.entry((band as u32, key)).or_default().push(pos);
            }
            acc
        };

        let mut buckets = if cfg.use_parallel {
            signatures
                .par_iter()
                .enumerate()
                .fold(Buckets::new, insert)
                .reduce(Buckets::new, merge_buckets)
        } else {
            signatures.iter().enumerate().fold(Buckets::new(), insert)
        };

        for docs in buckets.values_mut() {
            docs.sort_unstable();
        }

        debug!(
            docs = signatures.len(),
            num_bands = cfg.num_bands,
            rows_per_band = rows,
            buckets = buckets.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "band_index_built"
        );

        Ok(Self {
            buckets,
            num_docs: signatures.len(),
            num_bands: cfg.num_bands,
        })
    }

    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    pub fn num_bands(&self) -> usize {
        self.num_bands
    }

    /// Number of distinct `(band, key)` groups.
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Documents filed under `(band, key)`, ascending.
    pub fn bucket(&self, band: usize, key: u64) -> &[usize] {
        self.buckets
            .get(&(band as u32, key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every pair of documents sharing at least one band, each pair once,
    /// sorted.
    ///
    /// A group of `n` documents yields `n * (n - 1) / 2` pairs, so heavily
    /// skewed corpora (many near-identical documents) grow quadratically here.
    pub fn candidates(&self, use_parallel: bool) -> Vec<CandidatePair> {
        let groups: Vec<&[usize]> = self
            .buckets
            .values()
            .filter(|docs| docs.len() > 1)
            .map(Vec::as_slice)
            .collect();

        let collect_pairs = |mut acc: HashSet<CandidatePair>, docs: &&[usize]| {
            for (i, &a) in docs.iter().enumerate() {
                for &b in &docs[i + 1..] {
                    if let Some(pair) = CandidatePair::new(a, b) {
                        acc.insert(pair);
                    }
                }
            }
            acc
        };

        let unique: HashSet<CandidatePair> = if use_parallel {
            groups
                .par_iter()
                .fold(HashSet::new, collect_pairs)
                .reduce(HashSet::new, merge_sets)
        } else {
            groups.iter().fold(HashSet::new(), collect_pairs)
        };

        let mut pairs: Vec<CandidatePair> = unique.into_iter().collect();
        pairs.sort_unstable();
        debug!(
            groups = groups.len(),
            candidates = pairs.len(),
            "candidates_generated"
        );
        pairs
    }
}

fn merge_buckets(mut a: Buckets, b: Buckets) -> Buckets {
    for (key, docs) in b {
        a.entry(key).or_default().extend(docs);
    }
    a
}

fn merge_sets(a: HashSet<CandidatePair>, b: HashSet<CandidatePair>) -> HashSet<CandidatePair> {
    let (mut big, small) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    big.extend(small);
    big
}
