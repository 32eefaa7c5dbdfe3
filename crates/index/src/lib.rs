//! # parasim index layer
//!
//! Locality-sensitive hashing over MinHash signatures. Instead of scoring
//! every pair of documents, each signature is cut into bands and only
//! documents that agree on a whole band are handed to the matcher.
//!
//! With `b` bands of `r` rows, a pair with Jaccard similarity `s` becomes a
//! candidate with probability `1 - (1 - s^r)^b`.
//!
//! ## Core Types
//!
//! - [`BandConfig`]: number of bands and the parallelism switch.
//! - [`BandIndex`]: `(band, key) -> documents` grouping, built in one
//!   barrier over the whole signature collection.
//! - [`CandidatePair`]: an unordered pair of document positions.
//!
//! ## Example Usage
//!
//! ```
//! use index::{BandConfig, BandIndex};
//!
//! let signatures = vec![
//!     vec![11u64, 12, 13, 14],
//!     vec![11, 12, 99, 98],
//!     vec![50, 51, 52, 53],
//! ];
//! let cfg = BandConfig::new().with_num_bands(2);
//!
//! let index = BandIndex::build(&signatures, &cfg).unwrap();
//! let pairs = index.candidates(cfg.use_parallel);
//!
//! assert_eq!(pairs.len(), 1);
//! assert_eq!((pairs[0].first(), pairs[0].second()), (0, 1));
//! ```

mod band;
mod candidates;
mod config;

pub use crate::band::{band_key, band_keys};
pub use crate::candidates::{BandIndex, CandidatePair};
pub use crate::config::{BandConfig, IndexError};

/// Probability that a pair with Jaccard similarity `similarity` shares at
/// least one band.
pub fn candidate_probability(similarity: f64, num_bands: usize, rows_per_band: usize) -> f64 {
    let band_hit = similarity.powi(rows_per_band as i32);
    1.0 - (1.0 - band_hit).powi(num_bands as i32)
}

/// Build the band index and return its candidate pairs in one call.
pub fn candidate_pairs<S>(signatures: &[S], cfg: &BandConfig) -> Result<Vec<CandidatePair>, IndexError>
where
    S: AsRef<[u64]> + Sync,
{
    let index = BandIndex::build(signatures, cfg)?;
    Ok(index.candidates(cfg.use_parallel))
}
