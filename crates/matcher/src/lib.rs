//! # parasim matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` is the last engine stage. It takes the candidate pairs produced
//! by the index layer, estimates how far apart each pair is from their
//! MinHash signatures, keeps the original/paraphrase pairs that are close
//! enough, and ranks them.
//!
//! ## Core Types
//!
//! - [`MatchConfig`]: `distance_threshold` (inclusive, default 0.8), `top_k`
//!   (default 10) and the parallelism switch.
//! - [`MatchDocument`]: id, label and signature of one document, borrowed.
//! - [`ScoredPair`]: a candidate with its estimated distance.
//! - [`MatchResult`]: `(original_id, paraphrase_id, distance)`, the output
//!   record.
//! - [`Matcher`]: join + rank bound to a validated config.
//!
//! ## Orientation
//!
//! Candidate pairs are unordered. Before the label filter each pair is
//! oriented so the `Original` side comes first; pairs whose two documents
//! carry the same label are dropped. An original/paraphrase pair is therefore
//! reported once, whichever way round it was generated.
//!
//! ## Example Usage
//!
//! ```
//! use index::CandidatePair;
//! use ingest::Label;
//! use matcher::{MatchConfig, MatchDocument, Matcher};
//! use perceptual::Signature;
//!
//! let o1 = Signature::new(vec![1, 2, 3, 4]);
//! let p1 = Signature::new(vec![1, 2, 3, 9]);
//! let docs = vec![
//!     MatchDocument::new("p1", Label::Paraphrase, &p1),
//!     MatchDocument::new("o1", Label::Original, &o1),
//! ];
//! let candidates = vec![CandidatePair::new(0, 1).unwrap()];
//!
//! let matcher = Matcher::new(MatchConfig::default()).unwrap();
//! let outcome = matcher.match_candidates(&candidates, &docs).unwrap();
//!
//! assert_eq!(outcome.results.len(), 1);
//! assert_eq!(outcome.results[0].original_id, "o1");
//! assert_eq!(outcome.results[0].paraphrase_id, "p1");
//! assert_eq!(outcome.results[0].distance, 0.25);
//! ```

pub mod engine;
pub mod types;

pub use crate::engine::{
    estimate_distance, join, rank, score_candidates, select_cross_label, MatchOutcome, Matcher,
};
pub use crate::types::{MatchConfig, MatchDocument, MatchError, MatchResult, ScoredPair};
