//! MinHash signing over term vectors.
//!
//! Each of the `num_hashes` functions is an affine map
//! `h(x) = (a·(x + 1) + b) mod p` over the Mersenne prime `p = 2^61 − 1`,
//! with `a ∈ [1, p)` and `b ∈ [0, p)` derived deterministically from the
//! configured seed. For `a ≠ 0` the map is a bijection on `[0, p)`, so two
//! different term indices never collide under the same function. The chance
//! that two sets share a minimum approximates their Jaccard similarity.

use rayon::prelude::*;

use crate::config::{PerceptualConfig, PerceptualError};
use crate::signature::Signature;
use crate::vocabulary::TermVector;

/// 2^61 − 1.
pub const MERSENNE_PRIME_61: u64 = (1 << 61) - 1;

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// A fixed family of hash functions, drawn once per run.
///
/// Every document of a run must be signed by the same `MinHasher`; signatures
/// from differently seeded hashers are not comparable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinHasher {
    coefficients: Vec<(u64, u64)>,
    use_parallel: bool,
}

impl MinHasher {
    pub fn new(cfg: &PerceptualConfig) -> Result<Self, PerceptualError> {
        cfg.validate()?;
        let coefficients = (0..cfg.num_hashes)
            .map(|j| coefficients_for(cfg.seed, j))
            .collect();
        Ok(Self {
            coefficients,
            use_parallel: cfg.use_parallel,
        })
    }

    pub fn num_hashes(&self) -> usize {
        self.coefficients.len()
    }

    pub fn use_parallel(&self) -> bool {
        self.use_parallel
    }

    /// Signature of one document.
    ///
    /// Fails with [`PerceptualError::EmptySet`] on an empty vector. The call is
    /// deterministic: the same vector always yields the same signature.
    pub fn sign(&self, terms: &TermVector) -> Result<Signature, PerceptualError> {
        if terms.is_empty() {
            return Err(PerceptualError::EmptySet);
        }
        let values = self
            .coefficients
            .iter()
            .map(|&(a, b)| min_slot(terms.indices(), a, b))
            .collect();
        Ok(Signature::new(values))
    }

    /// Sign a batch of documents, in parallel when configured.
    ///
    /// Output order matches input order. The first empty vector aborts the
    /// whole batch.
    pub fn sign_all(&self, vectors: &[TermVector]) -> Result<Vec<Signature>, PerceptualError> {
        if self.use_parallel {
            vectors.par_iter().map(|tv| self.sign(tv)).collect()
        } else {
            vectors.iter().map(|tv| self.sign(tv)).collect()
        }
    }
}

/// Minimum of one affine hash over all indices of a document.
#[inline]
pub(crate) fn min_slot(indices: &[u32], a: u64, b: u64) -> u64 {
    let mut minv = u64::MAX;
    for &idx in indices {
        let h = affine_hash(idx, a, b);
        if h < minv {
            minv = h;
        }
    }
    minv
}

#[inline]
pub(crate) fn affine_hash(x: u32, a: u64, b: u64) -> u64 {
    let p = MERSENNE_PRIME_61 as u128;
    ((a as u128 * (x as u128 + 1) + b as u128) % p) as u64
}

/// Coefficients `(a, b)` of the `j`-th function.
pub(crate) fn coefficients_for(seed: u64, j: usize) -> (u64, u64) {
    let step = (j as u64).wrapping_mul(2).wrapping_mul(GOLDEN_GAMMA);
    let a = 1 + splitmix64(seed.wrapping_add(step)) % (MERSENNE_PRIME_61 - 1);
    let b = splitmix64(seed.wrapping_add(step).wrapping_add(GOLDEN_GAMMA)) % MERSENNE_PRIME_61;
    (a, b)
}

/// A 64-bit hash function that is fast and has good distribution.
#[inline]
pub(crate) fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(GOLDEN_GAMMA);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn hasher(num_hashes: usize, seed: u64) -> MinHasher {
        MinHasher::new(&PerceptualConfig::new().with_num_hashes(num_hashes).with_seed(seed))
            .expect("valid config")
    }

    fn tv(indices: &[u32]) -> TermVector {
        TermVector::from_indices(indices.to_vec())
    }

    fn agreement(a: &Signature, b: &Signature) -> f64 {
        a.agreement(b) as f64 / a.len() as f64
    }

    // ==================== Signing ====================

    #[test]
    fn sign_empty_vector_fails() {
        let h = hasher(16, 1);
        assert_eq!(h.sign(&TermVector::default()), Err(PerceptualError::EmptySet));
    }

    #[test]
    fn signature_length_equals_num_hashes() {
        for m in [1, 2, 16, 64, 256] {
            let sig = hasher(m, 1).sign(&tv(&[1, 2, 3])).unwrap();
            assert_eq!(sig.len(), m, "signature length should be {m}");
        }
    }

    #[test]
    fn signing_is_deterministic() {
        let h = hasher(64, 42);
        let v = tv(&[3, 9, 27, 81]);
        assert_eq!(h.sign(&v).unwrap(), h.sign(&v).unwrap());
        assert_eq!(hasher(64, 42).sign(&v).unwrap(), h.sign(&v).unwrap());
    }

    #[test]
    fn different_seeds_produce_different_signatures() {
        let v = tv(&[1, 2, 3, 4, 5]);
        assert_ne!(hasher(16, 1).sign(&v).unwrap(), hasher(16, 2).sign(&v).unwrap());
    }

    #[test]
    fn identical_sets_produce_identical_signatures() {
        let h = hasher(256, 7);
        let a = h.sign(&tv(&[10, 20, 30])).unwrap();
        let b = h.sign(&tv(&[30, 20, 10, 10])).unwrap();
        assert_eq!(a, b);
        assert!(1.0 - agreement(&a, &b) < 0.05);
    }

    #[test]
    fn disjoint_sets_never_agree() {
        let h = hasher(256, 7);
        let a = h.sign(&tv(&[0, 1, 2])).unwrap();
        let b = h.sign(&tv(&[3, 4, 5])).unwrap();
        assert_eq!(a.agreement(&b), 0);
    }

    #[test]
    fn agreement_estimates_jaccard() {
        // |A ∩ B| = 50, |A ∪ B| = 150 → J = 1/3
        let universe: Vec<u32> = (0..150u64)
            .map(|i| (splitmix64(i) % 1_000_000_007) as u32)
            .collect();
        assert_eq!(universe.iter().collect::<HashSet<_>>().len(), 150);
        let h = hasher(1024, 0xDEC0_DE);
        let a = h.sign(&tv(&universe[..100])).unwrap();
        let b = h.sign(&tv(&universe[50..])).unwrap();
        let est = agreement(&a, &b);
        assert!((est - 1.0 / 3.0).abs() < 0.1, "estimate {est} too far from 1/3");
    }

    #[test]
    fn sign_all_parallel_equals_sequential() {
        let vectors: Vec<TermVector> = (0..64u32)
            .map(|i| tv(&[i, i + 1, i * 3 + 2, 500 - i]))
            .collect();
        let par = MinHasher::new(&PerceptualConfig::new().with_parallel(true)).unwrap();
        let seq = MinHasher::new(&PerceptualConfig::new().with_parallel(false)).unwrap();
        assert_eq!(par.sign_all(&vectors).unwrap(), seq.sign_all(&vectors).unwrap());
    }

    #[test]
    fn sign_all_aborts_on_empty_vector() {
        let vectors = vec![tv(&[1]), TermVector::default(), tv(&[2])];
        assert_eq!(hasher(8, 1).sign_all(&vectors), Err(PerceptualError::EmptySet));
    }

    #[test]
    fn zero_hashes_rejected() {
        let cfg = PerceptualConfig::new().with_num_hashes(0);
        assert!(matches!(
            MinHasher::new(&cfg),
            Err(PerceptualError::InvalidConfigNumHashes { num_hashes: 0 })
        ));
    }

    // ==================== Hash family ====================

    #[test]
    fn coefficients_are_in_range() {
        for j in 0..1000 {
            let (a, b) = coefficients_for(0xF00D, j);
            assert!(a >= 1 && a < MERSENNE_PRIME_61);
            assert!(b < MERSENNE_PRIME_61);
        }
    }

    #[test]
    fn coefficients_differ_per_function() {
        let pairs: HashSet<(u64, u64)> = (0..256).map(|j| coefficients_for(1, j)).collect();
        assert_eq!(pairs.len(), 256);
    }

    #[test]
    fn affine_hash_is_injective_on_small_domain() {
        let (a, b) = coefficients_for(99, 3);
        let values: HashSet<u64> = (0..10_000u32).map(|x| affine_hash(x, a, b)).collect();
        assert_eq!(values.len(), 10_000);
    }

    #[test]
    fn affine_hash_stays_below_prime() {
        let h = affine_hash(u32::MAX, MERSENNE_PRIME_61 - 1, MERSENNE_PRIME_61 - 1);
        assert!(h < MERSENNE_PRIME_61);
    }

    #[test]
    fn min_slot_picks_minimum() {
        let (a, b) = coefficients_for(5, 0);
        let indices = [4u32, 8, 15, 16, 23, 42];
        let expected = indices.iter().map(|&x| affine_hash(x, a, b)).min().unwrap();
        assert_eq!(min_slot(&indices, a, b), expected);
    }

    #[test]
    fn splitmix64_avalanche_effect() {
        let diff_bits = (splitmix64(1000) ^ splitmix64(1001)).count_ones();
        assert!(diff_bits > 16, "splitmix64 should exhibit avalanche effect");
    }
}
