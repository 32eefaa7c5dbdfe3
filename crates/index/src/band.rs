//! Band keys.
//!
//! A signature of `b * r` values is cut into `b` contiguous bands of `r`
//! rows. Each band is reduced to one 64-bit key with xxh3, seeded by the band
//! position. Two documents that agree on every row of a band get the same key
//! for that band; different rows collide only with xxh3's collision
//! probability, and such collisions cost one extra scored pair, never a lost
//! one.

use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Key of one band.
#[inline]
pub fn band_key(band_index: usize, rows: &[u64]) -> u64 {
    let mut bytes = Vec::with_capacity(rows.len() * 8);
    for v in rows {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    xxh3_64_with_seed(&bytes, band_index as u64)
}

/// Keys of every band of `signature`, in band order.
///
/// `rows_per_band` must divide `signature.len()`; [`crate::BandConfig`]
/// validation guarantees this inside the crate.
pub fn band_keys(signature: &[u64], rows_per_band: usize) -> Vec<u64> {
    signature
        .chunks_exact(rows_per_band)
        .enumerate()
        .map(|(i, rows)| band_key(i, rows))
        .collect()
}
