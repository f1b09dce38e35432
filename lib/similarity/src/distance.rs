//! Cosine-similarity comparator
//!
//! Compares two feature vectors by flattening them into scalar sequences and
//! computing exact floating-point cosine similarity. Sequences of different
//! lengths are zero-padded so that vectors produced by different schema
//! revisions still compare gracefully.

use crate::features::FeatureVector;

/// Cosine similarity between two feature vectors, in `[-1, 1]`.
///
/// Returns exactly `0.0` when either vector has zero magnitude. Commutative
/// and bit-for-bit reproducible for identical inputs.
#[must_use]
pub fn cosine_similarity(a: &FeatureVector, b: &FeatureVector) -> f64 {
    cosine_similarity_flat(&a.flatten(), &b.flatten())
}

/// Cosine similarity between two flat scalar sequences.
///
/// The shorter sequence is treated as zero-padded up to the longer one's
/// length.
#[must_use]
pub fn cosine_similarity_flat(a: &[f64], b: &[f64]) -> f64 {
    let len = a.len().max(b.len());
    let mut dot = 0.0;
    let mut magnitude_a = 0.0;
    let mut magnitude_b = 0.0;

    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0.0);
        let y = b.get(i).copied().unwrap_or(0.0);
        dot += x * y;
        magnitude_a += x * x;
        magnitude_b += y * y;
    }

    let magnitude_a = magnitude_a.sqrt();
    let magnitude_b = magnitude_b.sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot / (magnitude_a * magnitude_b)
}
