// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding seam: the trait the classifier is built against, plus the
//! vector math shared by catalog indexing and query-time scoring.
//!
//! The trait is synchronous: embedding is CPU-bound and `classify()` is a
//! blocking call by contract. Async callers offload the whole classification
//! to a worker pool rather than awaiting individual embeddings.

use crate::error::SahayakError;

/// Turns arbitrary text into a fixed-dimensionality real vector.
///
/// Implementations must be deterministic for a given text and model version.
/// Returned vectors are NOT pre-normalized; callers normalize before any
/// similarity comparison.
pub trait TextEmbedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, SahayakError>;

    /// Dimensionality of vectors produced by [`TextEmbedder::embed`].
    fn dimensions(&self) -> usize;
}

/// L2-normalize a vector. Zero vectors are returned unchanged.
pub fn l2_normalize(vec: &[f32]) -> Vec<f32> {
    let norm: f32 = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        vec.iter().map(|v| v / norm).collect()
    } else {
        vec.to_vec()
    }
}

/// Cosine similarity between two vectors.
///
/// For L2-normalized vectors this is the plain dot product, in [-1, 1].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "vectors must have same length");
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
