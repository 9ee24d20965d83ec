//! Embedding-vs-centroid similarity scoring
//!
//! The scorer itself has no branching logic: it computes one cosine
//! similarity per label and leaves all interpretation to the decision
//! policy.

use crate::api::output::{ClassLabel, ScoreVector};
use crate::domain::centroids::CentroidSet;
use crate::error::{Error, Result};

/// Cosine similarity between two vectors of equal length.
///
/// Returns 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Score a sentence embedding against each label centroid.
///
/// Fails with a configuration error when the embedding dimensionality does
/// not match the centroid set; that mismatch means the wrong model or the
/// wrong centroid artifact is loaded and the run must stop.
pub fn score_against_centroids(embedding: &[f32], centroids: &CentroidSet) -> Result<ScoreVector> {
    if embedding.is_empty() {
        return Err(Error::Embedding("provider returned an empty vector".into()));
    }
    if embedding.len() != centroids.dimension() {
        return Err(Error::Configuration(format!(
            "embedding dimension {} does not match centroid dimension {}",
            embedding.len(),
            centroids.dimension()
        )));
    }

    Ok(ScoreVector::from_similarities(
        cosine_similarity(embedding, centroids.get(ClassLabel::Actionable)),
        cosine_similarity(embedding, centroids.get(ClassLabel::Speculative)),
        cosine_similarity(embedding, centroids.get(ClassLabel::Irrelevant)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis_centroids() -> CentroidSet {
        CentroidSet::new(
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn parallel_vectors_score_one() {
        assert!((cosine_similarity(&[2.0, 0.0], &[5.0, 0.0]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 3.0]), 0.0);
    }

    #[test]
    fn zero_vector_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn scores_each_label() {
        let scores = score_against_centroids(&[0.0, 2.0, 0.0], &axis_centroids()).unwrap();
        assert_eq!(scores.actionable, 0.0);
        assert!((scores.speculative - 1.0).abs() < 1e-6);
        assert_eq!(scores.irrelevant, 0.0);
        assert_eq!(scores.fine_margin, 0.0);
    }

    #[test]
    fn dimension_mismatch_is_configuration_error() {
        let err = score_against_centroids(&[1.0, 0.0], &axis_centroids()).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn empty_embedding_is_embedding_error() {
        let err = score_against_centroids(&[], &axis_centroids()).unwrap_err();
        assert!(!err.is_fatal());
    }
}
