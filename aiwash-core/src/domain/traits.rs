//! Capability traits consumed by the classification engine

use crate::error::Result;
use std::sync::Arc;

/// Maps a sentence to a fixed-length embedding vector.
///
/// The engine treats the embedding computation as a black-box collaborator:
/// implementations may call a local model, a remote service, or a test stub.
/// Implementations are shared read-only across classification calls, so they
/// must be `Send + Sync`; any internal batching or concurrency limiting is
/// the provider's own concern.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a sentence. All sentences must map to vectors of the same
    /// dimensionality as the centroid set the classifier was built with.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

impl<E: EmbeddingProvider + ?Sized> EmbeddingProvider for Arc<E> {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        (**self).embed(text)
    }
}

impl<E: EmbeddingProvider + ?Sized> EmbeddingProvider for &E {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        (**self).embed(text)
    }
}
