//! Main classifier facade

use crate::api::config::ClassifierConfig;
use crate::api::output::{BatchOutput, ClassLabel, ClassifiedSentence, ScoreVector};
use crate::domain::centroids::CentroidSet;
use crate::domain::policy::DecisionPolicy;
use crate::domain::traits::EmbeddingProvider;
use crate::error::Result;
use std::fmt;
use tracing::warn;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Sentence classifier with injected collaborators
///
/// The embedding provider and centroid set are supplied once at construction
/// and shared read-only across all classification calls, so one classifier
/// instance can serve many sentences (and, with the `parallel` feature, many
/// threads) without locking.
pub struct SentenceClassifier<E: EmbeddingProvider> {
    embedder: E,
    centroids: CentroidSet,
    policy: DecisionPolicy,
}

// Manual impl: embedding providers are opaque collaborators and need not be
// Debug themselves.
impl<E: EmbeddingProvider> fmt::Debug for SentenceClassifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentenceClassifier")
            .field("centroids", &self.centroids)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<E: EmbeddingProvider> SentenceClassifier<E> {
    /// Create a classifier with the default configuration.
    pub fn new(embedder: E, centroids: CentroidSet) -> Result<Self> {
        Self::with_config(embedder, centroids, ClassifierConfig::default())
    }

    /// Create a classifier with a custom configuration.
    ///
    /// Fails fast on invalid tunables; centroid consistency was already
    /// enforced when the [`CentroidSet`] was built.
    pub fn with_config(
        embedder: E,
        centroids: CentroidSet,
        config: ClassifierConfig,
    ) -> Result<Self> {
        Ok(Self {
            embedder,
            centroids,
            policy: DecisionPolicy::new(config)?,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &ClassifierConfig {
        self.policy.config()
    }

    /// Classify one sentence.
    ///
    /// Deterministic: the same sentence, configuration, and centroid set
    /// always produce the same output.
    pub fn classify(&self, sentence: &str) -> Result<(ClassLabel, ScoreVector)> {
        self.policy.decide(sentence, &self.embedder, &self.centroids)
    }

    /// Classify a batch of sentences with per-sentence failure isolation.
    ///
    /// A failure while scoring one sentence records that sentence with the
    /// ERROR sentinel and continues; only a configuration error (which would
    /// mislabel every remaining sentence too) aborts the batch. Records come
    /// back in input order.
    pub fn classify_batch<S: AsRef<str> + Sync>(&self, sentences: &[S]) -> Result<BatchOutput> {
        #[cfg(feature = "parallel")]
        let iter = sentences.par_iter();
        #[cfg(not(feature = "parallel"))]
        let iter = sentences.iter();

        let records = iter
            .map(|sentence| self.classify_record(sentence.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(BatchOutput::from_records(records))
    }

    fn classify_record(&self, sentence: &str) -> Result<ClassifiedSentence> {
        match self.classify(sentence) {
            Ok((label, scores)) => Ok(ClassifiedSentence {
                sentence: sentence.to_string(),
                label: Some(label),
                scores: Some(scores),
            }),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                warn!(%err, sentence, "sentence classification failed; recording ERROR");
                Ok(ClassifiedSentence {
                    sentence: sentence.to_string(),
                    label: None,
                    scores: None,
                })
            }
        }
    }
}
