//! Sentence reconstruction and multi-stage classification for AI disclosure
//! analysis
//!
//! This crate classifies free-text sentences extracted from regulatory
//! filings into one of three mutually exclusive categories — `Actionable`,
//! `Speculative`, `Irrelevant` — describing how concretely a firm is
//! deploying, versus merely discussing, a technology.
//!
//! # Architecture
//!
//! - **Domain layer**: fragment repair for pagination-mangled text, a
//!   data-driven rule table, cosine scoring against per-label centroids, and
//!   the decision chain that combines them.
//! - **API layer**: the [`SentenceClassifier`] facade, configuration, and
//!   output records.
//!
//! The embedding model and the centroid vectors are injected collaborators:
//! anything implementing [`EmbeddingProvider`] works, and a [`CentroidSet`]
//! can be loaded from the persisted JSON artifact.
//!
//! # Example
//!
//! ```rust
//! use aiwash_core::{
//!     CentroidSet, ClassLabel, EmbeddingProvider, Result, SentenceClassifier,
//! };
//!
//! // A stand-in for a real sentence-embedding model.
//! struct LexiconEmbedder;
//!
//! impl EmbeddingProvider for LexiconEmbedder {
//!     fn embed(&self, text: &str) -> Result<Vec<f32>> {
//!         Ok(if text.contains("launched") {
//!             vec![1.0, 0.0, 0.0]
//!         } else {
//!             vec![0.0, 0.0, 1.0]
//!         })
//!     }
//! }
//!
//! let centroids = CentroidSet::new(
//!     vec![1.0, 0.0, 0.0],
//!     vec![0.0, 1.0, 0.0],
//!     vec![0.0, 0.0, 1.0],
//! )?;
//! let classifier = SentenceClassifier::new(LexiconEmbedder, centroids)?;
//!
//! let (label, scores) = classifier
//!     .classify("We launched a new generative AI engine for product personalization.")?;
//! assert_eq!(label, ClassLabel::Actionable);
//! assert!(scores.fine_margin >= 0.0);
//! # Ok::<(), aiwash_core::Error>(())
//! ```

pub mod api;
pub mod domain;
pub mod error;

pub use api::{
    defaults, BatchOutput, BatchSummary, ClassLabel, ClassifiedSentence, ClassifierConfig,
    ConfigBuilder, ScoreVector, SentenceClassifier, ERROR_LABEL,
};
pub use domain::{
    cosine_similarity, reconstruct_sentences, CentroidSet, DecisionPolicy, EmbeddingProvider,
    FragmentReconstructor, KeywordFilter, RuleEngine,
};
pub use error::{Error, Result};
