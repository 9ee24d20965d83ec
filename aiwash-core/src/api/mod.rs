//! Public API surface
//!
//! Two entry points matter to collaborators: sentence reconstruction
//! ([`crate::domain::reconstruction::reconstruct_sentences`], re-exported at
//! the crate root) feeds the classifier, and [`SentenceClassifier`] assigns
//! labels.

pub mod classifier;
pub mod config;
pub mod output;

pub use classifier::SentenceClassifier;
pub use config::{defaults, ClassifierConfig, ConfigBuilder};
pub use output::{
    BatchOutput, BatchSummary, ClassLabel, ClassifiedSentence, ScoreVector, ERROR_LABEL,
};
