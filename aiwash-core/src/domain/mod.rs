//! Domain layer: pure text repair, rule evaluation, and scoring logic

pub mod centroids;
pub mod keywords;
pub mod policy;
pub mod reconstruction;
pub mod rules;
pub mod scoring;
pub mod traits;

pub use centroids::CentroidSet;
pub use keywords::KeywordFilter;
pub use policy::DecisionPolicy;
pub use reconstruction::{reconstruct_sentences, FragmentReconstructor, RAW_CONTEXT_WINDOW};
pub use rules::{RuleEngine, RuleRole, ScoreAdjustment};
pub use scoring::{cosine_similarity, score_against_centroids};
pub use traits::EmbeddingProvider;
