//! The decision chain that assigns a final label
//!
//! A short, strictly ordered guard chain: each stage either returns a final
//! `(label, scores)` pair or falls through to the next. Rule checks run
//! before the embedding is ever computed, so obviously-gated sentences never
//! pay for an embedding call.

use crate::api::config::ClassifierConfig;
use crate::api::output::{ClassLabel, ScoreVector};
use crate::domain::centroids::CentroidSet;
use crate::domain::rules::RuleEngine;
use crate::domain::scoring::score_against_centroids;
use crate::domain::traits::EmbeddingProvider;
use crate::error::Result;
use tracing::debug;

/// Orchestrates the rule engine, the centroid scorer, and the margin
/// tie-break into one total classification function.
#[derive(Debug)]
pub struct DecisionPolicy {
    rules: RuleEngine,
    config: ClassifierConfig,
}

impl DecisionPolicy {
    /// Create a policy with a validated configuration.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rules: RuleEngine::new(),
            config,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// The rule engine evaluated by this policy
    pub fn rules(&self) -> &RuleEngine {
        &self.rules
    }

    /// Classify one sentence.
    ///
    /// Total over non-empty input: every sentence receives exactly one label.
    /// The only propagated failure modes are a configuration error from the
    /// centroid scorer and an embedding-provider failure.
    pub fn decide<E: EmbeddingProvider + ?Sized>(
        &self,
        sentence: &str,
        embedder: &E,
        centroids: &CentroidSet,
    ) -> Result<(ClassLabel, ScoreVector)> {
        // 1. Explicit future/intent language with no strong action cue
        if self.rules.forces_speculative(sentence) && !self.rules.has_action_verb(sentence) {
            debug!(stage = "forced_speculative", sentence);
            return Ok((
                ClassLabel::Speculative,
                ScoreVector::forced(ClassLabel::Speculative),
            ));
        }

        // 2. Too short for rule gating: raw centroid argmax
        let tokens = sentence.split_whitespace().count();
        if tokens < self.config.min_tokens {
            let scores = self.centroid_scores(sentence, embedder, centroids)?;
            debug!(stage = "short_fallback", tokens, sentence);
            return Ok((scores.argmax(), scores));
        }

        // 3. Early Irrelevant gate (overrides already handled by the engine)
        if self.config.two_stage && self.rules.gates_irrelevant(sentence) {
            debug!(stage = "irrelevant_gate", sentence);
            return Ok((
                ClassLabel::Irrelevant,
                ScoreVector::forced(ClassLabel::Irrelevant),
            ));
        }

        // 4. Ops-risk phrasing with no future/intent language
        if self.rules.forces_actionable(sentence) {
            debug!(stage = "forced_actionable", sentence);
            return Ok((
                ClassLabel::Actionable,
                ScoreVector::forced(ClassLabel::Actionable),
            ));
        }

        // 5. Centroid pass, plus ordered rule boosts
        let mut scores = self.centroid_scores(sentence, embedder, centroids)?;
        if self.config.rule_boosts {
            scores = self.rules.adjust_scores(sentence, scores);
        }

        // 6. Margin/epsilon tie-break
        let (a, s, i) = (scores.actionable, scores.speculative, scores.irrelevant);
        let margin = (a - s).abs();
        let label = if self.config.two_stage
            && (i - a.max(s)).abs() < self.config.eps_irr
            && i >= 0.5
        {
            ClassLabel::Irrelevant
        } else if margin < self.config.tau {
            if self.rules.forces_speculative(sentence) {
                ClassLabel::Speculative
            } else if a >= s {
                ClassLabel::Actionable
            } else {
                ClassLabel::Speculative
            }
        } else {
            scores.argmax()
        };

        // 7. The A/S margin is recorded on every scored path
        scores.record_margin(margin);
        debug!(stage = "scored", %label, margin, sentence);
        Ok((label, scores))
    }

    fn centroid_scores<E: EmbeddingProvider + ?Sized>(
        &self,
        sentence: &str,
        embedder: &E,
        centroids: &CentroidSet,
    ) -> Result<ScoreVector> {
        let embedding = embedder.embed(sentence)?;
        score_against_centroids(&embedding, centroids)
    }
}
