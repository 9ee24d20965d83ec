//! Output types for the classification API

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel recorded for sentences whose classification failed
pub const ERROR_LABEL: &str = "ERROR";

/// The three mutually exclusive sentence categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassLabel {
    /// The firm is concretely deploying the technology
    Actionable,
    /// The firm is discussing intent or possibility, not deployment
    Speculative,
    /// Generic mention, boilerplate, or otherwise uninformative
    Irrelevant,
}

impl ClassLabel {
    /// All labels, in argmax precedence order
    pub const ALL: [ClassLabel; 3] = [
        ClassLabel::Actionable,
        ClassLabel::Speculative,
        ClassLabel::Irrelevant,
    ];

    /// Canonical string form, matching the persisted artifact vocabulary
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassLabel::Actionable => "Actionable",
            ClassLabel::Speculative => "Speculative",
            ClassLabel::Irrelevant => "Irrelevant",
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("actionable") => Ok(ClassLabel::Actionable),
            s if s.eq_ignore_ascii_case("speculative") => Ok(ClassLabel::Speculative),
            s if s.eq_ignore_ascii_case("irrelevant") => Ok(ClassLabel::Irrelevant),
            other => Err(Error::Configuration(format!("unknown label: {other:?}"))),
        }
    }
}

/// Per-class similarity scores plus the Actionable/Speculative margin
///
/// A fixed-shape record rather than an open mapping: every consumer sees the
/// same three fields, and `fine_margin` is always present (0.0 on paths where
/// a rule short-circuits before scoring).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreVector {
    /// Similarity to the Actionable centroid
    pub actionable: f32,
    /// Similarity to the Speculative centroid
    pub speculative: f32,
    /// Similarity to the Irrelevant centroid
    pub irrelevant: f32,
    /// |actionable - speculative|, rounded to 3 decimals; 0.0 when a rule
    /// short-circuited before scoring
    pub fine_margin: f32,
}

impl ScoreVector {
    /// Raw similarity scores with no margin recorded yet
    pub fn from_similarities(actionable: f32, speculative: f32, irrelevant: f32) -> Self {
        Self {
            actionable,
            speculative,
            irrelevant,
            fine_margin: 0.0,
        }
    }

    /// Degenerate vector for a rule-forced outcome: 1.0 for the forced label,
    /// 0.0 elsewhere
    pub fn forced(label: ClassLabel) -> Self {
        let mut scores = Self::from_similarities(0.0, 0.0, 0.0);
        scores.set(label, 1.0);
        scores
    }

    /// Score for one label
    pub fn get(&self, label: ClassLabel) -> f32 {
        match label {
            ClassLabel::Actionable => self.actionable,
            ClassLabel::Speculative => self.speculative,
            ClassLabel::Irrelevant => self.irrelevant,
        }
    }

    /// Set the score for one label
    pub fn set(&mut self, label: ClassLabel, value: f32) {
        match label {
            ClassLabel::Actionable => self.actionable = value,
            ClassLabel::Speculative => self.speculative = value,
            ClassLabel::Irrelevant => self.irrelevant = value,
        }
    }

    /// Highest-scoring label, ties resolved in Actionable > Speculative >
    /// Irrelevant order
    pub fn argmax(&self) -> ClassLabel {
        let (a, s, i) = (self.actionable, self.speculative, self.irrelevant);
        if a >= s && a >= i {
            ClassLabel::Actionable
        } else if s >= a && s >= i {
            ClassLabel::Speculative
        } else {
            ClassLabel::Irrelevant
        }
    }

    /// Record the Actionable/Speculative margin, rounded to 3 decimals
    pub fn record_margin(&mut self, margin: f32) {
        self.fine_margin = (margin.abs() * 1000.0).round() / 1000.0;
    }
}

/// One classified sentence in a batch run
///
/// `label`/`scores` are `None` when classification failed for this sentence;
/// the batch continues and the record renders as the [`ERROR_LABEL`] sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedSentence {
    /// The input sentence
    pub sentence: String,
    /// Predicted label, or `None` on per-sentence failure
    pub label: Option<ClassLabel>,
    /// Score record, or `None` on per-sentence failure
    pub scores: Option<ScoreVector>,
}

impl ClassifiedSentence {
    /// Label string as persisted by the external driver
    pub fn label_str(&self) -> &'static str {
        self.label.as_ref().map(ClassLabel::as_str).unwrap_or(ERROR_LABEL)
    }

    /// Whether this sentence failed classification
    pub fn is_error(&self) -> bool {
        self.label.is_none()
    }
}

/// Counts reported at the end of a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Sentences submitted
    pub total: usize,
    /// Sentences that received a label
    pub labeled: usize,
    /// Sentences recorded with the ERROR sentinel
    pub errors: usize,
}

/// Result of classifying a batch of sentences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutput {
    /// One record per input sentence, in input order
    pub records: Vec<ClassifiedSentence>,
    /// Labeled/error counts
    pub summary: BatchSummary,
}

impl BatchOutput {
    pub(crate) fn from_records(records: Vec<ClassifiedSentence>) -> Self {
        let total = records.len();
        let errors = records.iter().filter(|r| r.is_error()).count();
        Self {
            records,
            summary: BatchSummary {
                total,
                labeled: total - errors,
                errors,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_prefers_actionable_on_tie() {
        let scores = ScoreVector::from_similarities(0.4, 0.4, 0.1);
        assert_eq!(scores.argmax(), ClassLabel::Actionable);
    }

    #[test]
    fn argmax_prefers_speculative_over_irrelevant_on_tie() {
        let scores = ScoreVector::from_similarities(0.1, 0.4, 0.4);
        assert_eq!(scores.argmax(), ClassLabel::Speculative);
    }

    #[test]
    fn forced_vector_is_degenerate() {
        let scores = ScoreVector::forced(ClassLabel::Irrelevant);
        assert_eq!(scores.irrelevant, 1.0);
        assert_eq!(scores.actionable, 0.0);
        assert_eq!(scores.speculative, 0.0);
        assert_eq!(scores.fine_margin, 0.0);
    }

    #[test]
    fn margin_is_rounded_and_non_negative() {
        let mut scores = ScoreVector::from_similarities(0.2, 0.3456, 0.0);
        scores.record_margin(0.2 - 0.3456);
        assert_eq!(scores.fine_margin, 0.146);
    }

    #[test]
    fn label_round_trips_through_str() {
        for label in ClassLabel::ALL {
            assert_eq!(label.as_str().parse::<ClassLabel>().unwrap(), label);
        }
        assert!("maybe".parse::<ClassLabel>().is_err());
    }

    #[test]
    fn labeled_record_renders_its_label() {
        let record = ClassifiedSentence {
            sentence: "x".into(),
            label: Some(ClassLabel::Speculative),
            scores: Some(ScoreVector::forced(ClassLabel::Speculative)),
        };
        assert!(!record.is_error());
        assert_eq!(record.label_str(), "Speculative");
    }

    #[test]
    fn error_record_renders_sentinel() {
        let record = ClassifiedSentence {
            sentence: "x".into(),
            label: None,
            scores: None,
        };
        assert!(record.is_error());
        assert_eq!(record.label_str(), ERROR_LABEL);
    }
}
