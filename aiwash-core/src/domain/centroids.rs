//! Immutable per-label centroid vectors

use crate::api::output::ClassLabel;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// One reference vector per class label, loaded once per process and shared
/// read-only across all classification calls.
///
/// Construction validates completeness and dimensional consistency, so a
/// `CentroidSet` value is always safe to score against.
#[derive(Debug, Clone, PartialEq)]
pub struct CentroidSet {
    dimension: usize,
    actionable: Vec<f32>,
    speculative: Vec<f32>,
    irrelevant: Vec<f32>,
}

impl CentroidSet {
    /// Build a centroid set from one vector per label.
    pub fn new(
        actionable: Vec<f32>,
        speculative: Vec<f32>,
        irrelevant: Vec<f32>,
    ) -> Result<Self> {
        let dimension = actionable.len();
        if dimension == 0 {
            return Err(Error::Configuration(
                "centroid vectors must be non-empty".into(),
            ));
        }
        if speculative.len() != dimension || irrelevant.len() != dimension {
            return Err(Error::Configuration(format!(
                "centroid dimensions differ: Actionable={}, Speculative={}, Irrelevant={}",
                dimension,
                speculative.len(),
                irrelevant.len()
            )));
        }
        Ok(Self {
            dimension,
            actionable,
            speculative,
            irrelevant,
        })
    }

    /// Parse the persisted centroid artifact: a JSON object mapping label
    /// names to vectors.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, Vec<f32>> = serde_json::from_str(json)
            .map_err(|e| Error::Configuration(format!("invalid centroid JSON: {e}")))?;

        let mut vectors: [Option<Vec<f32>>; 3] = [None, None, None];
        for (name, vector) in raw {
            let label: ClassLabel = name.parse()?;
            let slot = ClassLabel::ALL.iter().position(|l| *l == label);
            if let Some(slot) = slot {
                vectors[slot] = Some(vector);
            }
        }

        let mut take = |label: ClassLabel, slot: usize| -> Result<Vec<f32>> {
            vectors[slot]
                .take()
                .ok_or_else(|| Error::Configuration(format!("missing centroid for {label}")))
        };
        let actionable = take(ClassLabel::Actionable, 0)?;
        let speculative = take(ClassLabel::Speculative, 1)?;
        let irrelevant = take(ClassLabel::Irrelevant, 2)?;

        Self::new(actionable, speculative, irrelevant)
    }

    /// Load a centroid set from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Dimensionality shared by all three centroids
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Centroid vector for one label
    pub fn get(&self, label: ClassLabel) -> &[f32] {
        match label {
            ClassLabel::Actionable => &self.actionable,
            ClassLabel::Speculative => &self.speculative,
            ClassLabel::Irrelevant => &self.irrelevant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_label_keyed_json() {
        let set = CentroidSet::from_json_str(
            r#"{"Actionable": [1.0, 0.0], "Speculative": [0.0, 1.0], "Irrelevant": [0.5, 0.5]}"#,
        )
        .unwrap();
        assert_eq!(set.dimension(), 2);
        assert_eq!(set.get(ClassLabel::Speculative), &[0.0, 1.0]);
    }

    #[test]
    fn rejects_missing_label() {
        let err = CentroidSet::from_json_str(r#"{"Actionable": [1.0], "Speculative": [0.0]}"#)
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn rejects_dimension_mismatch() {
        let err = CentroidSet::new(vec![1.0, 0.0], vec![0.0], vec![0.0, 1.0]).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn rejects_empty_vectors() {
        let err = CentroidSet::new(vec![], vec![], vec![]).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn rejects_unknown_label_key() {
        let err = CentroidSet::from_json_str(r#"{"Unsure": [1.0]}"#).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
