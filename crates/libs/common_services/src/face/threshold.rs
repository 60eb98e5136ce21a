use crate::face::{DistanceMetric, UnknownMetric};
use app_state::ThresholdOverride;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ThresholdError {
    #[error(transparent)]
    UnknownMetric(#[from] UnknownMetric),

    #[error("No threshold calibrated for model '{model}' with metric {metric}")]
    UnknownPair {
        model: String,
        metric: DistanceMetric,
    },

    #[error("Threshold for model '{model}' must be a finite non-negative number, got {threshold}")]
    InvalidThreshold { model: String, threshold: f64 },
}

/// Calibrated `(model, metric, threshold)` values of the supported embedding models.
const CALIBRATED: &[(&str, DistanceMetric, f64)] = &[
    ("VGG-Face", DistanceMetric::Cosine, 0.68),
    ("VGG-Face", DistanceMetric::Euclidean, 1.17),
    ("VGG-Face", DistanceMetric::EuclideanL2, 1.17),
    ("Facenet", DistanceMetric::Cosine, 0.40),
    ("Facenet", DistanceMetric::Euclidean, 10.0),
    ("Facenet", DistanceMetric::EuclideanL2, 0.80),
    ("Facenet512", DistanceMetric::Cosine, 0.30),
    ("Facenet512", DistanceMetric::Euclidean, 23.56),
    ("Facenet512", DistanceMetric::EuclideanL2, 1.04),
    ("ArcFace", DistanceMetric::Cosine, 0.68),
    ("ArcFace", DistanceMetric::Euclidean, 4.15),
    ("ArcFace", DistanceMetric::EuclideanL2, 1.13),
    ("Dlib", DistanceMetric::Cosine, 0.07),
    ("Dlib", DistanceMetric::Euclidean, 0.6),
    ("Dlib", DistanceMetric::EuclideanL2, 0.4),
    ("SFace", DistanceMetric::Cosine, 0.593),
    ("SFace", DistanceMetric::Euclidean, 10.734),
    ("SFace", DistanceMetric::EuclideanL2, 1.055),
    ("OpenFace", DistanceMetric::Cosine, 0.10),
    ("OpenFace", DistanceMetric::Euclidean, 0.55),
    ("OpenFace", DistanceMetric::EuclideanL2, 0.55),
    ("DeepFace", DistanceMetric::Cosine, 0.23),
    ("DeepFace", DistanceMetric::Euclidean, 64.0),
    ("DeepFace", DistanceMetric::EuclideanL2, 0.64),
    ("DeepID", DistanceMetric::Cosine, 0.015),
    ("DeepID", DistanceMetric::Euclidean, 45.0),
    ("DeepID", DistanceMetric::EuclideanL2, 0.17),
    ("GhostFaceNet", DistanceMetric::Cosine, 0.65),
    ("GhostFaceNet", DistanceMetric::Euclidean, 35.71),
    ("GhostFaceNet", DistanceMetric::EuclideanL2, 1.10),
];

/// Maximum distance at which two faces count as the same person, per model and metric.
///
/// Model names are compared case-insensitively.
#[derive(Debug, Clone)]
pub struct ThresholdTable {
    thresholds: HashMap<(String, DistanceMetric), f64>,
}

fn model_key(model: &str) -> String {
    model.trim().to_ascii_lowercase()
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::calibrated()
    }
}

impl ThresholdTable {
    /// The built-in calibration table.
    #[must_use]
    pub fn calibrated() -> Self {
        let thresholds = CALIBRATED
            .iter()
            .map(|(model, metric, threshold)| ((model_key(model), *metric), *threshold))
            .collect();
        Self { thresholds }
    }

    /// The built-in table with `overrides` applied on top.
    pub fn with_overrides(overrides: &[ThresholdOverride]) -> Result<Self, ThresholdError> {
        let mut table = Self::calibrated();
        for entry in overrides {
            let metric: DistanceMetric = entry.metric.parse()?;
            table.insert(&entry.model, metric, entry.threshold)?;
        }
        Ok(table)
    }

    pub fn insert(
        &mut self,
        model: &str,
        metric: DistanceMetric,
        threshold: f64,
    ) -> Result<(), ThresholdError> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ThresholdError::InvalidThreshold {
                model: model.to_owned(),
                threshold,
            });
        }
        self.thresholds.insert((model_key(model), metric), threshold);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, model: &str, metric: DistanceMetric) -> Option<f64> {
        self.thresholds.get(&(model_key(model), metric)).copied()
    }

    pub fn resolve(&self, model: &str, metric: DistanceMetric) -> Result<f64, ThresholdError> {
        self.get(model, metric)
            .ok_or_else(|| ThresholdError::UnknownPair {
                model: model.to_owned(),
                metric,
            })
    }
}
