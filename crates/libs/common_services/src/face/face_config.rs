use crate::face::{DistanceMetric, ThresholdError, ThresholdTable};
use app_state::FaceSettings;

/// Model, metric and limits shared by uploads and match queries.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceConfig {
    pub model: String,
    pub metric: DistanceMetric,
    /// Length of every embedding vector.
    pub dimension: usize,
    /// Number of results a match query returns at most.
    pub match_limit: i64,
}

impl FaceConfig {
    /// Reads the face settings and checks that `thresholds` knows the configured pair.
    pub fn from_settings(
        settings: &FaceSettings,
        thresholds: &ThresholdTable,
    ) -> Result<Self, ThresholdError> {
        let metric: DistanceMetric = settings.metric.parse()?;
        thresholds.resolve(&settings.model, metric)?;
        Ok(Self {
            model: settings.model.clone(),
            metric,
            dimension: settings.dimension,
            match_limit: settings.match_limit,
        })
    }
}
