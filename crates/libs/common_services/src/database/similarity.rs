use crate::database::embedding::{BoundingBox, EmbeddingSummary};
use crate::database::{DbError, EmbeddingStore, EventStore, rank_matches};
use crate::face::DistanceMetric;
use bon::builder;
use pgvector::Vector;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum SimilarityError {
    #[error("Match limit must be positive, got {0}")]
    InvalidLimit(i64),

    #[error("Probe vector has {actual} dimensions, stored embeddings have {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Event {0} not found")]
    EventNotFound(i64),

    #[error(transparent)]
    Database(#[from] DbError),
}

/// The best matching face of one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub embedding_id: i64,
    pub image_id: i64,
    pub image_path: String,
    pub distance: f64,
    /// Threshold the distance was compared against.
    pub threshold: f64,
    pub bbox: BoundingBox,
    /// The other faces detected in the same image.
    pub other_embeddings: Vec<EmbeddingSummary>,
}

/// Finds the images of an event that contain a face similar to `probe`.
///
/// Returns at most `limit` results, one per image, closest first. An event without
/// embeddings yields an empty list.
#[builder]
pub async fn find_similar(
    #[builder(start_fn)] pool: &PgPool,
    event_id: i64,
    probe: &[f32],
    dimension: usize,
    metric: DistanceMetric,
    threshold: f64,
    limit: i64,
) -> Result<Vec<MatchResult>, SimilarityError> {
    let Ok(max_results) = usize::try_from(limit) else {
        return Err(SimilarityError::InvalidLimit(limit));
    };
    if max_results == 0 {
        return Err(SimilarityError::InvalidLimit(limit));
    }
    if probe.len() != dimension {
        return Err(SimilarityError::DimensionMismatch {
            expected: dimension,
            actual: probe.len(),
        });
    }
    if EventStore::find_by_id(pool, event_id).await?.is_none() {
        return Err(SimilarityError::EventNotFound(event_id));
    }

    let probe = Vector::from(probe.to_vec());
    let candidates =
        EmbeddingStore::find_candidates(pool, event_id, &probe, metric, threshold).await?;
    let candidate_count = candidates.len();
    let ranked = rank_matches(candidates, threshold, max_results);
    debug!(
        event_id,
        candidate_count,
        matches = ranked.len(),
        %metric,
        threshold,
        "Ranked face candidates"
    );
    if ranked.is_empty() {
        return Ok(Vec::new());
    }

    let image_ids: Vec<i64> = ranked.iter().map(|c| c.image_id).collect();
    let mut faces_by_image: HashMap<i64, Vec<EmbeddingSummary>> = HashMap::new();
    for summary in EmbeddingStore::list_by_images(pool, &image_ids).await? {
        faces_by_image
            .entry(summary.image_id)
            .or_default()
            .push(summary);
    }

    Ok(ranked
        .into_iter()
        .map(|candidate| {
            let other_embeddings = faces_by_image
                .get(&candidate.image_id)
                .map(|faces| {
                    faces
                        .iter()
                        .filter(|face| face.id != candidate.embedding_id)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            MatchResult {
                embedding_id: candidate.embedding_id,
                image_id: candidate.image_id,
                image_path: candidate.image_path,
                distance: candidate.distance,
                threshold,
                bbox: candidate.bbox,
                other_embeddings,
            }
        })
        .collect())
}
