use super::interfaces::MatchResult;
use crate::api::matching::error::MatchError;
use crate::database::embedding_store::EmbeddingStore;
use crate::database::find_similar;
use crate::face::{FaceConfig, FaceEmbedder, ThresholdTable};
use sqlx::PgPool;
use tracing::{info, instrument};

/// Runs the similarity search for one probe vector with the configured model and limit.
async fn search(
    pool: &PgPool,
    thresholds: &ThresholdTable,
    config: &FaceConfig,
    event_id: i64,
    probe: &[f32],
) -> Result<Vec<MatchResult>, MatchError> {
    let threshold = thresholds
        .resolve(&config.model, config.metric)
        .map_err(|e| MatchError::Internal(e.into()))?;

    Ok(find_similar(pool)
        .event_id(event_id)
        .probe(probe)
        .dimension(config.dimension)
        .metric(config.metric)
        .threshold(threshold)
        .limit(config.match_limit)
        .call()
        .await?)
}

/// Finds the photos of an event that show the person in `photo`.
///
/// Only the first face detected in `photo` is searched for.
#[instrument(skip(pool, embedder, thresholds, config, photo), fields(bytes = photo.len()))]
pub async fn match_photo(
    pool: &PgPool,
    embedder: &dyn FaceEmbedder,
    thresholds: &ThresholdTable,
    config: &FaceConfig,
    event_id: i64,
    photo: &[u8],
) -> Result<Vec<MatchResult>, MatchError> {
    if photo.is_empty() {
        return Err(MatchError::InvalidInput("query photo is empty".into()));
    }
    let faces = embedder.embed_faces(photo).await?;
    let Some(probe) = faces.into_iter().next() else {
        return Err(MatchError::NoFaceDetected);
    };

    let matches = search(pool, thresholds, config, event_id, &probe.vector).await?;
    info!("Found {} matching photos in event {}", matches.len(), event_id);
    Ok(matches)
}

/// Finds the photos of an event that show the person of a stored face.
#[instrument(skip(pool, thresholds, config))]
pub async fn match_embedding(
    pool: &PgPool,
    thresholds: &ThresholdTable,
    config: &FaceConfig,
    event_id: i64,
    embedding_id: i64,
) -> Result<Vec<MatchResult>, MatchError> {
    let embedding = EmbeddingStore::find_by_id(pool, embedding_id)
        .await?
        .ok_or_else(|| MatchError::NotFound(format!("Embedding {embedding_id}")))?;

    search(pool, thresholds, config, event_id, embedding.vector.as_slice()).await
}
