use super::interfaces::{ImageResponse, PhotoUpload};
use crate::api::image::error::ImageError;
use crate::database::embedding::EmbeddingSummary;
use crate::database::image::Image;
use crate::database::embedding_store::EmbeddingStore;
use crate::database::event_store::EventStore;
use crate::database::image_store::ImageStore;
use crate::face::{DetectedFace, FaceConfig, FaceEmbedder};
use crate::lifecycle;
use crate::storage::ImageStorage;
use pgvector::Vector;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::{info, instrument, warn};
use uuid::Uuid;

fn check_dimensions(faces: &[DetectedFace], dimension: usize) -> Result<(), ImageError> {
    if let Some(face) = faces.iter().find(|face| face.vector.len() != dimension) {
        return Err(ImageError::InvalidInput(format!(
            "face embedding has {} dimensions, expected {dimension}",
            face.vector.len()
        )));
    }
    Ok(())
}

async fn existing_image(
    pool: &PgPool,
    image: Image,
    event_id: i64,
) -> Result<ImageResponse, ImageError> {
    if image.event_id != event_id {
        info!(
            "Photo {} already belongs to event {}, keeping it there",
            image.path, image.event_id
        );
    }
    let embeddings = EmbeddingStore::list_by_image(pool, image.id).await?;
    Ok(ImageResponse::new(image, embeddings))
}

/// Stores a photo in an event owned by `owner_id` and records the faces found in it.
///
/// Uploading a file name that is already stored returns the existing image unchanged. It
/// stays in the event it was first uploaded to and its file is not replaced.
#[instrument(skip(pool, storage, embedder, upload), fields(file_name = %upload.file_name))]
pub async fn upload_image(
    pool: &PgPool,
    storage: &ImageStorage,
    embedder: &dyn FaceEmbedder,
    config: &FaceConfig,
    event_id: i64,
    owner_id: Uuid,
    upload: &PhotoUpload,
) -> Result<ImageResponse, ImageError> {
    if upload.bytes.is_empty() {
        return Err(ImageError::InvalidInput("uploaded photo is empty".into()));
    }
    if EventStore::find_owned(pool, event_id, owner_id)
        .await?
        .is_none()
    {
        return Err(ImageError::NotFound(format!("Event {event_id}")));
    }

    let path = ImageStorage::stored_name(&upload.file_name)?;
    if let Some(image) = ImageStore::find_by_path(pool, &path).await? {
        return existing_image(pool, image, event_id).await;
    }

    // No transaction is open while the face provider runs.
    let faces = embedder.embed_faces(&upload.bytes).await?;
    check_dimensions(&faces, config.dimension)?;

    let mut tx = pool.begin().await?;
    let (image, created) = ImageStore::get_or_create(&mut *tx, &path, event_id).await?;
    if !created {
        // A concurrent upload of the same file name won.
        tx.rollback().await?;
        return existing_image(pool, image, event_id).await;
    }
    let mut embeddings = Vec::with_capacity(faces.len());
    for face in &faces {
        let vector = Vector::from(face.vector.clone());
        embeddings.push(EmbeddingStore::create(&mut *tx, image.id, face.bbox, &vector).await?);
    }
    storage.save(&path, &upload.bytes).await?;
    tx.commit().await?;

    info!(
        "Stored photo {} in event {} with {} faces",
        image.path,
        image.event_id,
        embeddings.len()
    );
    Ok(ImageResponse::new(image, embeddings))
}

/// Lists the photos of an event with their faces.
#[instrument(skip(pool))]
pub async fn list_images(pool: &PgPool, event_id: i64) -> Result<Vec<ImageResponse>, ImageError> {
    if EventStore::find_by_id(pool, event_id).await?.is_none() {
        return Err(ImageError::NotFound(format!("Event {event_id}")));
    }

    let images = ImageStore::list_by_event(pool, event_id).await?;
    let image_ids: Vec<i64> = images.iter().map(|image| image.id).collect();
    let mut faces_by_image: HashMap<i64, Vec<EmbeddingSummary>> = HashMap::new();
    for summary in EmbeddingStore::list_by_images(pool, &image_ids).await? {
        faces_by_image
            .entry(summary.image_id)
            .or_default()
            .push(summary);
    }

    Ok(images
        .into_iter()
        .map(|image| {
            let embeddings = faces_by_image.remove(&image.id).unwrap_or_default();
            ImageResponse::new(image, embeddings)
        })
        .collect())
}

/// Deletes a photo and its faces, then removes the file.
/// Only the event owner can delete a photo, anyone else gets `NotFound`.
#[instrument(skip(pool, storage))]
pub async fn delete_image(
    pool: &PgPool,
    storage: &ImageStorage,
    image_id: i64,
    owner_id: Uuid,
) -> Result<(), ImageError> {
    let image = lifecycle::delete_image(pool, image_id, owner_id).await?;
    if let Err(e) = storage.remove(&image.path).await {
        warn!("Could not remove photo {}: {}", image.path, e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::embedding::BoundingBox;

    fn face(len: usize) -> DetectedFace {
        DetectedFace {
            bbox: BoundingBox {
                x: 0.0,
                y: 0.0,
                w: 10.0,
                h: 10.0,
            },
            vector: vec![0.5; len],
        }
    }

    #[test]
    fn test_check_dimensions() {
        assert!(check_dimensions(&[], 512).is_ok());
        assert!(check_dimensions(&[face(512), face(512)], 512).is_ok());
        assert!(matches!(
            check_dimensions(&[face(512), face(128)], 512),
            Err(ImageError::InvalidInput(_))
        ));
    }
}
