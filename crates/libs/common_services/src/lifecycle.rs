use crate::database::image::Image;
use crate::database::{DbError, EmbeddingStore, EventStore, ImageStore};
use sqlx::PgPool;
use thiserror::Error;
use tracing::{error, info, instrument};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The row does not exist or is not owned by the caller.
    #[error("{0} not found")]
    NotFound(String),

    #[error("Consistency fault: {0}")]
    ConsistencyFault(String),

    #[error(transparent)]
    Database(#[from] DbError),
}

impl From<sqlx::Error> for LifecycleError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(DbError::from(err))
    }
}

/// Deletes an image and its embeddings in one transaction, then verifies that no embedding
/// of the image is left. Returns the deleted image so its file can be removed.
#[instrument(skip(pool), err(Debug))]
pub async fn delete_image(
    pool: &PgPool,
    image_id: i64,
    owner_id: Uuid,
) -> Result<Image, LifecycleError> {
    let mut tx = pool.begin().await?;
    let Some(image) = ImageStore::find_owned(&mut *tx, image_id, owner_id).await? else {
        return Err(LifecycleError::NotFound(format!("Image {image_id}")));
    };
    let Some(image) = ImageStore::lock_for_update(&mut *tx, image.id).await? else {
        return Err(LifecycleError::NotFound(format!("Image {image_id}")));
    };

    let embeddings = EmbeddingStore::delete_by_image(&mut *tx, image_id).await?;
    ImageStore::delete_by_id(&mut *tx, image_id).await?;
    tx.commit().await?;

    let remaining = EmbeddingStore::count_by_image(pool, image_id).await?;
    if remaining > 0 {
        error!("{remaining} embeddings of deleted image {image_id} remain");
        return Err(LifecycleError::ConsistencyFault(format!(
            "{remaining} embeddings of deleted image {image_id} remain"
        )));
    }

    info!("Deleted image {image_id} with {embeddings} embeddings");
    Ok(image)
}

/// Deletes an event with all its images and embeddings in one transaction, then verifies
/// that none of them is left. Returns the deleted images so their files can be removed.
#[instrument(skip(pool), err(Debug))]
pub async fn delete_event(
    pool: &PgPool,
    event_id: i64,
    owner_id: Uuid,
) -> Result<Vec<Image>, LifecycleError> {
    let mut tx = pool.begin().await?;
    if EventStore::lock_owned(&mut *tx, event_id, owner_id)
        .await?
        .is_none()
    {
        return Err(LifecycleError::NotFound(format!("Event {event_id}")));
    }

    let images = ImageStore::list_by_event(&mut *tx, event_id).await?;
    let embeddings = EmbeddingStore::delete_by_event(&mut *tx, event_id).await?;
    ImageStore::delete_by_event(&mut *tx, event_id).await?;
    EventStore::delete_by_id(&mut *tx, event_id).await?;
    tx.commit().await?;

    let image_ids: Vec<i64> = images.iter().map(|image| image.id).collect();
    let remaining_images = ImageStore::count_by_event(pool, event_id).await?;
    let remaining_embeddings = EmbeddingStore::count_by_images(pool, &image_ids).await?;
    if remaining_images > 0 || remaining_embeddings > 0 {
        error!(
            "Deleted event {event_id} left {remaining_images} images and {remaining_embeddings} embeddings"
        );
        return Err(LifecycleError::ConsistencyFault(format!(
            "deleted event {event_id} left {remaining_images} images and {remaining_embeddings} embeddings"
        )));
    }

    info!(
        "Deleted event {event_id} with {} images and {embeddings} embeddings",
        images.len()
    );
    Ok(images)
}
