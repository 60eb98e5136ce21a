use super::interfaces::{EventRequest, EventResponse, ListEventsParams};
use crate::api::event::error::EventError;
use crate::database::event_store::EventStore;
use crate::lifecycle;
use crate::storage::ImageStorage;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: i64 = 100;
pub const MAX_PAGE_SIZE: i64 = 500;

/// Empty or whitespace-only text is stored as absent.
fn clean_text(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Resolves page parameters, rejecting a non-positive limit or a negative offset.
pub fn page_bounds(params: ListEventsParams) -> Result<(i64, i64), EventError> {
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0);
    if limit <= 0 {
        return Err(EventError::InvalidInput(format!(
            "limit must be positive, got {limit}"
        )));
    }
    if offset < 0 {
        return Err(EventError::InvalidInput(format!(
            "offset must not be negative, got {offset}"
        )));
    }
    Ok((limit.min(MAX_PAGE_SIZE), offset))
}

#[instrument(skip(pool))]
pub async fn create_event(
    pool: &PgPool,
    owner_id: Uuid,
    request: &EventRequest,
) -> Result<EventResponse, EventError> {
    let event = EventStore::create(
        pool,
        owner_id,
        clean_text(request.title.as_deref()),
        clean_text(request.description.as_deref()),
        request.date.unwrap_or_else(Utc::now),
    )
    .await?;
    info!("Created event {} for {}", event.id, owner_id);
    Ok(EventResponse::new(event, owner_id))
}

/// Any authenticated user can view an event.
#[instrument(skip(pool))]
pub async fn get_event(
    pool: &PgPool,
    event_id: i64,
    viewer_id: Uuid,
) -> Result<EventResponse, EventError> {
    let event = EventStore::find_by_id(pool, event_id)
        .await?
        .ok_or_else(|| EventError::NotFound(format!("Event {event_id}")))?;
    Ok(EventResponse::new(event, viewer_id))
}

#[instrument(skip(pool))]
pub async fn list_events(
    pool: &PgPool,
    viewer_id: Uuid,
    params: ListEventsParams,
) -> Result<Vec<EventResponse>, EventError> {
    let (limit, offset) = page_bounds(params)?;
    let events = EventStore::list(pool, limit, offset).await?;
    Ok(events
        .into_iter()
        .map(|event| EventResponse::new(event, viewer_id))
        .collect())
}

#[instrument(skip(pool))]
pub async fn list_my_events(
    pool: &PgPool,
    owner_id: Uuid,
) -> Result<Vec<EventResponse>, EventError> {
    let events = EventStore::list_by_owner(pool, owner_id).await?;
    Ok(events
        .into_iter()
        .map(|event| EventResponse::new(event, owner_id))
        .collect())
}

/// Only the owner can update an event, anyone else gets `NotFound`.
#[instrument(skip(pool))]
pub async fn update_event(
    pool: &PgPool,
    event_id: i64,
    owner_id: Uuid,
    request: &EventRequest,
) -> Result<EventResponse, EventError> {
    let event = EventStore::update_owned(
        pool,
        event_id,
        owner_id,
        clean_text(request.title.as_deref()),
        clean_text(request.description.as_deref()),
        request.date,
    )
    .await?
    .ok_or_else(|| EventError::NotFound(format!("Event {event_id}")))?;
    Ok(EventResponse::new(event, owner_id))
}

/// Deletes an event with all of its images and embeddings, then removes the photo files.
/// Only the owner can delete an event, anyone else gets `NotFound`.
#[instrument(skip(pool, storage))]
pub async fn delete_event(
    pool: &PgPool,
    storage: &ImageStorage,
    event_id: i64,
    owner_id: Uuid,
) -> Result<(), EventError> {
    let images = lifecycle::delete_event(pool, event_id, owner_id).await?;
    for image in images {
        if let Err(e) = storage.remove(&image.path).await {
            warn!("Could not remove photo {}: {}", image.path, e);
        }
    }
    Ok(())
}
