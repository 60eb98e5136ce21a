use crate::api_state::ApiContext;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::auth::interfaces::AuthUser;
use common_services::api::event::error::EventError;
use common_services::api::event::interfaces::{EventRequest, EventResponse, ListEventsParams};
use common_services::api::event::service::{
    create_event, delete_event, get_event, list_events, list_my_events, update_event,
};

/// Create a new event.
///
/// The caller becomes the owner of the event.
#[utoipa::path(
    post,
    path = "/events",
    tag = "Events",
    request_body = EventRequest,
    responses(
        (status = 201, description = "Event created successfully.", body = EventResponse),
        (status = 401, description = "Missing or invalid bearer token."),
        (status = 500, description = "A database or internal error occurred."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_event_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<EventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), EventError> {
    let event = create_event(&context.pool, user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// List all events, most recent first.
#[utoipa::path(
    get,
    path = "/events",
    tag = "Events",
    params(ListEventsParams),
    responses(
        (status = 200, description = "A page of events.", body = Vec<EventResponse>),
        (status = 400, description = "Invalid limit or offset."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_events_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ListEventsParams>,
) -> Result<Json<Vec<EventResponse>>, EventError> {
    Ok(Json(list_events(&context.pool, user.id, params).await?))
}

/// List the events owned by the caller.
#[utoipa::path(
    get,
    path = "/events/my",
    tag = "Events",
    responses(
        (status = 200, description = "The caller's events, most recent first.", body = Vec<EventResponse>),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_my_events_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<EventResponse>>, EventError> {
    Ok(Json(list_my_events(&context.pool, user.id).await?))
}

#[utoipa::path(
    get,
    path = "/events/{event_id}",
    tag = "Events",
    params(
        ("event_id" = i64, Path, description = "The ID of the event.")
    ),
    responses(
        (status = 200, description = "The event.", body = EventResponse),
        (status = 404, description = "Event not found."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_event_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<AuthUser>,
    Path(event_id): Path<i64>,
) -> Result<Json<EventResponse>, EventError> {
    Ok(Json(get_event(&context.pool, event_id, user.id).await?))
}

/// Update an event.
///
/// Title and description are replaced, the date is kept when omitted. Only the owner can
/// update an event.
#[utoipa::path(
    put,
    path = "/events/{event_id}",
    tag = "Events",
    params(
        ("event_id" = i64, Path, description = "The ID of the event to update.")
    ),
    request_body = EventRequest,
    responses(
        (status = 200, description = "Event updated successfully.", body = EventResponse),
        (status = 404, description = "Event not found or not owned by the caller."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_event_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<AuthUser>,
    Path(event_id): Path<i64>,
    Json(payload): Json<EventRequest>,
) -> Result<Json<EventResponse>, EventError> {
    Ok(Json(
        update_event(&context.pool, event_id, user.id, &payload).await?,
    ))
}

/// Delete an event with all of its photos and faces.
///
/// Only the owner can delete an event.
#[utoipa::path(
    delete,
    path = "/events/{event_id}",
    tag = "Events",
    params(
        ("event_id" = i64, Path, description = "The ID of the event to delete.")
    ),
    responses(
        (status = 204, description = "Event deleted."),
        (status = 404, description = "Event not found or not owned by the caller."),
        (status = 500, description = "The delete left rows behind."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_event_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<AuthUser>,
    Path(event_id): Path<i64>,
) -> Result<StatusCode, EventError> {
    delete_event(&context.pool, &context.storage, event_id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
