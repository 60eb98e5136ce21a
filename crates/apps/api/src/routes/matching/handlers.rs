use crate::api_state::ApiContext;
use crate::upload::read_photo;
use axum::Json;
use axum::extract::{Multipart, Path, State};
use common_services::api::image::interfaces::PhotoUploadForm;
use common_services::api::matching::error::MatchError;
use common_services::api::matching::interfaces::{EmbeddingMatchPath, MatchResult};
use common_services::api::matching::service::{match_embedding, match_photo};

/// Find the photos of an event that show the person in a reference photo.
///
/// Only the first face in the reference photo is searched for. Results are ordered by
/// distance, best match first, with at most one result per photo.
#[utoipa::path(
    post,
    path = "/match/{event_id}",
    tag = "Match",
    params(
        ("event_id" = i64, Path, description = "The event to search in.")
    ),
    request_body(content = PhotoUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Matching photos.", body = Vec<MatchResult>),
        (status = 400, description = "No face found in the reference photo, or invalid input."),
        (status = 404, description = "Event not found."),
        (status = 502, description = "The face provider failed."),
    )
)]
pub async fn match_photo_handler(
    State(context): State<ApiContext>,
    Path(event_id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<Vec<MatchResult>>, MatchError> {
    let photo = read_photo(multipart).await?;
    let matches = match_photo(
        &context.pool,
        context.embedder.as_ref(),
        &context.thresholds,
        &context.face_config,
        event_id,
        &photo.bytes,
    )
    .await?;
    Ok(Json(matches))
}

/// Find the photos of an event that show the person of a stored face.
#[utoipa::path(
    get,
    path = "/match/{event_id}/{embedding_id}",
    tag = "Match",
    params(EmbeddingMatchPath),
    responses(
        (status = 200, description = "Matching photos.", body = Vec<MatchResult>),
        (status = 404, description = "Event or embedding not found."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn match_embedding_handler(
    State(context): State<ApiContext>,
    Path(path): Path<EmbeddingMatchPath>,
) -> Result<Json<Vec<MatchResult>>, MatchError> {
    let matches = match_embedding(
        &context.pool,
        &context.thresholds,
        &context.face_config,
        path.event_id,
        path.embedding_id,
    )
    .await?;
    Ok(Json(matches))
}
