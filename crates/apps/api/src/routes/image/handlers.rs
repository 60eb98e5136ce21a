use crate::api_state::ApiContext;
use crate::upload::read_photo;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::auth::interfaces::AuthUser;
use common_services::api::image::error::ImageError;
use common_services::api::image::interfaces::{ImageResponse, PhotoUploadForm};
use common_services::api::image::service::{delete_image, list_images, upload_image};

/// Upload a photo to an event.
///
/// Faces in the photo are detected and stored. Uploading a file name that is already stored
/// returns the existing photo unchanged.
#[utoipa::path(
    post,
    path = "/images/{event_id}",
    tag = "Images",
    params(
        ("event_id" = i64, Path, description = "The event to add the photo to.")
    ),
    request_body(content = PhotoUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "The stored photo with its faces.", body = ImageResponse),
        (status = 400, description = "Missing or invalid photo."),
        (status = 404, description = "Event not found or not owned by the caller."),
        (status = 422, description = "No face detected and detection is enforced."),
        (status = 502, description = "The face provider failed."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_image_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<AuthUser>,
    Path(event_id): Path<i64>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ImageResponse>), ImageError> {
    let upload = read_photo(multipart).await?;
    let image = upload_image(
        &context.pool,
        &context.storage,
        context.embedder.as_ref(),
        &context.face_config,
        event_id,
        user.id,
        &upload,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// List the photos of an event with their faces.
#[utoipa::path(
    get,
    path = "/images/{event_id}",
    tag = "Images",
    params(
        ("event_id" = i64, Path, description = "The ID of the event.")
    ),
    responses(
        (status = 200, description = "Photos of the event.", body = Vec<ImageResponse>),
        (status = 404, description = "Event not found."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_images_handler(
    State(context): State<ApiContext>,
    Path(event_id): Path<i64>,
) -> Result<Json<Vec<ImageResponse>>, ImageError> {
    Ok(Json(list_images(&context.pool, event_id).await?))
}

/// Delete a photo and its faces.
///
/// Only the owner of the photo's event can delete it.
#[utoipa::path(
    delete,
    path = "/images/{image_id}",
    tag = "Images",
    params(
        ("image_id" = i64, Path, description = "The ID of the photo to delete.")
    ),
    responses(
        (status = 204, description = "Photo deleted."),
        (status = 404, description = "Photo not found or not owned by the caller."),
        (status = 500, description = "The delete left faces behind."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_image_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<AuthUser>,
    Path(image_id): Path<i64>,
) -> Result<StatusCode, ImageError> {
    delete_image(&context.pool, &context.storage, image_id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
