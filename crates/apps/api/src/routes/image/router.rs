use crate::api_state::ApiContext;
use crate::routes::image::handlers::{
    delete_image_handler, list_images_handler, upload_image_handler,
};
use axum::{Router, routing::post};

pub fn image_protected_router() -> Router<ApiContext> {
    // Uploads and listings take an event id, deletes take an image id.
    Router::new().route(
        "/images/{id}",
        post(upload_image_handler)
            .get(list_images_handler)
            .delete(delete_image_handler),
    )
}
