mod api_doc;
pub mod auth;
pub mod event;
pub mod image;
pub mod matching;
pub mod root;
pub mod upload;

use crate::api_state::ApiContext;
use crate::auth::middlewares::user::ApiUser;
use crate::event::router::event_protected_router;
use crate::image::router::image_protected_router;
use crate::matching::router::{matching_protected_router, matching_public_router};
use crate::root::router::root_public_router;
use crate::routes::api_doc::ApiDoc;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_extractor_with_state;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// --- Router Construction ---
pub fn create_router(api_state: ApiContext) -> Router {
    let body_limit = api_state.settings.api.max_upload_bytes;
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .merge(public_routes())
        .merge(protected_routes(api_state.clone()))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(api_state)
}

fn public_routes() -> Router<ApiContext> {
    Router::new()
        .merge(root_public_router())
        .merge(matching_public_router())
}

fn protected_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(event_protected_router())
        .merge(image_protected_router())
        .merge(matching_protected_router())
        .route_layer(from_extractor_with_state::<ApiUser, ApiContext>(api_state))
}
