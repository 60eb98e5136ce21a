use crate::api_state::ApiContext;
use crate::routes::matching::handlers::{match_embedding_handler, match_photo_handler};
use axum::{
    Router,
    routing::{get, post},
};

pub fn matching_public_router() -> Router<ApiContext> {
    Router::new().route("/match/{event_id}", post(match_photo_handler))
}

pub fn matching_protected_router() -> Router<ApiContext> {
    Router::new().route(
        "/match/{event_id}/{embedding_id}",
        get(match_embedding_handler),
    )
}
