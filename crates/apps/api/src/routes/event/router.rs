use crate::api_state::ApiContext;
use crate::routes::event::handlers::{
    create_event_handler, delete_event_handler, get_event_handler, list_events_handler,
    list_my_events_handler, update_event_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

pub fn event_protected_router() -> Router<ApiContext> {
    Router::new()
        .route(
            "/events",
            post(create_event_handler).get(list_events_handler),
        )
        .route("/events/my", get(list_my_events_handler))
        .route(
            "/events/{event_id}",
            get(get_event_handler)
                .put(update_event_handler)
                .delete(delete_event_handler),
        )
}
