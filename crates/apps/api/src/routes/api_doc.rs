use crate::routes::{event, image, matching, root};
use common_services::api::event::interfaces::{EventRequest, EventResponse};
use common_services::api::image::interfaces::{ImageResponse, PhotoUploadForm};
use common_services::api::matching::interfaces::MatchResult;
use common_services::database::embedding::{BoundingBox, EmbeddingSummary};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::health_check,
        // Event handlers
        event::handlers::create_event_handler,
        event::handlers::list_events_handler,
        event::handlers::list_my_events_handler,
        event::handlers::get_event_handler,
        event::handlers::update_event_handler,
        event::handlers::delete_event_handler,
        // Image handlers
        image::handlers::upload_image_handler,
        image::handlers::list_images_handler,
        image::handlers::delete_image_handler,
        // Match handlers
        matching::handlers::match_photo_handler,
        matching::handlers::match_embedding_handler,
    ),
    components(
        schemas(
            EventRequest,
            EventResponse,
            ImageResponse,
            PhotoUploadForm,
            EmbeddingSummary,
            BoundingBox,
            MatchResult,
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Events", description = "Creating and managing events"),
        (name = "Images", description = "Uploading photos to events"),
        (name = "Match", description = "Finding a person's photos within an event"),
        (name = "System", description = "Health check"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
