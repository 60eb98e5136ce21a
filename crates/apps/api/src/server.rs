use crate::api_state::ApiContext;
use crate::create_router;
use app_state::AppSettings;
use axum::routing::get_service;
use color_eyre::Result;
use common_services::face::{FaceConfig, RemoteFaceEmbedder, ThresholdTable};
use common_services::storage::ImageStorage;
use http::{HeaderValue, header};
use sqlx::PgPool;
use std::iter::once;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors;
use tower_http::cors::CorsLayer;
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Builds the shared request context from settings.
///
/// Fails when the configured model and metric have no threshold.
pub fn build_context(pool: PgPool, settings: AppSettings) -> Result<ApiContext> {
    let thresholds = ThresholdTable::with_overrides(&settings.face.threshold_overrides)?;
    let face_config = FaceConfig::from_settings(&settings.face, &thresholds)?;
    info!(
        "Matching faces with {} ({}), threshold {:?}",
        face_config.model,
        face_config.metric,
        thresholds.get(&face_config.model, face_config.metric)
    );

    Ok(ApiContext {
        pool,
        storage: ImageStorage::new(&settings.storage.media_folder),
        embedder: Arc::new(RemoteFaceEmbedder::from_settings(&settings.face)?),
        thresholds: Arc::new(thresholds),
        face_config: Arc::new(face_config),
        settings,
    })
}

pub async fn serve(pool: PgPool, settings: AppSettings) -> Result<()> {
    info!("🚀 Initializing server...");
    let api_state = build_context(pool, settings.clone())?;

    // --- CORS Configuration ---
    let allowed_origins: Vec<HeaderValue> = settings
        .api
        .allowed_origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(hv) => Some(hv),
            Err(e) => {
                error!("Invalid CORS origin configured: {} - Error: {}", s, e);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods(cors::Any)
        .allow_origin(allowed_origins)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::USER_AGENT,
            header::CACHE_CONTROL,
            header::PRAGMA,
        ]);

    // Uploaded photos, by stored path.
    let serve_dir = ServeDir::new(&settings.storage.media_folder);
    let cache_layer = SetResponseHeaderLayer::if_not_present(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=86400"),
    );

    let app = create_router(api_state)
        .layer(TraceLayer::new_for_http().on_request(()))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(SetSensitiveRequestHeadersLayer::new(once(
            header::AUTHORIZATION,
        )))
        .nest_service("/files", get_service(serve_dir).layer(cache_layer));

    let address = settings.listen_address();
    let listener = TcpListener::bind(&address).await?;
    info!("🐸 Server listening on http://{}", address);

    axum::serve(listener, app).await?;
    Ok(())
}
