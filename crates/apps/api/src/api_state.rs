use app_state::AppSettings;
use axum::extract::FromRef;
use common_services::face::{FaceConfig, FaceEmbedder, ThresholdTable};
use common_services::storage::ImageStorage;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiContext {
    pub pool: PgPool,
    pub settings: AppSettings,
    pub storage: ImageStorage,
    pub embedder: Arc<dyn FaceEmbedder>,
    pub thresholds: Arc<ThresholdTable>,
    pub face_config: Arc<FaceConfig>,
}

impl FromRef<ApiContext> for PgPool {
    fn from_ref(state: &ApiContext) -> Self {
        state.pool.clone()
    }
}

impl FromRef<ApiContext> for AppSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.clone()
    }
}

impl FromRef<ApiContext> for ImageStorage {
    fn from_ref(state: &ApiContext) -> Self {
        state.storage.clone()
    }
}
