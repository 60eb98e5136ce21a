use crate::runner::context::face_provider::serve_face_provider;
use crate::runner::context::utils::{
    base_test_settings, create_test_database, create_test_settings,
};
use app_state::AppSettings;
use color_eyre::Result;
use color_eyre::eyre::bail;
use sqlx::{Executor, PgPool};
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

/// A running API with its own database, media folder and face provider.
pub struct TestContext {
    pub pool: PgPool,
    pub settings: AppSettings,
    pub http_client: reqwest::Client,
    _db_name: String,
    _management_pool: PgPool,
    _media_dir: TempDir,
    _api_handle: JoinHandle<()>,
    _provider_handle: JoinHandle<()>,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        info!("Setting up test environment...");

        let base_settings = base_test_settings()?;
        let database_name = format!("face_match_test_{}", Uuid::new_v4().simple());
        let (main_pool, management_pool) =
            create_test_database(&base_settings, &database_name).await?;

        let provider_listener = TcpListener::bind("127.0.0.1:0").await?;
        let provider_port = provider_listener.local_addr()?.port();
        let provider_handle = tokio::spawn(async move {
            if let Err(e) = serve_face_provider(provider_listener).await {
                error!("Face provider failed: {}", e);
            }
        });

        let media_dir = TempDir::new()?;
        let settings =
            create_test_settings(&base_settings, &database_name, media_dir.path(), provider_port)?;

        let api_pool = main_pool.clone();
        let api_settings = settings.clone();
        let api_handle = tokio::spawn(async move {
            if let Err(e) = api::serve(api_pool, api_settings).await {
                error!("API server failed: {}", e);
            }
        });

        let context = Self {
            pool: main_pool,
            settings,
            http_client: reqwest::Client::new(),
            _db_name: database_name,
            _management_pool: management_pool,
            _media_dir: media_dir,
            _api_handle: api_handle,
            _provider_handle: provider_handle,
        };
        context.wait_until_healthy().await?;
        info!("Test environment is ready.");
        Ok(context)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.settings.api.public_url)
    }

    async fn wait_until_healthy(&self) -> Result<()> {
        for _ in 0..50 {
            if let Ok(response) = self.http_client.get(self.url("/health")).send().await
                && response.status().is_success()
            {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        bail!("API did not become healthy at {}", self.settings.api.public_url)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        info!("Tearing down test environment...");

        self._api_handle.abort();
        self._provider_handle.abort();

        let db_name = self._db_name.clone();
        let pool = self._management_pool.clone();
        tokio::spawn(async move {
            info!("Dropping test database: {}", db_name);
            let query = format!("DROP DATABASE \"{db_name}\" WITH (FORCE)");
            if let Err(e) = pool.execute(query.as_str()).await {
                error!("Failed to drop test database {}: {}", db_name, e);
            }
        });
    }
}
