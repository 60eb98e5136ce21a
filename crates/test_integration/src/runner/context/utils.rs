use app_state::{AppSettings, parse_app_settings};
use color_eyre::eyre::Result;
use common_services::database::{get_db_pool, run_migrations};
use sqlx::{Executor, PgPool};
use std::env;
use std::net::TcpListener;
use tracing::info;
use url::Url;

/// Settings from `assets/settings.yaml`. `DATABASE_URL`, when set, points at the server the
/// test databases are created on.
pub fn base_test_settings() -> Result<AppSettings> {
    let mut settings = parse_app_settings(include_str!("../../../assets/settings.yaml"))?;
    if let Ok(database_url) = env::var("DATABASE_URL") {
        settings.secrets.database_url = database_url;
    }
    Ok(settings)
}

fn with_database(database_url: &str, database_name: &str) -> Result<Url> {
    let mut url = Url::parse(database_url)?;
    url.set_path(&format!("/{database_name}"));
    Ok(url)
}

/// Creates a fresh database with all migrations applied.
///
/// Returns a pool for the new database and one for the `postgres` database, which is needed
/// to drop it again.
pub async fn create_test_database(
    settings: &AppSettings,
    database_name: &str,
) -> Result<(PgPool, PgPool)> {
    let management_url = with_database(&settings.secrets.database_url, "postgres")?;
    let management_pool = get_db_pool(management_url.as_str(), &settings.database).await?;
    force_drop_db(&management_pool, database_name).await;

    management_pool
        .execute(format!("CREATE DATABASE \"{database_name}\"").as_str())
        .await?;

    let test_url = with_database(&settings.secrets.database_url, database_name)?;
    let main_pool = get_db_pool(test_url.as_str(), &settings.database).await?;
    run_migrations(&main_pool).await?;
    info!("Finished database migrations for {}", database_name);

    Ok((main_pool, management_pool))
}

pub async fn force_drop_db(management_pool: &PgPool, database_name: &str) {
    let _ = management_pool
        .execute(format!("DROP DATABASE IF EXISTS \"{database_name}\" WITH (FORCE)").as_str())
        .await;
}

/// Settings for one test run, pointing at the test database and the local services.
pub fn create_test_settings(
    base_settings: &AppSettings,
    database_name: &str,
    media_folder: &std::path::Path,
    provider_port: u16,
) -> Result<AppSettings> {
    let mut settings = base_settings.clone();
    let api_port = get_free_port()?;
    settings.api.port = u32::from(api_port);
    settings.api.public_url = format!("http://127.0.0.1:{api_port}");
    settings.face.provider_url = format!("http://127.0.0.1:{provider_port}/represent");
    settings.storage.media_folder = media_folder.to_path_buf();
    settings.secrets.database_url =
        with_database(&base_settings.secrets.database_url, database_name)?.to_string();
    Ok(settings)
}

pub fn get_free_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
