use crate::database::DbError;
use app_state::DatabaseSettings;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

/// Get a database connection pool.
/// # Errors
///
/// * `PgPool::connect` can return an error if the database connection fails.
pub async fn get_db_pool(
    database_url: &str,
    db_settings: &DatabaseSettings,
) -> color_eyre::Result<PgPool> {
    info!("Connecting to database.");
    let pool = PgPoolOptions::new()
        .max_connections(db_settings.max_connections)
        .min_connections(db_settings.min_connections)
        .max_lifetime(Duration::from_secs(db_settings.max_lifetime))
        .idle_timeout(Duration::from_secs(db_settings.idle_timeout))
        .acquire_timeout(Duration::from_secs(db_settings.acquire_timeout))
        .test_before_acquire(true)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Applies every pending migration from the workspace `migrations` folder.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    info!("Running database migrations.");
    sqlx::migrate!("../../../migrations").run(pool).await?;
    Ok(())
}

/// Rebuilds the approximate nearest-neighbour index on `embeddings.vector`.
///
/// The drop and the create run in one transaction, so a failed build keeps the old index.
/// `lists` should grow with the table, roughly `rows / 1000` up to a million rows.
///
/// pgvector only consults this index for `ORDER BY <distance> LIMIT` scans. The threshold
/// filter in `EmbeddingStore::find_candidates` does not use it and is bounded by the event's
/// images instead.
pub async fn rebuild_vector_index(pool: &PgPool, lists: u32) -> Result<(), DbError> {
    let lists = lists.max(1);
    info!("Rebuilding embedding vector index with {lists} lists.");
    let mut tx = pool.begin().await?;
    sqlx::query("DROP INDEX IF EXISTS embeddings_vector_idx")
        .execute(&mut *tx)
        .await?;
    // DDL does not accept bind parameters, `lists` is a plain integer.
    let create = format!(
        "CREATE INDEX embeddings_vector_idx ON embeddings \
         USING ivfflat (vector vector_cosine_ops) WITH (lists = {lists})"
    );
    sqlx::query(&create).execute(&mut *tx).await?;
    tx.commit().await?;
    Ok(())
}
