use crate::database::DbError;
use crate::database::image::Image;
use sqlx::{Executor, PgConnection, Postgres};
use uuid::Uuid;

pub struct ImageStore;

impl ImageStore {
    /// Inserts an image for `path`, or returns the existing row when the path is taken.
    ///
    /// The boolean is `true` when the row was created by this call. An existing image keeps
    /// its original event, even if `event_id` differs.
    pub async fn get_or_create(
        conn: &mut PgConnection,
        path: &str,
        event_id: i64,
    ) -> Result<(Image, bool), DbError> {
        let inserted = sqlx::query_as::<_, Image>(
            r"
            INSERT INTO images (path, event_id)
            VALUES ($1, $2)
            ON CONFLICT (path) DO NOTHING
            RETURNING *
            ",
        )
        .bind(path)
        .bind(event_id)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(image) = inserted {
            return Ok((image, true));
        }

        let existing = sqlx::query_as::<_, Image>("SELECT * FROM images WHERE path = $1")
            .bind(path)
            .fetch_one(&mut *conn)
            .await?;
        Ok((existing, false))
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        image_id: i64,
    ) -> Result<Option<Image>, DbError> {
        Ok(
            sqlx::query_as::<_, Image>("SELECT * FROM images WHERE id = $1")
                .bind(image_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn find_by_path(
        executor: impl Executor<'_, Database = Postgres>,
        path: &str,
    ) -> Result<Option<Image>, DbError> {
        Ok(
            sqlx::query_as::<_, Image>("SELECT * FROM images WHERE path = $1")
                .bind(path)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// Finds an image only if its event is owned by `owner_id`.
    pub async fn find_owned(
        executor: impl Executor<'_, Database = Postgres>,
        image_id: i64,
        owner_id: Uuid,
    ) -> Result<Option<Image>, DbError> {
        Ok(sqlx::query_as::<_, Image>(
            r"
            SELECT i.* FROM images i
            JOIN events e ON e.id = i.event_id
            WHERE i.id = $1 AND e.owner_id = $2
            ",
        )
        .bind(image_id)
        .bind(owner_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Locks the image row until the transaction ends.
    pub async fn lock_for_update(
        executor: impl Executor<'_, Database = Postgres>,
        image_id: i64,
    ) -> Result<Option<Image>, DbError> {
        Ok(
            sqlx::query_as::<_, Image>("SELECT * FROM images WHERE id = $1 FOR UPDATE")
                .bind(image_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    pub async fn list_by_event(
        executor: impl Executor<'_, Database = Postgres>,
        event_id: i64,
    ) -> Result<Vec<Image>, DbError> {
        Ok(sqlx::query_as::<_, Image>(
            "SELECT * FROM images WHERE event_id = $1 ORDER BY id",
        )
        .bind(event_id)
        .fetch_all(executor)
        .await?)
    }

    pub async fn count_by_event(
        executor: impl Executor<'_, Database = Postgres>,
        event_id: i64,
    ) -> Result<i64, DbError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM images WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(executor)
                .await?,
        )
    }

    pub async fn delete_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        image_id: i64,
    ) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(image_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_by_event(
        executor: impl Executor<'_, Database = Postgres>,
        event_id: i64,
    ) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM images WHERE event_id = $1")
            .bind(event_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
