use crate::database::DbError;
use crate::database::event::Event;
use chrono::{DateTime, Utc};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

pub struct EventStore;

impl EventStore {
    /// Creates a new event owned by `owner_id`.
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        owner_id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        date: DateTime<Utc>,
    ) -> Result<Event, DbError> {
        Ok(sqlx::query_as::<_, Event>(
            r"
            INSERT INTO events (owner_id, title, description, date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .bind(date)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        event_id: i64,
    ) -> Result<Option<Event>, DbError> {
        Ok(
            sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
                .bind(event_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// Finds an event only if it is owned by `owner_id`.
    pub async fn find_owned(
        executor: impl Executor<'_, Database = Postgres>,
        event_id: i64,
        owner_id: Uuid,
    ) -> Result<Option<Event>, DbError> {
        Ok(sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE id = $1 AND owner_id = $2",
        )
        .bind(event_id)
        .bind(owner_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Same as [`Self::find_owned`], but locks the row until the transaction ends.
    /// New images cannot reference a locked event.
    pub async fn lock_owned(
        executor: impl Executor<'_, Database = Postgres>,
        event_id: i64,
        owner_id: Uuid,
    ) -> Result<Option<Event>, DbError> {
        Ok(sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE id = $1 AND owner_id = $2 FOR UPDATE",
        )
        .bind(event_id)
        .bind(owner_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Lists all events, most recent date first.
    pub async fn list(
        executor: impl Executor<'_, Database = Postgres>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Event>, DbError> {
        Ok(sqlx::query_as::<_, Event>(
            r"
            SELECT * FROM events
            ORDER BY date DESC, id DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await?)
    }

    pub async fn list_by_owner(
        executor: impl Executor<'_, Database = Postgres>,
        owner_id: Uuid,
    ) -> Result<Vec<Event>, DbError> {
        Ok(sqlx::query_as::<_, Event>(
            r"
            SELECT * FROM events
            WHERE owner_id = $1
            ORDER BY date DESC, id DESC
            ",
        )
        .bind(owner_id)
        .fetch_all(executor)
        .await?)
    }

    /// Replaces title and description, and the date when one is given.
    /// Returns `None` when the event does not exist or is not owned by `owner_id`.
    pub async fn update_owned(
        executor: impl Executor<'_, Database = Postgres>,
        event_id: i64,
        owner_id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
        date: Option<DateTime<Utc>>,
    ) -> Result<Option<Event>, DbError> {
        Ok(sqlx::query_as::<_, Event>(
            r"
            UPDATE events
            SET
                title = $3,
                description = $4,
                date = COALESCE($5, date)
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            ",
        )
        .bind(event_id)
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .bind(date)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn delete_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        event_id: i64,
    ) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(event_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
