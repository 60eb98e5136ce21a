use crate::database::DbError;
use crate::database::embedding::{BoundingBox, Embedding, EmbeddingSummary, FaceCandidate};
use crate::face::DistanceMetric;
use pgvector::Vector;
use sqlx::{Executor, Postgres};

pub struct EmbeddingStore;

/// Distance between `e.vector` and the probe in `$1`, matching [`DistanceMetric::distance`].
const fn distance_sql(metric: DistanceMetric) -> &'static str {
    match metric {
        DistanceMetric::Cosine => "(e.vector <=> $1)",
        DistanceMetric::Euclidean => "(e.vector <-> $1)",
        DistanceMetric::EuclideanL2 => "sqrt(greatest(2 * (e.vector <=> $1), 0))",
    }
}

impl EmbeddingStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        image_id: i64,
        bbox: BoundingBox,
        vector: &Vector,
    ) -> Result<EmbeddingSummary, DbError> {
        Ok(sqlx::query_as::<_, EmbeddingSummary>(
            r"
            INSERT INTO embeddings (image_id, x, y, w, h, vector)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, image_id, x, y, w, h
            ",
        )
        .bind(image_id)
        .bind(bbox.x)
        .bind(bbox.y)
        .bind(bbox.w)
        .bind(bbox.h)
        .bind(vector)
        .fetch_one(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        embedding_id: i64,
    ) -> Result<Option<Embedding>, DbError> {
        Ok(sqlx::query_as::<_, Embedding>(
            "SELECT id, image_id, x, y, w, h, vector FROM embeddings WHERE id = $1",
        )
        .bind(embedding_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn list_by_image(
        executor: impl Executor<'_, Database = Postgres>,
        image_id: i64,
    ) -> Result<Vec<EmbeddingSummary>, DbError> {
        Ok(sqlx::query_as::<_, EmbeddingSummary>(
            r"
            SELECT id, image_id, x, y, w, h FROM embeddings
            WHERE image_id = $1
            ORDER BY id
            ",
        )
        .bind(image_id)
        .fetch_all(executor)
        .await?)
    }

    /// Embeddings of several images at once, grouped by image in id order.
    pub async fn list_by_images(
        executor: impl Executor<'_, Database = Postgres>,
        image_ids: &[i64],
    ) -> Result<Vec<EmbeddingSummary>, DbError> {
        Ok(sqlx::query_as::<_, EmbeddingSummary>(
            r"
            SELECT id, image_id, x, y, w, h FROM embeddings
            WHERE image_id = ANY($1)
            ORDER BY image_id, id
            ",
        )
        .bind(image_ids)
        .fetch_all(executor)
        .await?)
    }

    pub async fn count_by_image(
        executor: impl Executor<'_, Database = Postgres>,
        image_id: i64,
    ) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM embeddings WHERE image_id = $1",
        )
        .bind(image_id)
        .fetch_one(executor)
        .await?)
    }

    pub async fn count_by_images(
        executor: impl Executor<'_, Database = Postgres>,
        image_ids: &[i64],
    ) -> Result<i64, DbError> {
        Ok(sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM embeddings WHERE image_id = ANY($1)",
        )
        .bind(image_ids)
        .fetch_one(executor)
        .await?)
    }

    pub async fn delete_by_image(
        executor: impl Executor<'_, Database = Postgres>,
        image_id: i64,
    ) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM embeddings WHERE image_id = $1")
            .bind(image_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Deletes the embeddings of every image in the event.
    pub async fn delete_by_event(
        executor: impl Executor<'_, Database = Postgres>,
        event_id: i64,
    ) -> Result<u64, DbError> {
        let result = sqlx::query(
            r"
            DELETE FROM embeddings e
            USING images i
            WHERE e.image_id = i.id AND i.event_id = $1
            ",
        )
        .bind(event_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// All embeddings of `event_id` within `threshold` of `probe`, unordered and
    /// not yet reduced to one face per image.
    pub async fn find_candidates(
        executor: impl Executor<'_, Database = Postgres>,
        event_id: i64,
        probe: &Vector,
        metric: DistanceMetric,
        threshold: f64,
    ) -> Result<Vec<FaceCandidate>, DbError> {
        let distance = distance_sql(metric);
        let query = format!(
            r"
            SELECT
                e.id AS embedding_id,
                e.image_id,
                i.path AS image_path,
                e.x, e.y, e.w, e.h,
                {distance}::float8 AS distance
            FROM embeddings e
            JOIN images i ON i.id = e.image_id
            WHERE i.event_id = $2 AND {distance} <= $3
            "
        );

        Ok(sqlx::query_as::<_, FaceCandidate>(&query)
            .bind(probe)
            .bind(event_id)
            .bind(threshold)
            .fetch_all(executor)
            .await?)
    }
}
