use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A stored photo. `path` is unique across all events.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: i64,
    pub path: String,
    pub event_id: i64,
    pub created_at: DateTime<Utc>,
}
