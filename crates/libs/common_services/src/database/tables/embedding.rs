use pgvector::Vector;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error, PartialEq)]
#[error("Invalid bounding box: x={x}, y={y}, w={w}, h={h}")]
pub struct InvalidBoundingBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Pixel rectangle of a detected face, top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl BoundingBox {
    /// All components must be finite and non-negative.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Result<Self, InvalidBoundingBox> {
        let valid = [x, y, w, h]
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0);
        if valid {
            Ok(Self { x, y, w, h })
        } else {
            Err(InvalidBoundingBox { x, y, w, h })
        }
    }
}

/// A stored face vector.
#[derive(Debug, Clone, FromRow)]
pub struct Embedding {
    pub id: i64,
    pub image_id: i64,
    #[sqlx(flatten)]
    pub bbox: BoundingBox,
    pub vector: Vector,
}

/// An embedding without its vector, as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingSummary {
    pub id: i64,
    pub image_id: i64,
    #[sqlx(flatten)]
    pub bbox: BoundingBox,
}

/// One embedding of an event with its distance to a probe vector.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct FaceCandidate {
    pub embedding_id: i64,
    pub image_id: i64,
    pub image_path: String,
    #[sqlx(flatten)]
    pub bbox: BoundingBox,
    pub distance: f64,
}
