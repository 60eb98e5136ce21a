use crate::database::embedding::{BoundingBox, InvalidBoundingBox};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FaceProviderError {
    #[error("Face provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Face provider returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Face provider returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("No face detected")]
    NoFaceDetected,

    #[error("Face embedding has {actual} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    InvalidBoundingBox(#[from] InvalidBoundingBox),
}

/// One face found in an image.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedFace {
    pub bbox: BoundingBox,
    pub vector: Vec<f32>,
}

/// Detects faces in an image and computes one embedding per face.
#[async_trait]
pub trait FaceEmbedder: Send + Sync {
    /// Faces in detection order. Empty when no face was found, unless the provider is
    /// configured to enforce detection, in which case it fails with
    /// [`FaceProviderError::NoFaceDetected`].
    async fn embed_faces(&self, image: &[u8]) -> Result<Vec<DetectedFace>, FaceProviderError>;
}
