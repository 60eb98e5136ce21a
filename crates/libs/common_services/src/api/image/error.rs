use crate::database::DbError;
use crate::face::FaceProviderError;
use crate::lifecycle::LifecycleError;
use crate::storage::StorageError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No face detected in the uploaded photo")]
    NoFaceDetected,

    #[error("Consistency fault: {0}")]
    ConsistencyFault(String),

    #[error("Face provider unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

fn log_error(error: &ImageError) {
    match error {
        ImageError::Database(e) => warn!("Database query failed: {}", e),
        ImageError::Internal(e) => warn!("Internal error: {:?}", e),
        ImageError::NotFound(message) => warn!("Image -> Not found: {}", message),
        ImageError::InvalidInput(message) => warn!("Image -> Invalid input: {}", message),
        ImageError::NoFaceDetected => warn!("Image -> No face detected"),
        ImageError::ConsistencyFault(message) => error!("Image -> Consistency fault: {}", message),
        ImageError::UpstreamUnavailable(message) => {
            warn!("Image -> Face provider unavailable: {}", message);
        }
        ImageError::Storage(message) => warn!("Image -> Storage error: {}", message),
    }
}

impl IntoResponse for ImageError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
            ),
            Self::Internal(_) | Self::ConsistencyFault(_) | Self::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected internal error occurred.".to_string(),
            ),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, format!("Not found: {message}")),
            Self::InvalidInput(message) => {
                (StatusCode::BAD_REQUEST, format!("Bad request: {message}"))
            }
            Self::NoFaceDetected => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "No face detected in the uploaded photo".to_string(),
            ),
            Self::UpstreamUnavailable(message) => (
                StatusCode::BAD_GATEWAY,
                format!("Face provider unavailable: {message}"),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for ImageError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(sqlx::Error::RowNotFound) => Self::NotFound("row not found".into()),
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
            DbError::Migrate(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}

impl From<LifecycleError> for ImageError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::NotFound(message) => Self::NotFound(message),
            LifecycleError::ConsistencyFault(message) => Self::ConsistencyFault(message),
            LifecycleError::Database(err) => err.into(),
        }
    }
}

impl From<FaceProviderError> for ImageError {
    fn from(err: FaceProviderError) -> Self {
        match err {
            FaceProviderError::NoFaceDetected => Self::NoFaceDetected,
            FaceProviderError::DimensionMismatch { .. }
            | FaceProviderError::InvalidBoundingBox(_) => Self::InvalidInput(err.to_string()),
            FaceProviderError::Http(_)
            | FaceProviderError::Api { .. }
            | FaceProviderError::InvalidResponse(_) => Self::UpstreamUnavailable(err.to_string()),
        }
    }
}

impl From<StorageError> for ImageError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidFileName(_) => Self::InvalidInput(err.to_string()),
            StorageError::Io(_) => Self::Storage(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_errors_map_to_status() {
        let fault =
            ImageError::from(LifecycleError::ConsistencyFault("2 embeddings remain".into()));
        assert!(matches!(fault, ImageError::ConsistencyFault(_)));
        assert_eq!(
            fault.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let missing = ImageError::from(LifecycleError::NotFound("Image 9".into()));
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);
    }
}
