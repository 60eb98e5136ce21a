use crate::database::{DbError, SimilarityError};
use crate::face::FaceProviderError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No face found in query image")]
    NoFaceDetected,

    #[error("Face provider unavailable: {0}")]
    UpstreamUnavailable(String),
}

fn log_error(error: &MatchError) {
    match error {
        MatchError::Database(e) => warn!("Database query failed: {}", e),
        MatchError::Internal(e) => warn!("Internal error: {:?}", e),
        MatchError::NotFound(message) => warn!("Match -> Not found: {}", message),
        MatchError::InvalidInput(message) => warn!("Match -> Invalid input: {}", message),
        MatchError::NoFaceDetected => warn!("Match -> No face found in query image"),
        MatchError::UpstreamUnavailable(message) => {
            warn!("Match -> Face provider unavailable: {}", message);
        }
    }
}

impl IntoResponse for MatchError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected internal error occurred.".to_string(),
            ),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, format!("Not found: {message}")),
            Self::InvalidInput(message) => {
                (StatusCode::BAD_REQUEST, format!("Bad request: {message}"))
            }
            Self::NoFaceDetected => (
                StatusCode::BAD_REQUEST,
                "No face found in query image".to_string(),
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

impl From<DbError> for MatchError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(sqlx::Error::RowNotFound) => Self::NotFound("row not found".into()),
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
            DbError::Migrate(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}

impl From<SimilarityError> for MatchError {
    fn from(err: SimilarityError) -> Self {
        match err {
            SimilarityError::InvalidLimit(_) | SimilarityError::DimensionMismatch { .. } => {
                Self::InvalidInput(err.to_string())
            }
            SimilarityError::EventNotFound(event_id) => {
                Self::NotFound(format!("Event {event_id}"))
            }
            SimilarityError::Database(err) => err.into(),
        }
    }
}

impl From<FaceProviderError> for MatchError {
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
