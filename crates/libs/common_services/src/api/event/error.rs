use crate::database::DbError;
use crate::lifecycle::LifecycleError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Consistency fault: {0}")]
    ConsistencyFault(String),
}

fn log_error(error: &EventError) {
    match error {
        EventError::Database(e) => warn!("Database query failed: {}", e),
        EventError::Internal(e) => warn!("Internal error: {:?}", e),
        EventError::NotFound(message) => warn!("Event -> Not found: {}", message),
        EventError::InvalidInput(message) => warn!("Event -> Invalid input: {}", message),
        EventError::ConsistencyFault(message) => error!("Event -> Consistency fault: {}", message),
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "A database error occurred.".to_string(),
            ),
            Self::Internal(_) | Self::ConsistencyFault(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected internal error occurred.".to_string(),
            ),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, format!("Not found: {message}")),
            Self::InvalidInput(message) => {
                (StatusCode::BAD_REQUEST, format!("Bad request: {message}"))
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for EventError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(sqlx::Error::RowNotFound) => Self::NotFound("row not found".into()),
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
            DbError::Migrate(err) => Self::Internal(eyre::Report::new(err)),
        }
    }
}

impl From<LifecycleError> for EventError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::NotFound(message) => Self::NotFound(message),
            LifecycleError::ConsistencyFault(message) => Self::ConsistencyFault(message),
            LifecycleError::Database(err) => err.into(),
        }
    }
}
