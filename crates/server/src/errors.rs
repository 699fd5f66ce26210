use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by the variables HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be read; answered with a bare 500.
    #[error("cannot read request body: {0}")]
    PayloadRead(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("{0} not found")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::PayloadRead(msg) => {
                error!(error = %msg, "request body read failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(serde_json::json!({"error": msg}))).into_response()
            }
            e @ ApiError::NotFound(_) => {
                (StatusCode::NOT_FOUND, Json(serde_json::json!({"error": e.to_string()}))).into_response()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
