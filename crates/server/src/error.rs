use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pipeline::QueryError;
use serde_json::json;

/// Errors returned by HTTP handlers.
///
/// Implements [`IntoResponse`] to produce `{"error": ..., "code": ...}` bodies.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The caller asked for something the query contract rejects
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The requested resource doesn't exist (e.g. range of an empty table)
    #[error("Not found: {0}")]
    NotFound(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Query(QueryError::InvalidQuery(msg)) => {
                (StatusCode::BAD_REQUEST, "INVALID_QUERY", msg.clone())
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
        };

        tracing::debug!(error = %self, "Request rejected");

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, Json(body)).into_response()
    }
}
