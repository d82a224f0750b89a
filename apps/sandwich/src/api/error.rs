//! HTTP error mapping.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sandwich_core::ShopError;
use serde_json::json;
use thiserror::Error;

/// Errors returned by handlers. Rendered as `{"detail": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Shop(#[from] ShopError),

    #[error("{}", .0.body_text())]
    Json(#[from] JsonRejection),

    #[error("{}", .0.body_text())]
    Query(#[from] QueryRejection),

    #[error("{}", .0.body_text())]
    Path(#[from] PathRejection),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// The status code this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Json(rejection) => rejection.status(),
            Self::Query(rejection) => rejection.status(),
            Self::Path(rejection) => rejection.status(),
            Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Shop(err) if err.is_internal() => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Shop(ShopError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Shop(ShopError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Shop(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (ShopError::missing_id(), StatusCode::NOT_FOUND),
            (
                ShopError::Validation(String::from("bad")),
                StatusCode::BAD_REQUEST,
            ),
            (
                ShopError::InsufficientStock(vec![String::from("Insufficient Bread")]),
                StatusCode::BAD_REQUEST,
            ),
            (
                ShopError::Conflict(String::from("taken")),
                StatusCode::CONFLICT,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }
}
