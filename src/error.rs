//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::repository::RepositoryError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Business rule failures
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Request body could not be bound to an event
    #[error("{0}")]
    ValidationFailed(String),

    // Path parameter could not be bound
    #[error("{0}")]
    ConstraintViolation(String),

    // No route matches the request path
    #[error("No route matches {0}")]
    RouteNotFound(String),

    // Route exists but not for this method
    #[error("Method {method} is not allowed for {path}")]
    MethodNotAllowed { method: String, path: String },

    // Server errors (5xx)
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status and short category label for this failure
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Domain(DomainError::EventNotFound(_)) => {
                (StatusCode::NOT_FOUND, "Event Not Found")
            }
            AppError::Domain(DomainError::InvalidEvent(_)) => {
                (StatusCode::BAD_REQUEST, "Invalid Event Data")
            }
            AppError::ValidationFailed(_) => (StatusCode::BAD_REQUEST, "Validation Failed"),
            AppError::ConstraintViolation(_) => (StatusCode::BAD_REQUEST, "Constraint Violation"),
            AppError::RouteNotFound(_) => (StatusCode::NOT_FOUND, "Not Found"),
            AppError::MethodNotAllowed { .. } => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
            }
            AppError::Repository(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }

    /// Message shown to the client. Server-side causes stay in the log.
    fn public_message(&self) -> String {
        match self {
            AppError::Repository(_) | AppError::Internal(_) => {
                "An unexpected error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Error response body
///
/// `path` is left empty here and filled in by the error path middleware,
/// which is the only layer that sees the request URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

impl ErrorResponse {
    /// Render with the request path attached
    pub fn with_path(mut self, path: impl Into<String>) -> Response {
        self.path = path.into();
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, label) = self.classify();

        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::warn!(status = %status, error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            status: status.as_u16(),
            error: label.to_string(),
            message: self.public_message(),
            path: String::new(),
        };

        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        let cases = vec![
            (AppError::Domain(DomainError::EventNotFound(1)), 404, "Event Not Found"),
            (AppError::Domain(DomainError::invalid("bad")), 400, "Invalid Event Data"),
            (AppError::ValidationFailed("bad json".into()), 400, "Validation Failed"),
            (AppError::ConstraintViolation("bad id".into()), 400, "Constraint Violation"),
            (AppError::RouteNotFound("/nowhere".into()), 404, "Not Found"),
            (
                AppError::MethodNotAllowed {
                    method: "POST".into(),
                    path: "/api/events".into(),
                },
                405,
                "Method Not Allowed",
            ),
            (AppError::Internal("boom".into()), 500, "Internal Server Error"),
            (
                AppError::Repository(RepositoryError::Database(sqlx::Error::PoolTimedOut)),
                500,
                "Internal Server Error",
            ),
        ];

        for (err, status, label) in cases {
            let (actual_status, actual_label) = err.classify();
            assert_eq!(actual_status.as_u16(), status, "status for {:?}", err);
            assert_eq!(actual_label, label, "label for {:?}", err);
        }
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = AppError::Internal("connection string leaked".into());
        assert_eq!(err.public_message(), "An unexpected error occurred");
    }

    #[test]
    fn test_domain_message_passes_through() {
        let err = AppError::from(DomainError::EventNotFound(9999));
        assert_eq!(err.public_message(), "Event not found with id: 9999");
    }

    #[test]
    fn test_into_response_carries_body_extension() {
        let response = AppError::from(DomainError::EventNotFound(5)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = response.extensions().get::<ErrorResponse>().unwrap();
        assert_eq!(body.status, 404);
        assert_eq!(body.error, "Event Not Found");
        assert!(body.path.is_empty());
    }
}
