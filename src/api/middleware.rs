//! API Middleware
//!
//! Request logging, error body finishing, and panic recovery.

use std::any::Any;

use axum::{
    body::Body,
    extract::OriginalUri,
    http::{header::CONTENT_LENGTH, Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::request_id::RequestId;

use crate::error::{AppError, ErrorResponse};

// =========================================================================
// Error path stamping
// =========================================================================

/// Attach the request path to structured error bodies.
///
/// `AppError` renders its body without knowing the URI and leaves a copy in
/// the response extensions; this re-renders it with `path` filled in.
pub async fn error_path_middleware(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path().to_owned();

    let mut response = next.run(request).await;

    let Some(error_body) = response.extensions_mut().remove::<ErrorResponse>() else {
        return response;
    };

    // Keep headers set by outer layers (x-request-id, allow) on the re-rendered body
    let (mut parts, _) = response.into_parts();
    let (rendered, body) = error_body.with_path(path).into_parts();
    parts.headers.remove(CONTENT_LENGTH);
    parts.headers.extend(rendered.headers);

    Response::from_parts(parts, body)
}

// =========================================================================
// Router fallbacks
// =========================================================================

/// Fallback for paths no route matches
pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::RouteNotFound(uri.path().to_owned())
}

/// Fallback for a matched path requested with an unsupported method
pub async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_owned(),
    }
}

// =========================================================================
// Panic recovery
// =========================================================================

/// Turn a handler panic into a 500 error body.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}

// =========================================================================
// Request logging
// =========================================================================

/// Log every request and its outcome, tagged with the request id.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let request_id = request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .map(str::to_owned);

    let start = std::time::Instant::now();

    tracing::info!(
        method = %method,
        uri = %uri,
        request_id = ?request_id,
        "Incoming request"
    );

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = %duration.as_millis(),
        request_id = ?request_id,
        "Request completed"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, middleware, routing::get, Router};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::domain::DomainError;

    async fn missing() -> Response {
        AppError::from(DomainError::EventNotFound(3)).into_response()
    }

    async fn fine() -> &'static str {
        "fine"
    }

    fn app() -> Router {
        Router::new()
            .route("/things/3", get(missing))
            .route("/ok", get(fine))
            .layer(middleware::from_fn(error_path_middleware))
    }

    #[tokio::test]
    async fn test_error_body_gets_request_path() {
        let request = Request::builder()
            .uri("/things/3")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.path, "/things/3");
        assert_eq!(body.status, 404);
        assert_eq!(body.message, "Event not found with id: 3");
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let request = Request::builder().uri("/ok").body(Body::empty()).unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"fine");
    }

    #[test]
    fn test_panic_response_is_internal_error() {
        let response = panic_response(Box::new("storage exploded"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.extensions().get::<ErrorResponse>().unwrap();
        assert_eq!(body.error, "Internal Server Error");
        assert_eq!(body.message, "An unexpected error occurred");
    }

    #[tokio::test]
    async fn test_error_path_keeps_outer_headers() {
        async fn rejected() -> Response {
            let mut response = AppError::RouteNotFound("/x".into()).into_response();
            response
                .headers_mut()
                .insert("x-request-id", "abc-123".parse().unwrap());
            response
        }

        let app = Router::new()
            .route("/x", get(rejected))
            .layer(middleware::from_fn(error_path_middleware));
        let request = Request::builder().uri("/x").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["x-request-id"], "abc-123");
        assert_eq!(response.headers()["content-type"], "application/json");
    }
}
