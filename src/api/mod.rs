//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::service::EventService;

pub use routes::create_router;

/// Build the application router
///
/// Unmatched paths and methods answer with the same JSON error body as
/// handler failures.
pub fn build_router(service: EventService) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .nest("/api", create_router())
        .method_not_allowed_fallback(middleware::method_not_allowed)
        .fallback(middleware::route_not_found);

    with_middleware(router).with_state(service)
}

/// Apply the shared layer stack
///
/// Layers run top to bottom: request id, propagation, tracing, logging,
/// error path stamping, then panic recovery closest to the handlers.
fn with_middleware<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(axum_middleware::from_fn(middleware::logging_middleware))
            .layer(axum_middleware::from_fn(middleware::error_path_middleware))
            .layer(CatchPanicLayer::custom(middleware::panic_response)),
    )
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
