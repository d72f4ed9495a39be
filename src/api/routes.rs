//! API Routes
//!
//! HTTP endpoint definitions for `/api/events`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::{get, post},
    Json, Router,
};

use super::middleware;
use crate::domain::EventDto;
use crate::error::{AppError, AppResult};
use crate::service::EventService;

pub const DELETED_MESSAGE: &str = "Event deleted successfully";

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
///
/// Static segments (`create`, `upcoming`, `location`) take priority over `:id`.
/// `/events/location/` has no segment to capture, so it gets its own route
/// and answers with the blank-location rejection.
pub fn create_router() -> Router<EventService> {
    Router::new()
        .route("/events/create", post(create_event))
        .route("/events", get(get_all_events))
        .route("/events/upcoming", get(get_upcoming_events))
        .route("/events/location/", get(get_events_by_blank_location))
        .route("/events/location/:location", get(get_events_by_location))
        .route(
            "/events/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .method_not_allowed_fallback(middleware::method_not_allowed)
}

fn bind_body(payload: Result<Json<EventDto>, JsonRejection>) -> AppResult<EventDto> {
    payload
        .map(|Json(dto)| dto)
        .map_err(|rejection| AppError::ValidationFailed(rejection.body_text()))
}

fn bind_path<T>(param: Result<Path<T>, PathRejection>) -> AppResult<T> {
    param
        .map(|Path(value)| value)
        .map_err(|rejection| AppError::ConstraintViolation(rejection.body_text()))
}

// =========================================================================
// POST /events/create
// =========================================================================

async fn create_event(
    State(service): State<EventService>,
    payload: Result<Json<EventDto>, JsonRejection>,
) -> AppResult<Json<EventDto>> {
    let dto = bind_body(payload)?;
    tracing::info!("Creating event with title: {:?}", dto.title);

    let created = service.create_event(dto).await?;
    tracing::info!("Event created with id: {:?}", created.id);

    Ok(Json(created))
}

// =========================================================================
// GET /events
// =========================================================================

async fn get_all_events(State(service): State<EventService>) -> AppResult<Json<Vec<EventDto>>> {
    tracing::info!("Fetching all events");

    let events = service.get_all_events().await?;
    tracing::info!("Total events fetched: {}", events.len());

    Ok(Json(events))
}

// =========================================================================
// GET /events/:id
// =========================================================================

async fn get_event(
    State(service): State<EventService>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<EventDto>> {
    let id = bind_path(id)?;
    tracing::info!("Fetching event with id: {}", id);

    let event = service.get_event_by_id(id).await?;
    tracing::info!("Event fetched: {:?}", event.title);

    Ok(Json(event))
}

// =========================================================================
// PUT /events/:id
// =========================================================================

async fn update_event(
    State(service): State<EventService>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EventDto>, JsonRejection>,
) -> AppResult<Json<EventDto>> {
    let id = bind_path(id)?;
    let dto = bind_body(payload)?;
    tracing::info!("Updating event with id: {}", id);

    let updated = service.update_event(id, dto).await?;
    tracing::info!("Event updated: {:?}", updated.title);

    Ok(Json(updated))
}

// =========================================================================
// DELETE /events/:id
// =========================================================================

async fn delete_event(
    State(service): State<EventService>,
    id: Result<Path<i64>, PathRejection>,
) -> AppResult<&'static str> {
    let id = bind_path(id)?;
    tracing::info!("Deleting event with id: {}", id);

    service.delete_event(id).await?;
    tracing::info!("Event deleted with id: {}", id);

    Ok(DELETED_MESSAGE)
}

// =========================================================================
// GET /events/location/:location
// =========================================================================

async fn get_events_by_location(
    State(service): State<EventService>,
    location: Result<Path<String>, PathRejection>,
) -> AppResult<Json<Vec<EventDto>>> {
    let location = bind_path(location)?;
    find_by_location(&service, &location).await
}

async fn get_events_by_blank_location(
    State(service): State<EventService>,
) -> AppResult<Json<Vec<EventDto>>> {
    find_by_location(&service, "").await
}

async fn find_by_location(
    service: &EventService,
    location: &str,
) -> AppResult<Json<Vec<EventDto>>> {
    tracing::info!("Fetching events by location: {}", location);

    let events = service.get_events_by_location(location).await?;
    tracing::info!("Events fetched for location '{}': {}", location, events.len());

    Ok(Json(events))
}

// =========================================================================
// GET /events/upcoming
// =========================================================================

async fn get_upcoming_events(
    State(service): State<EventService>,
) -> AppResult<Json<Vec<EventDto>>> {
    tracing::info!("Fetching upcoming events");

    let events = service.get_upcoming_events().await?;
    tracing::info!("Upcoming events count: {}", events.len());

    Ok(Json(events))
}
