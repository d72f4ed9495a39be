//! Common test utilities

#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, NaiveDate};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::util::ServiceExt;

use event_management::{api, EventService, InMemoryEventRepository};

/// Full application router over a fresh in-memory store
pub fn memory_app() -> Router {
    api::build_router(EventService::new(InMemoryEventRepository::new()))
}

pub fn today() -> NaiveDate {
    event_management::domain::today()
}

pub fn days_from_today(days: i64) -> String {
    (today() + Duration::days(days)).to_string()
}

pub fn event_json(title: &str, location: &str, event_date: &str) -> Value {
    json!({
        "title": title,
        "description": format!("{} description", title),
        "location": location,
        "eventDate": event_date,
    })
}

/// Send a request through the router and collect the response body
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Bytes) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&value).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes)
}

/// Same as `send`, parsing the body as JSON
pub async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let json = serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("non-JSON body for {} {}: {} ({:?})", method, uri, e, bytes));
    (status, json)
}

/// Connect to the test database, or `None` when `DATABASE_URL` is unset
pub async fn setup_test_db() -> Option<PgPool> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").ok()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id          BIGSERIAL PRIMARY KEY,
            title       TEXT NOT NULL,
            description TEXT,
            location    TEXT NOT NULL,
            event_date  DATE NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create events table");

    Some(pool)
}
