//! Event Management Library
//!
//! Re-exports modules for the server binary and integration testing.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repository;
pub mod service;

pub use config::Config;
pub use domain::{DomainError, Event, EventDto};
pub use error::{AppError, AppResult, ErrorResponse};
pub use repository::{EventRepository, InMemoryEventRepository, PgEventRepository};
pub use service::EventService;
