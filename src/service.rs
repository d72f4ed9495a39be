//! Event Service
//!
//! Orchestrates validation, mapping, and persistence for each use case.
//! Failures are raised as typed errors and never handled here.

use std::sync::Arc;

use crate::domain::validation::validate_location_query;
use crate::domain::{today, validate_event, DomainError, Event, EventDto};
use crate::error::{AppError, AppResult};
use crate::repository::{EventRepository, RepositoryError};

/// Service layer for event business logic
#[derive(Clone)]
pub struct EventService {
    repository: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(repository: impl EventRepository + 'static) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub fn from_arc(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }

    /// Validate and persist a new event. Any client-supplied id is ignored.
    pub async fn create_event(&self, dto: EventDto) -> AppResult<EventDto> {
        validate_event(&dto, today())?;

        let mut event = Event::try_from(dto)?;
        event.id = None;

        let stored = self.repository.save(event).await?;
        Ok(stored.into())
    }

    pub async fn get_all_events(&self) -> AppResult<Vec<EventDto>> {
        let events = self.repository.find_all().await?;
        Ok(events.into_iter().map(EventDto::from).collect())
    }

    pub async fn get_event_by_id(&self, id: i64) -> AppResult<EventDto> {
        Ok(self.find_existing(id).await?.into())
    }

    /// Overwrite every mutable field of an existing event.
    ///
    /// The payload is validated before the target is looked up, so an invalid
    /// payload for an unknown id reports the validation failure.
    pub async fn update_event(&self, id: i64, dto: EventDto) -> AppResult<EventDto> {
        validate_event(&dto, today())?;
        let incoming = Event::try_from(dto)?;

        let mut event = self.find_existing(id).await?;
        event.overwrite_with(incoming);

        let stored = self
            .repository
            .save(event)
            .await
            .map_err(|e| not_found_if_missing(e, id))?;
        Ok(stored.into())
    }

    pub async fn delete_event(&self, id: i64) -> AppResult<()> {
        self.find_existing(id).await?;

        if !self.repository.delete(id).await? {
            return Err(DomainError::EventNotFound(id).into());
        }
        Ok(())
    }

    pub async fn get_events_by_location(&self, location: &str) -> AppResult<Vec<EventDto>> {
        validate_location_query(location)?;

        let events = self.repository.find_by_location(location).await?;
        Ok(events.into_iter().map(EventDto::from).collect())
    }

    /// Events dated strictly after today
    pub async fn get_upcoming_events(&self) -> AppResult<Vec<EventDto>> {
        let events = self.repository.find_upcoming(today()).await?;
        Ok(events.into_iter().map(EventDto::from).collect())
    }

    async fn find_existing(&self, id: i64) -> AppResult<Event> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::EventNotFound(id).into())
    }
}

fn not_found_if_missing(err: RepositoryError, id: i64) -> AppError {
    if err.is_missing() {
        DomainError::EventNotFound(id).into()
    } else {
        err.into()
    }
}
