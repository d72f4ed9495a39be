//! Event entity and wire representation
//!
//! `Event` is the storage shape, `EventDto` is what clients send and receive.
//! The two carry identical fields; conversion is a direct copy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::validation::{DATE_REQUIRED, LOCATION_REQUIRED, TITLE_REQUIRED};

/// Persisted event record
///
/// `id` is `None` until the repository assigns one on first save.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Event {
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub event_date: NaiveDate,
}

impl Event {
    /// Overwrite every mutable field with the values from `source`, keeping `self.id`.
    pub fn overwrite_with(&mut self, source: Event) {
        self.title = source.title;
        self.description = source.description;
        self.location = source.location;
        self.event_date = source.event_date;
    }
}

/// Event as exchanged over HTTP
///
/// Every field is optional on the wire; business validation decides what is
/// actually required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub event_date: Option<NaiveDate>,
}

impl EventDto {
    pub fn new(
        title: impl Into<String>,
        location: impl Into<String>,
        event_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
            description: None,
            location: Some(location.into()),
            event_date: Some(event_date),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<Event> for EventDto {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: Some(event.title),
            description: event.description,
            location: Some(event.location),
            event_date: Some(event.event_date),
        }
    }
}

impl TryFrom<EventDto> for Event {
    type Error = DomainError;

    fn try_from(dto: EventDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: dto.id,
            title: dto.title.ok_or_else(|| DomainError::invalid(TITLE_REQUIRED))?,
            description: dto.description,
            location: dto
                .location
                .ok_or_else(|| DomainError::invalid(LOCATION_REQUIRED))?,
            event_date: dto
                .event_date
                .ok_or_else(|| DomainError::invalid(DATE_REQUIRED))?,
        })
    }
}
