//! Event validation
//!
//! Business rules checked before any write. Rules are evaluated in a fixed
//! order and the first violation wins.

use chrono::{Local, NaiveDate};

use super::error::{DomainError, DomainResult};
use super::event::EventDto;

pub const TITLE_REQUIRED: &str = "Event title must not be empty";
pub const LOCATION_REQUIRED: &str = "Event location must not be empty";
pub const DATE_REQUIRED: &str = "Event date is required";
pub const DATE_IN_PAST: &str = "Event date cannot be in the past";
pub const LOCATION_QUERY_REQUIRED: &str = "Location must not be empty";

/// Server-local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Check a candidate event against the business rules.
///
/// Precedence: title, location, date presence, date not before `today`.
/// `description` and `id` are never inspected.
pub fn validate_event(dto: &EventDto, today: NaiveDate) -> DomainResult<()> {
    if is_blank(dto.title.as_deref()) {
        return Err(DomainError::invalid(TITLE_REQUIRED));
    }

    if is_blank(dto.location.as_deref()) {
        return Err(DomainError::invalid(LOCATION_REQUIRED));
    }

    let event_date = dto
        .event_date
        .ok_or_else(|| DomainError::invalid(DATE_REQUIRED))?;

    if event_date < today {
        return Err(DomainError::invalid(DATE_IN_PAST));
    }

    Ok(())
}

/// Check a location lookup argument.
pub fn validate_location_query(location: &str) -> DomainResult<()> {
    if is_blank(Some(location)) {
        return Err(DomainError::invalid(LOCATION_QUERY_REQUIRED));
    }
    Ok(())
}

/// Blank means empty after stripping ASCII space and control characters
/// (everything up to U+0020). Other Unicode whitespace such as a
/// non-breaking space counts as content.
fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim_matches(|c: char| c <= ' ').is_empty())
}
