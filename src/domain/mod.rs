//! Domain module
//!
//! Core domain types for event management.

pub mod error;
pub mod event;
pub mod validation;

pub use error::{DomainError, DomainResult};
pub use event::{Event, EventDto};
pub use validation::{today, validate_event};
