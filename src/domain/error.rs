//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

/// Result alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Business rule violations raised by the domain and service layers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Candidate event breaks a business rule; the message names the rule
    #[error("{0}")]
    InvalidEvent(String),

    /// No event is stored under the given id
    #[error("Event not found with id: {0}")]
    EventNotFound(i64),
}

impl DomainError {
    pub fn invalid(message: impl Into<String>) -> Self {
        DomainError::InvalidEvent(message.into())
    }
}
