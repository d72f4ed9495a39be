//! Repository Errors

/// Result alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can occur while reading or writing events
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Update targeted a row that no longer exists
    #[error("Event {0} disappeared before it could be written")]
    Missing(i64),
}

impl RepositoryError {
    /// Check if the error means the target row is gone
    pub fn is_missing(&self) -> bool {
        matches!(self, RepositoryError::Missing(_))
    }
}
