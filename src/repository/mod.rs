//! Repository module
//!
//! Storage access for events. `EventRepository` is the seam the service
//! depends on; PostgreSQL backs production and an in-memory map backs
//! development and tests.

mod error;
mod memory;
mod postgres;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::Event;

pub use error::{RepositoryError, RepositoryResult};
pub use memory::InMemoryEventRepository;
pub use postgres::PgEventRepository;

/// Storage interface for `Event` records
///
/// Every method is a single-record or single-query operation; none of them
/// compose a multi-statement transaction.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// All stored events in insertion order
    async fn find_all(&self) -> RepositoryResult<Vec<Event>>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Event>>;

    /// Events whose location equals `location` exactly (case-sensitive)
    async fn find_by_location(&self, location: &str) -> RepositoryResult<Vec<Event>>;

    /// Events dated strictly after `after`
    async fn find_upcoming(&self, after: NaiveDate) -> RepositoryResult<Vec<Event>>;

    /// Insert when `event.id` is `None`, otherwise overwrite the stored row.
    ///
    /// Returns the stored copy with its id populated.
    async fn save(&self, event: Event) -> RepositoryResult<Event>;

    /// Remove the event; returns whether a row was deleted.
    async fn delete(&self, id: i64) -> RepositoryResult<bool>;
}
